//! Core ETL (Extract, Transform, Load) abstractions
//!
//! Every collection flow is an extractor producing a [`Table`](crate::table::Table),
//! a transformer reshaping it and a loader persisting it.

mod extract;
mod load;
mod pipeline;
mod transform;

pub use extract::Extractor;
pub use load::Loader;
pub use pipeline::Pipeline;
pub use transform::{Chain, IdentityTransformer, Transformer};

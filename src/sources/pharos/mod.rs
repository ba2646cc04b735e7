//! Pharos (TCRD) MySQL source
//!
//! Dumps a list of tables in full and inner-joins them into one table.

mod extractor;

pub use extractor::{PharosExtractor, select_all};

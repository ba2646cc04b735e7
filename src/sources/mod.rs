//! Dataset sources
//!
//! One submodule per external dataset, each exposing an
//! [`Extractor`](crate::etl::Extractor) that produces a ready-to-write table.

pub mod chembl;
pub mod drug_central;
pub mod pharos;
pub mod uniprot;

//! ChEMBL PostgreSQL source
//!
//! Runs one read query and shapes the result into drug/target pairs.

mod extractor;

pub use extractor::{CHEMBL_COLUMNS, ChemblExtractor, shaper};

//! File system storage operations
//!
//! This module handles all file I/O operations including:
//! - Delimited (CSV/TSV) file reading and writing
//! - Dataset manifest management

mod csv;
mod manifest;

pub use self::csv::{CsvReader, CsvWriter, delimiter_for};
pub use manifest::{
    ChemblSection, DEFAULT_CHEMBL_QUERY, DatasetsManifest, DrugCentralSection, PharosSection,
    UniprotSection,
};

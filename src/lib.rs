//! Bioactivity Collector
//!
//! A one-shot ETL gathering drug/target bioactivity data from Pharos (MySQL),
//! ChEMBL (PostgreSQL), a DrugCentral export and the UniProt web service
//! into CSV files.

pub mod cli;
pub mod client;
pub mod config;
pub mod etl;
pub mod sources;
pub mod storage;
pub mod table;
pub mod transform;

// Re-exports for convenience
pub use client::{DatabaseParams, UniprotClient};
pub use etl::{Extractor, IdentityTransformer, Loader, Pipeline, Transformer};
pub use storage::{CsvReader, CsvWriter, DatasetsManifest};
pub use table::{Table, Value};

//! UniProt annotation source

mod extractor;

pub use extractor::{ANNOTATION_COLUMNS, ProteinAnnotationExtractor};

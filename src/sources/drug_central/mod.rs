//! DrugCentral file source
//!
//! Reads the DrugCentral drug/target export and keeps the requested columns.

use crate::etl::{Extractor, Transformer};
use crate::storage::CsvReader;
use crate::table::Table;
use crate::transform::ColumnSelector;
use eyre::{Context, Result};
use std::path::Path;

/// Extractor for a local DrugCentral export
pub struct DrugCentralExtractor {
    reader: CsvReader,
    selector: ColumnSelector,
}

impl DrugCentralExtractor {
    /// Create a new DrugCentral extractor
    ///
    /// # Arguments
    /// * `path` - Delimited export file; `.tsv` files are read tab separated
    /// * `columns` - Columns kept, in output order
    pub fn new<S: Into<String>>(path: impl AsRef<Path>, columns: Vec<S>) -> Self {
        Self {
            reader: CsvReader::new(path),
            selector: ColumnSelector::new(columns),
        }
    }

    /// Override the delimiter inferred from the file extension
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.reader = self.reader.with_delimiter(delimiter);
        self
    }

    pub fn path(&self) -> &Path {
        self.reader.path()
    }
}

impl Extractor for DrugCentralExtractor {
    async fn extract(&self) -> Result<Table> {
        let table = self.reader.read()?;

        self.selector
            .transform(table)
            .with_context(|| format!("Unexpected layout in {}", self.reader.path().display()))
    }
}

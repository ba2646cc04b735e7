//! Delimited text file operations

use crate::etl::{Extractor, Loader};
use crate::table::{Table, Value};

use eyre::{Context, Result};
use std::path::{Path, PathBuf};

/// Pick a delimiter from the file extension: tab for `.tsv`/`.tab`, comma otherwise
pub fn delimiter_for(path: &Path) -> u8 {
    match path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .as_deref()
    {
        Some("tsv") | Some("tab") => b'\t',
        _ => b',',
    }
}

/// Read a delimited file with a header row into a [`Table`]
///
/// Every field is read as text; empty fields become `Null`.
pub struct CsvReader {
    path: PathBuf,
    delimiter: u8,
}

impl CsvReader {
    /// Create a reader, inferring the delimiter from the file extension
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let delimiter = delimiter_for(&path);
        Self { path, delimiter }
    }

    /// Override the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole file
    pub fn read(&self) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .from_path(&self.path)
            .with_context(|| format!("Failed to open delimited file: {}", self.path.display()))?;

        let headers = reader
            .headers()
            .with_context(|| format!("Failed to read header row: {}", self.path.display()))?
            .clone();

        let mut table = Table::new(headers.iter());

        for (line, record) in reader.records().enumerate() {
            let record = record.with_context(|| {
                format!(
                    "Failed to parse record {} of {}",
                    line + 1,
                    self.path.display()
                )
            })?;

            let row = record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        Value::Null
                    } else {
                        Value::Text(field.to_string())
                    }
                })
                .collect();
            table.push_row(row)?;
        }

        log::debug!(
            "Read {} row(s) from {}",
            table.len(),
            self.path.display()
        );

        Ok(table)
    }
}

impl Extractor for CsvReader {
    async fn extract(&self) -> Result<Table> {
        self.read()
    }
}

/// Write a [`Table`] to a comma-separated file, replacing any existing file
pub struct CsvWriter {
    path: PathBuf,
    index: bool,
}

impl CsvWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            index: false,
        }
    }

    /// Prefix every row with its zero-based position under an unnamed column
    pub fn with_index(mut self, index: bool) -> Self {
        self.index = index;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the table and return the number of data rows written
    pub fn write(&self, table: &Table) -> Result<usize> {
        let mut writer = csv::WriterBuilder::new()
            .from_path(&self.path)
            .with_context(|| format!("Failed to create CSV file: {}", self.path.display()))?;

        let index_header = self.index.then_some("");
        writer
            .write_record(
                index_header
                    .into_iter()
                    .chain(table.columns().iter().map(String::as_str)),
            )
            .with_context(|| format!("Failed to write CSV header: {}", self.path.display()))?;

        for (i, row) in table.rows().iter().enumerate() {
            let index_field = self.index.then(|| i.to_string());
            writer
                .write_record(index_field.into_iter().chain(row.iter().map(Value::to_field)))
                .with_context(|| format!("Failed to write CSV row {}", i))?;
        }

        writer
            .flush()
            .with_context(|| format!("Failed to flush CSV file: {}", self.path.display()))?;

        Ok(table.len())
    }
}

impl Loader for CsvWriter {
    async fn load(&self, table: Table) -> Result<usize> {
        self.write(&table)
    }
}

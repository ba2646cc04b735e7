//! Null filter transformer

use crate::etl::Transformer;
use crate::table::Table;
use eyre::Result;

/// Transformer that drops rows with a `Null` in any of the given columns
pub struct NullFilter {
    columns: Vec<String>,
}

impl NullFilter {
    pub fn new<S: Into<String>>(columns: Vec<S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }
}

impl Transformer for NullFilter {
    fn transform(&self, table: Table) -> Result<Table> {
        let before = table.len();
        let names: Vec<&str> = self.columns.iter().map(String::as_str).collect();
        let table = table.drop_nulls(&names)?;

        log::debug!(
            "Dropped {} row(s) with null {}",
            before - table.len(),
            self.columns.join("/")
        );
        Ok(table)
    }
}

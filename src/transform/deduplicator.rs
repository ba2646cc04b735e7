//! Duplicate row removal

use crate::etl::Transformer;
use crate::table::Table;
use eyre::Result;

/// Transformer removing exact duplicate rows, first occurrence wins
#[derive(Debug, Default, Clone, Copy)]
pub struct Deduplicator;

impl Transformer for Deduplicator {
    fn transform(&self, table: Table) -> Result<Table> {
        let before = table.len();
        let table = table.drop_duplicates();
        log::debug!("Removed {} duplicate row(s)", before - table.len());
        Ok(table)
    }
}

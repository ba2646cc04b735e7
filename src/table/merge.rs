//! Folding inner join across several tables

use super::Table;
use eyre::{Context, Result};

/// Column every subsequent table is joined on
pub const RIGHT_KEY: &str = "id";

/// Inner join a list of tables left to right.
///
/// The first table is the accumulator; every following table is joined on
/// `accumulator.merge_on == table.id`. A single table is returned unchanged.
///
/// # Errors
/// Returns an error if `tables` is empty or a key column is missing at any
/// step of the fold.
pub fn merge_on_id(tables: Vec<Table>, merge_on: &str) -> Result<Table> {
    let mut tables = tables.into_iter();
    let mut merged = tables
        .next()
        .ok_or_else(|| eyre::eyre!("At least one table is required to merge"))?;

    for (step, table) in tables.enumerate() {
        log::debug!(
            "Joining {} row(s) with {} row(s) on {} = {}",
            merged.len(),
            table.len(),
            merge_on,
            RIGHT_KEY
        );
        merged = merged
            .inner_join(&table, merge_on, RIGHT_KEY)
            .with_context(|| format!("Failed to merge table #{} on '{}'", step + 2, merge_on))?;
    }

    Ok(merged)
}

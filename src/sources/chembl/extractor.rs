//! ChEMBL query extractor

use crate::client::{DatabaseParams, connect_postgres, fetch_postgres_table};
use crate::etl::{Extractor, Transformer};
use crate::table::Table;
use crate::transform::{ColumnRenamer, Deduplicator, NullFilter};
use eyre::{Context, Result};
use sqlx::Connection;

/// Output schema: preferred drug name, canonical SMILES, UniProt accession
pub const CHEMBL_COLUMNS: [&str; 3] = ["drug", "smiles", "uniprot"];

/// Shaping applied to raw query results.
///
/// Renames the three result columns to [`CHEMBL_COLUMNS`], drops rows
/// without a drug name or accession and removes exact duplicates.
pub fn shaper() -> impl Transformer {
    ColumnRenamer::new(CHEMBL_COLUMNS.to_vec())
        .then(NullFilter::new(vec!["drug", "uniprot"]))
        .then(Deduplicator)
}

/// Extractor for a ChEMBL query
///
/// Opens one connection, runs the query, closes the connection and returns
/// the shaped result.
pub struct ChemblExtractor {
    params: DatabaseParams,
    query: String,
}

impl ChemblExtractor {
    /// Create a new ChEMBL extractor
    ///
    /// # Arguments
    /// * `params` - PostgreSQL connection parameters
    /// * `query` - Read query returning exactly three columns
    pub fn new(params: DatabaseParams, query: impl Into<String>) -> Self {
        Self {
            params,
            query: query.into(),
        }
    }

    async fn fetch_raw(&self) -> Result<Table> {
        let mut conn = connect_postgres(&self.params).await?;
        let table = fetch_postgres_table(&mut conn, &self.query)
            .await
            .with_context(|| "Failed to run ChEMBL query")?;

        conn.close()
            .await
            .with_context(|| format!("Failed to close connection to {}", self.params))?;

        Ok(table)
    }
}

impl Extractor for ChemblExtractor {
    async fn extract(&self) -> Result<Table> {
        let raw = self.fetch_raw().await?;
        log::info!("ChEMBL query returned {} row(s)", raw.len());

        let shaped = shaper().transform(raw)?;
        log::info!("Kept {} unique drug/target pair(s)", shaped.len());

        Ok(shaped)
    }
}

//! Pharos table-set extractor

use crate::client::{DatabaseParams, connect_mysql, fetch_mysql_table};
use crate::etl::Extractor;
use crate::table::{Table, merge_on_id};
use eyre::{Context, Result};
use regex::Regex;
use sqlx::Connection;
use std::sync::LazyLock;

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid")
});

/// `SELECT *` statement for one table.
///
/// # Errors
/// Returns an error unless the name is a plain identifier (letters, digits,
/// underscores)
pub fn select_all(table: &str) -> Result<String> {
    if !IDENTIFIER.is_match(table) {
        eyre::bail!("Invalid table name '{}'", table);
    }
    Ok(format!("SELECT * FROM `{}`", table))
}

/// Extractor for Pharos tables
///
/// Fetches every table over a single connection, then folds an inner join
/// over them: the accumulated result's `merge_on` column against each next
/// table's `id` column.
///
/// # Example
/// ```no_run
/// use bioactivity_collector::client::DatabaseParams;
/// use bioactivity_collector::etl::Extractor;
/// use bioactivity_collector::sources::pharos::PharosExtractor;
///
/// # async fn example() -> eyre::Result<()> {
/// let params = DatabaseParams::new("tcrd.kmc.io", "tcrd540", "tcrd");
/// let extractor = PharosExtractor::new(
///     params,
///     vec!["drug_activity".to_string(), "target".to_string()],
///     "target_id",
/// );
/// let table = extractor.extract().await?;
/// # Ok(())
/// # }
/// ```
pub struct PharosExtractor {
    params: DatabaseParams,
    tables: Vec<String>,
    merge_on: String,
}

impl PharosExtractor {
    /// Create a new Pharos extractor
    ///
    /// # Arguments
    /// * `params` - MySQL connection parameters
    /// * `tables` - Tables to fetch, in join order
    /// * `merge_on` - Key column of the accumulated result
    pub fn new(params: DatabaseParams, tables: Vec<String>, merge_on: impl Into<String>) -> Self {
        Self {
            params,
            tables,
            merge_on: merge_on.into(),
        }
    }

    /// Fetch every table in full over one connection
    async fn fetch_tables(&self) -> Result<Vec<Table>> {
        let statements = self
            .tables
            .iter()
            .map(|t| select_all(t))
            .collect::<Result<Vec<_>>>()?;

        let mut conn = connect_mysql(&self.params).await?;
        let mut tables = Vec::with_capacity(statements.len());

        for (name, sql) in self.tables.iter().zip(&statements) {
            log::debug!("Fetching table {}", name);
            let table = fetch_mysql_table(&mut conn, sql)
                .await
                .with_context(|| format!("Failed to fetch table '{}'", name))?;
            log::info!("Fetched {} row(s) from {}", table.len(), name);
            tables.push(table);
        }

        conn.close()
            .await
            .with_context(|| format!("Failed to close connection to {}", self.params))?;

        Ok(tables)
    }
}

impl Extractor for PharosExtractor {
    async fn extract(&self) -> Result<Table> {
        if self.tables.is_empty() {
            eyre::bail!("No Pharos tables configured");
        }

        let tables = self.fetch_tables().await?;
        let merged = merge_on_id(tables, &self.merge_on)?;

        log::info!(
            "Merged {} table(s) on {} into {} row(s)",
            self.tables.len(),
            self.merge_on,
            merged.len()
        );

        Ok(merged)
    }
}

//! Extractor trait for pulling a record set out of a source

use crate::table::Table;
use eyre::Result;

/// Extractor trait for acquiring a [`Table`] from a source
///
/// Implementors define how rows are fetched from sources like:
/// - Relational databases (Pharos, ChEMBL)
/// - Delimited files (DrugCentral)
/// - Web services (UniProt)
///
/// # Example
/// ```no_run
/// use bioactivity_collector::etl::Extractor;
/// use bioactivity_collector::table::Table;
/// use eyre::Result;
///
/// struct StaticExtractor;
///
/// impl Extractor for StaticExtractor {
///     async fn extract(&self) -> Result<Table> {
///         Ok(Table::new(["drug", "uniprot"]))
///     }
/// }
/// ```
pub trait Extractor: Send + Sync {
    /// Extract one record set from the source
    ///
    /// # Errors
    /// Returns an error if extraction fails (network, database, I/O, parsing, etc.)
    fn extract(&self) -> impl std::future::Future<Output = Result<Table>> + Send;
}

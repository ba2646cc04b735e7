//! Loader trait for persisting record sets

use crate::table::Table;
use eyre::Result;

/// Loader trait for writing a [`Table`] to a destination
///
/// # Example
/// ```no_run
/// use bioactivity_collector::etl::Loader;
/// use bioactivity_collector::table::Table;
/// use eyre::Result;
///
/// struct CountingLoader;
///
/// impl Loader for CountingLoader {
///     async fn load(&self, table: Table) -> Result<usize> {
///         Ok(table.len())
///     }
/// }
/// ```
pub trait Loader: Send + Sync {
    /// Load the table to the destination
    ///
    /// Returns the number of rows written
    ///
    /// # Errors
    /// Returns an error if loading fails (I/O, serialization, etc.)
    fn load(&self, table: Table) -> impl std::future::Future<Output = Result<usize>> + Send;
}

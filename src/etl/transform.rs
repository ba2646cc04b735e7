//! Transformer trait for reshaping record sets

use crate::table::Table;
use eyre::Result;

/// Transformer trait for reshaping a [`Table`]
///
/// Implementors define one reshaping step:
/// - Null filtering
/// - Deduplication
/// - Column selection
///
/// # Example
/// ```
/// use bioactivity_collector::etl::Transformer;
/// use bioactivity_collector::table::Table;
/// use eyre::Result;
///
/// struct Truncate(usize);
///
/// impl Transformer for Truncate {
///     fn transform(&self, table: Table) -> Result<Table> {
///         let columns = table.columns().to_vec();
///         let rows = table.into_rows().into_iter().take(self.0).collect();
///         Table::from_rows(columns, rows)
///     }
/// }
///
/// let table = Table::from_rows(["n"], vec![vec![1.into()], vec![2.into()]]).unwrap();
/// assert_eq!(Truncate(1).transform(table).unwrap().len(), 1);
/// ```
pub trait Transformer: Send + Sync {
    /// Transform a table
    ///
    /// # Errors
    /// Returns an error if transformation fails (missing columns, etc.)
    fn transform(&self, table: Table) -> Result<Table>;

    /// Run `next` on the output of this transformer
    fn then<T: Transformer>(self, next: T) -> Chain<Self, T>
    where
        Self: Sized,
    {
        Chain {
            first: self,
            second: next,
        }
    }
}

/// Two transformers applied one after the other
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A: Transformer, B: Transformer> Transformer for Chain<A, B> {
    fn transform(&self, table: Table) -> Result<Table> {
        let table = self.first.transform(table)?;
        self.second.transform(table)
    }
}

/// Identity transformer that passes tables through unchanged
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityTransformer;

impl IdentityTransformer {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for IdentityTransformer {
    fn transform(&self, table: Table) -> Result<Table> {
        Ok(table)
    }
}

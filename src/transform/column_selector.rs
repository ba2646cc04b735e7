//! Column selector transformer
//!
//! Keeps a fixed subset of columns, in the requested order.

use crate::etl::Transformer;
use crate::table::Table;
use eyre::Result;

/// Transformer that keeps only the named columns
///
/// # Example
/// ```
/// use bioactivity_collector::etl::Transformer;
/// use bioactivity_collector::table::Table;
/// use bioactivity_collector::transform::ColumnSelector;
///
/// let selector = ColumnSelector::new(vec!["smiles", "uniprot"]);
/// let table = Table::from_rows(
///     ["name", "smiles", "uniprot"],
///     vec![vec!["ethanol".into(), "CCO".into(), "P12345".into()]],
/// )
/// .unwrap();
///
/// let output = selector.transform(table).unwrap();
/// assert_eq!(output.columns(), &["smiles", "uniprot"]);
/// ```
pub struct ColumnSelector {
    columns: Vec<String>,
}

impl ColumnSelector {
    pub fn new<S: Into<String>>(columns: Vec<S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }
}

impl Transformer for ColumnSelector {
    fn transform(&self, table: Table) -> Result<Table> {
        let names: Vec<&str> = self.columns.iter().map(String::as_str).collect();
        table.select(&names)
    }
}

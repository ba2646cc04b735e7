//! Positional column renaming

use crate::etl::Transformer;
use crate::table::Table;
use eyre::Result;

/// Transformer that replaces every column name by position
///
/// Query results carry whatever names the database produced
/// (`pref_name`, `canonical_smiles`, ...); this maps them onto a fixed
/// schema. The table must have exactly as many columns as names given.
pub struct ColumnRenamer {
    names: Vec<String>,
}

impl ColumnRenamer {
    pub fn new<S: Into<String>>(names: Vec<S>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl Transformer for ColumnRenamer {
    fn transform(&self, table: Table) -> Result<Table> {
        if table.columns().len() != self.names.len() {
            eyre::bail!(
                "Expected {} column(s) ({}), got {} ({})",
                self.names.len(),
                self.names.join(", "),
                table.columns().len(),
                table.columns().join(", ")
            );
        }
        Table::from_rows(self.names.clone(), table.into_rows())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rename_by_position() {
        let table = Table::from_rows(
            ["pref_name", "canonical_smiles", "accession"],
            vec![vec!["DrugB".into(), "CCN".into(), "P12345".into()]],
        )
        .unwrap();

        let renamed = ColumnRenamer::new(vec!["drug", "smiles", "uniprot"])
            .transform(table)
            .unwrap();
        assert_eq!(renamed.columns(), &["drug", "smiles", "uniprot"]);
        assert_eq!(renamed.len(), 1);
    }

    #[test]
    fn test_width_mismatch_fails() {
        let table = Table::new(["a", "b"]);
        assert!(ColumnRenamer::new(vec!["x"]).transform(table).is_err());
    }
}

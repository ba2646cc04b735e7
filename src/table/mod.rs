//! In-memory record sets
//!
//! A [`Table`] is an ordered list of named columns plus an ordered list of
//! rows, every row holding exactly one [`Value`] per column. It provides the
//! handful of relational operations the collection flows need: column
//! selection, null filtering, deduplication and inner joins.

mod merge;
mod value;

pub use merge::merge_on_id;
pub use value::Value;

use eyre::{Result, eyre};
use std::collections::{HashMap, HashSet};

/// Suffixes appended to colliding column names in a join (left, right)
pub const JOIN_SUFFIXES: (&str, &str) = ("_x", "_y");

/// An ordered, schema-checked record set
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create an empty table with the given column names
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Create a table from columns and rows, checking every row's width
    pub fn from_rows<S: Into<String>>(
        columns: impl IntoIterator<Item = S>,
        rows: Vec<Vec<Value>>,
    ) -> Result<Self> {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Append a row
    ///
    /// # Errors
    /// Returns an error if the row width differs from the column count
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            eyre::bail!(
                "Row has {} value(s) but the table has {} column(s)",
                row.len(),
                self.columns.len()
            );
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<Value>> {
        self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Position of a column by name, failing if it does not exist
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name).ok_or_else(|| {
            eyre!(
                "Column '{}' not found. Available columns: {}",
                name,
                self.columns.join(", ")
            )
        })
    }

    /// Get a cell by row index and column name
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// All values of one column, in row order
    pub fn column_values(&self, name: &str) -> Result<Vec<&Value>> {
        let idx = self.require_column(name)?;
        Ok(self.rows.iter().map(|r| &r[idx]).collect())
    }

    /// Keep only the named columns, in the given order
    pub fn select(&self, names: &[&str]) -> Result<Table> {
        let indexes = names
            .iter()
            .map(|name| self.require_column(name))
            .collect::<Result<Vec<_>>>()?;

        let rows = self
            .rows
            .iter()
            .map(|row| indexes.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Ok(Table {
            columns: names.iter().map(|s| s.to_string()).collect(),
            rows,
        })
    }

    /// Drop every row holding `Null` in any of the named columns
    pub fn drop_nulls(self, names: &[&str]) -> Result<Table> {
        let indexes = names
            .iter()
            .map(|name| self.require_column(name))
            .collect::<Result<Vec<_>>>()?;

        let rows = self
            .rows
            .into_iter()
            .filter(|row| indexes.iter().all(|&i| !row[i].is_null()))
            .collect();

        Ok(Table {
            columns: self.columns,
            rows,
        })
    }

    /// Remove exact duplicate rows, keeping the first occurrence
    pub fn drop_duplicates(self) -> Table {
        let mut seen = HashSet::new();
        let rows = self
            .rows
            .into_iter()
            .filter(|row| seen.insert(row.clone()))
            .collect();

        Table {
            columns: self.columns,
            rows,
        }
    }

    /// Inner join `self` with `right` on `self.left_on == right.right_on`.
    ///
    /// Output columns are all left columns followed by all right columns.
    /// Names present on both sides are disambiguated with [`JOIN_SUFFIXES`].
    /// Rows come out in left order; several matches for one left row keep
    /// the right table's order. `Null` keys never match.
    ///
    /// # Errors
    /// Returns an error if either key column is missing
    pub fn inner_join(&self, right: &Table, left_on: &str, right_on: &str) -> Result<Table> {
        let left_key = self
            .require_column(left_on)
            .map_err(|e| e.wrap_err("Left side of join is missing its key column"))?;
        let right_key = right
            .require_column(right_on)
            .map_err(|e| e.wrap_err("Right side of join is missing its key column"))?;

        let mut lookup: HashMap<&Value, Vec<usize>> = HashMap::new();
        for (i, row) in right.rows.iter().enumerate() {
            let key = &row[right_key];
            if !key.is_null() {
                lookup.entry(key).or_default().push(i);
            }
        }

        let mut rows = Vec::new();
        for left_row in &self.rows {
            let key = &left_row[left_key];
            if key.is_null() {
                continue;
            }
            if let Some(matches) = lookup.get(key) {
                for &i in matches {
                    let mut row = Vec::with_capacity(self.columns.len() + right.columns.len());
                    row.extend(left_row.iter().cloned());
                    row.extend(right.rows[i].iter().cloned());
                    rows.push(row);
                }
            }
        }

        Ok(Table {
            columns: joined_columns(&self.columns, &right.columns),
            rows,
        })
    }
}

/// Combine two column lists, suffixing names that appear on both sides.
fn joined_columns(left: &[String], right: &[String]) -> Vec<String> {
    let left_set: HashSet<&str> = left.iter().map(String::as_str).collect();
    let right_set: HashSet<&str> = right.iter().map(String::as_str).collect();

    let mut taken: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(left.len() + right.len());

    let mut emit = |name: &str, collides: bool, suffix: &str| {
        let mut candidate = name.to_string();
        if collides {
            candidate.push_str(suffix);
            while taken.contains(&candidate)
                || left_set.contains(candidate.as_str())
                || right_set.contains(candidate.as_str())
            {
                candidate.push_str(suffix);
            }
        }
        taken.insert(candidate.clone());
        out.push(candidate);
    };

    for name in left {
        emit(name, right_set.contains(name.as_str()), JOIN_SUFFIXES.0);
    }
    for name in right {
        emit(name, left_set.contains(name.as_str()), JOIN_SUFFIXES.1);
    }

    out
}

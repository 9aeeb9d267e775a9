use std::{io::Read, path::Path};

use crate::{
    error::{SchemaError, WriteError},
    persist::{self, OverwritePolicy},
};

/// In-memory CSV table: named columns and rows of string cells.
///
/// Every row has one cell per column. Operations that filter or rewrite a
/// table build a new one and leave the original untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        debug_assert!(
            rows.iter().all(|row| row.len() == columns.len()),
            "every row must have one cell per column"
        );
        Self { columns, rows }
    }

    /// Parse a CSV document whose first record is the header.
    pub fn from_csv_reader<R: Read>(reader: R) -> csv::Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);
        let columns = rdr.headers()?.iter().map(str::to_owned).collect();
        let rows = rdr
            .records()
            .map(|record| record.map(|record| record.iter().map(str::to_owned).collect()))
            .collect::<csv::Result<Vec<Vec<String>>>>()?;
        Ok(Self { columns, rows })
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn require_column(&self, name: &str) -> Result<usize, SchemaError> {
        self.column_index(name)
            .ok_or_else(|| SchemaError::MissingColumn {
                column: name.to_owned(),
            })
    }

    /// Cells of column `name`, in row order.
    pub fn column(&self, name: &str) -> Result<impl Iterator<Item = &str>, SchemaError> {
        let idx = self.require_column(name)?;
        Ok(self.rows.iter().map(move |row| row[idx].as_str()))
    }

    /// A table with the same columns holding `rows`.
    #[must_use]
    pub fn with_rows(&self, rows: Vec<Vec<String>>) -> Self {
        Self::new(self.columns.clone(), rows)
    }

    /// Write the table with its header row and without an index column.
    pub fn write_csv(&self, path: &Path, policy: OverwritePolicy) -> Result<(), WriteError> {
        persist::write_csv_atomic(path, policy, |wtr| {
            wtr.write_record(&self.columns)?;
            for row in &self.rows {
                wtr.write_record(row)?;
            }
            Ok(())
        })
    }
}

//! Column-oriented tabular frames.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::{Cell, Dtype};
use crate::error::FrameError;

/// A named column of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    cells: Vec<Cell>,
}

impl Column {
    /// Creates a new column.
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// The column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The column's cells in row order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The first non-null cell, if any.
    pub fn first_non_null(&self) -> Option<&Cell> {
        self.cells.iter().find(|c| !c.is_null())
    }

    /// Aggregate element kind of the column.
    pub fn dtype(&self) -> Dtype {
        Dtype::of(&self.cells)
    }
}

/// A tabular frame: ordered named columns of equal length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    columns: Vec<Column>,
}

impl Frame {
    /// Creates an empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a frame from row mappings.
    ///
    /// Column order follows first appearance across the rows; rows missing a
    /// key contribute a null cell for that column.
    pub fn from_rows(rows: &[BTreeMap<String, Cell>]) -> Self {
        let mut names: Vec<&str> = Vec::new();
        for row in rows {
            for key in row.keys() {
                if !names.contains(&key.as_str()) {
                    names.push(key);
                }
            }
        }

        let columns = names
            .into_iter()
            .map(|name| {
                let cells = rows
                    .iter()
                    .map(|row| row.get(name).cloned().unwrap_or(Cell::Null))
                    .collect();
                Column::new(name, cells)
            })
            .collect();

        Self { columns }
    }

    /// Appends a new column.
    ///
    /// # Errors
    /// Returns `DuplicateColumn` if the name is taken, `LengthMismatch` if
    /// the cell count differs from the existing row count.
    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        cells: Vec<Cell>,
    ) -> Result<(), FrameError> {
        let name = name.into();
        if self.column(&name).is_some() {
            return Err(FrameError::DuplicateColumn(name));
        }
        self.check_length(&name, cells.len())?;
        self.columns.push(Column::new(name, cells));
        Ok(())
    }

    /// Replaces a column's cells, appending the column if it does not exist.
    pub fn set_column(
        &mut self,
        name: impl Into<String>,
        cells: Vec<Cell>,
    ) -> Result<(), FrameError> {
        let name = name.into();
        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(column) => {
                if cells.len() != column.cells.len() {
                    return Err(FrameError::LengthMismatch {
                        name,
                        expected: column.cells.len(),
                        actual: cells.len(),
                    });
                }
                column.cells = cells;
                Ok(())
            }
            None => {
                self.check_length(&name, cells.len())?;
                self.columns.push(Column::new(name, cells));
                Ok(())
            }
        }
    }

    fn check_length(&self, name: &str, len: usize) -> Result<(), FrameError> {
        match self.columns.first() {
            Some(first) if first.len() != len => Err(FrameError::LengthMismatch {
                name: name.to_string(),
                expected: first.len(),
                actual: len,
            }),
            _ => Ok(()),
        }
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// All columns in insertion order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// True when the frame holds no rows.
    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// Materializes the row at `idx` as a name-to-cell mapping.
    pub fn row(&self, idx: usize) -> Option<BTreeMap<String, Cell>> {
        if idx >= self.num_rows() {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|c| (c.name.clone(), c.cells[idx].clone()))
                .collect(),
        )
    }

    /// Iterates rows in order, each materialized as a mapping.
    pub fn rows(&self) -> impl Iterator<Item = BTreeMap<String, Cell>> + '_ {
        (0..self.num_rows()).filter_map(|idx| self.row(idx))
    }
}

//! Cell values and aggregate column dtypes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single data element: the cell of a frame column, the element of a
/// sequence, or the value of a mapping entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Missing value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// String value.
    Str(String),
    /// Nested list of cells.
    List(Vec<Cell>),
    /// Nested string-keyed mapping of cells.
    Map(BTreeMap<String, Cell>),
}

impl Cell {
    /// Returns true for [`Cell::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Short name of the cell's kind, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Cell::Null => "null",
            Cell::Bool(_) => "bool",
            Cell::Int(_) => "int",
            Cell::Float(_) => "float",
            Cell::Str(_) => "str",
            Cell::List(_) => "list",
            Cell::Map(_) => "dict",
        }
    }

    /// Numeric view of the cell, if it holds an int or a float.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(i) => Some(*i as f64),
            Cell::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// The dtype a column of this single cell would have.
    fn dtype(&self) -> Dtype {
        match self {
            Cell::Null => Dtype::Empty,
            Cell::Bool(_) => Dtype::Bool,
            Cell::Int(_) => Dtype::Int,
            Cell::Float(_) => Dtype::Float,
            Cell::Str(_) => Dtype::Str,
            Cell::List(_) => Dtype::List,
            Cell::Map(_) => Dtype::Map,
        }
    }
}

impl From<bool> for Cell {
    fn from(v: bool) -> Self {
        Cell::Bool(v)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Int(v)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Float(v)
    }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self {
        Cell::Str(v.to_string())
    }
}

impl From<String> for Cell {
    fn from(v: String) -> Self {
        Cell::Str(v)
    }
}

/// Aggregate element kind of a column.
///
/// A column's dtype is the kind shared by all of its non-null cells.
/// Columns mixing kinds are [`Dtype::Mixed`]; columns with no non-null cell
/// are [`Dtype::Empty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dtype {
    Int,
    Float,
    Bool,
    Str,
    List,
    Map,
    Mixed,
    Empty,
}

impl Dtype {
    /// Computes the aggregate dtype of a slice of cells.
    pub fn of(cells: &[Cell]) -> Dtype {
        let mut dtype = Dtype::Empty;
        for cell in cells {
            if cell.is_null() {
                continue;
            }
            let kind = cell.dtype();
            if dtype == Dtype::Empty {
                dtype = kind;
            } else if dtype != kind {
                return Dtype::Mixed;
            }
        }
        dtype
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dtype::Int => "int",
            Dtype::Float => "float",
            Dtype::Bool => "bool",
            Dtype::Str => "str",
            Dtype::List => "list",
            Dtype::Map => "dict",
            Dtype::Mixed => "mixed",
            Dtype::Empty => "empty",
        };
        write!(f, "{}", name)
    }
}

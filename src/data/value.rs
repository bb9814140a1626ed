//! The tagged value type exchanged between pipeline components.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::{Cell, Frame};

/// A realized data value produced or consumed by a pipeline component.
///
/// The closed set of variants replaces runtime shape probing: schema
/// inference and validation match on the variant instead of asking "is this
/// a mapping, is this a sequence".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Tabular data.
    Frame(Frame),
    /// A non-tabular string-keyed mapping.
    Mapping(BTreeMap<String, Cell>),
    /// An ordered sequence.
    Sequence(Vec<Cell>),
    /// A single scalar cell.
    Scalar(Cell),
}

impl Value {
    /// True for [`Value::Frame`].
    pub fn is_tabular(&self) -> bool {
        matches!(self, Value::Frame(_))
    }

    /// Borrows the frame when the value is tabular.
    pub fn as_frame(&self) -> Option<&Frame> {
        match self {
            Value::Frame(frame) => Some(frame),
            _ => None,
        }
    }

    /// Short name of the value's kind, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Frame(_) => "dataframe",
            Value::Mapping(_) => "dict",
            Value::Sequence(_) => "list",
            Value::Scalar(cell) => cell.type_name(),
        }
    }
}

impl From<Frame> for Value {
    fn from(frame: Frame) -> Self {
        Value::Frame(frame)
    }
}

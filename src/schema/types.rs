//! Schema document structure and YAML persistence.
//!
//! The on-disk form is a top-level mapping from subject name to a shape
//! descriptor, e.g.:
//!
//! ```yaml
//! CsvDataloader:
//!   type: dataframe
//!   columns:
//!     name: str
//!     score: int
//!     tags:
//!       type: list
//!       items: str
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Primitive type tag for columns and nested elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Primitive {
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "float")]
    Float,
    #[serde(rename = "str")]
    Str,
    #[serde(rename = "bool")]
    Bool,
    /// Matches any element; emitted when inference has no representative.
    #[serde(rename = "Any")]
    Any,
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Primitive::Int => "int",
            Primitive::Float => "float",
            Primitive::Str => "str",
            Primitive::Bool => "bool",
            Primitive::Any => "Any",
        };
        write!(f, "{}", name)
    }
}

/// Nested column descriptor: a list of primitives or a dict of primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NestedType {
    #[serde(rename = "list")]
    List { items: Primitive },
    #[serde(rename = "dict")]
    Dict { values: Primitive },
}

/// Declared type of a dataframe column: a bare primitive tag or a nested
/// descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnType {
    Primitive(Primitive),
    Nested(NestedType),
}

/// Shape descriptor for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Shape {
    /// Tabular data with declared column types.
    #[serde(rename = "dataframe")]
    Dataframe {
        columns: BTreeMap<String, ColumnType>,
    },
    /// A non-tabular mapping with per-key value types.
    #[serde(rename = "dict")]
    Dict { values: BTreeMap<String, Primitive> },
    /// An ordered sequence with one element type.
    #[serde(rename = "list")]
    List { items: Primitive },
    /// Scalar shapes carry only their primitive tag.
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "float")]
    Float,
    #[serde(rename = "str")]
    Str,
    #[serde(rename = "bool")]
    Bool,
}

impl Shape {
    /// The descriptor's type tag as written in the document.
    pub fn type_name(&self) -> &'static str {
        match self {
            Shape::Dataframe { .. } => "dataframe",
            Shape::Dict { .. } => "dict",
            Shape::List { .. } => "list",
            Shape::Int => "int",
            Shape::Float => "float",
            Shape::Str => "str",
            Shape::Bool => "bool",
        }
    }
}

/// A schema document: subject name mapped to shape descriptor.
///
/// Subjects serialize sorted by name, keeping the persisted file
/// deterministic and diffable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaDoc(BTreeMap<String, Shape>);

impl SchemaDoc {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document holding a single subject.
    pub fn single(subject: impl Into<String>, shape: Shape) -> Self {
        let mut doc = Self::new();
        doc.insert(subject, shape);
        doc
    }

    /// Inserts or replaces a subject's shape.
    pub fn insert(&mut self, subject: impl Into<String>, shape: Shape) {
        self.0.insert(subject.into(), shape);
    }

    /// Looks up a subject's shape.
    pub fn get(&self, subject: &str) -> Option<&Shape> {
        self.0.get(subject)
    }

    /// Subject names in sorted order.
    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of subjects.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the document has no subjects.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reads a document from a YAML file.
    ///
    /// # Errors
    /// Returns [`SchemaError::Definition`] when the document does not parse:
    /// an unparseable schema, including an unsupported nested descriptor
    /// kind, is a configuration bug, not a data-level violation.
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let contents = fs::read_to_string(path)?;
        serde_yaml::from_str(&contents)
            .map_err(|e| SchemaError::Definition(format!("{}: {}", path.display(), e)))
    }

    /// Writes the document to a YAML file, creating parent directories as
    /// needed.
    pub fn save(&self, path: &Path) -> Result<(), SchemaError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_yaml::to_string(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}

//! Error types for tabflow operations.
//!
//! Defines error types for the major subsystems:
//! - Component identifier resolution
//! - Component instantiation and execution
//! - Schema inference, persistence, and validation
//! - Frame construction
//!
//! Pipeline-level errors (`ConfigError`, `AssemblyError`, `RunError`) live
//! next to the code that produces them in `crate::pipeline`.

use thiserror::Error;

/// Errors that can occur while resolving a dotted component identifier.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("Invalid component identifier '{0}': expected '<container>.<Name>'")]
    InvalidIdentifier(String),

    #[error("Component container '{0}' is not registered")]
    ContainerNotFound(String),

    #[error("Component '{name}' not found in container '{container}'")]
    ComponentNotFound { container: String, name: String },

    #[error("Component '{0}' is already registered")]
    DuplicateComponent(String),
}

/// Errors raised by component implementations.
#[derive(Debug, Error)]
pub enum ComponentError {
    #[error("Missing required parameter '{0}'")]
    MissingParameter(String),

    #[error("Invalid value for parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    #[error("Data not loaded. Call load(split) first")]
    DataNotLoaded,

    #[error("Component failure: {0}")]
    Failed(String),

    #[error("Frame error: {0}")]
    Frame(#[from] FrameError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while building or mutating a frame.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("Column '{name}' has length {actual}, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Duplicate column '{0}'")]
    DuplicateColumn(String),
}

/// Errors raised by schema inference, persistence, and validation.
///
/// Violations found while checking data against a schema are not errors;
/// they are collected in a [`crate::schema::ValidationReport`]. The variants
/// here are fatal for the inference/validation call itself.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema document is malformed. A config-level bug, not a data issue.
    #[error("Malformed schema document: {0}")]
    Definition(String),

    #[error("Subject '{0}' not found in schema document")]
    UnknownSubject(String),

    /// The sample value has no structural schema representation.
    #[error("Cannot infer a schema for {0} data")]
    UnsupportedShape(String),

    /// Tabular data was validated against a non-dataframe schema.
    #[error("Schema type '{0}' not supported for dataframe validation")]
    UnsupportedValidation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

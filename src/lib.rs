//! tabflow: schema-validated pipeline orchestrator for tabular workflows.
//!
//! A YAML configuration names a dataloader, an ordered set of preprocessors,
//! a model, and an evaluator; this library resolves them through a component
//! registry, wires them into a pipeline, and runs
//! train/predict/evaluate while validating intermediate data against
//! declared structural schemas.

// Core modules
pub mod cli;
pub mod components;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod registry;
pub mod schema;

// Re-export commonly used error types
pub use error::{ComponentError, FrameError, ResolutionError, SchemaError};

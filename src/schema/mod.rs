//! Structural schemas for pipeline checkpoints.
//!
//! A schema is inferred from exactly one sample value produced by a
//! dataloader (a single-sample structural guess, not a union over a
//! dataset), persisted as a human-editable YAML document, and later used to
//! check every row of real tabular data at the checkpoints a workflow
//! configuration declares.

mod infer;
mod types;
mod validate;

pub use infer::infer;
pub use types::{ColumnType, NestedType, Primitive, SchemaDoc, Shape};
pub use validate::{validate, ValidationReport, Violation};

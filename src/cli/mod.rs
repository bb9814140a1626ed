//! Command-line interface for tabflow.
//!
//! Provides schema generation and pipeline execution over a workflow
//! configuration file.

mod commands;

pub use commands::{parse_cli, run_with_cli, Cli};

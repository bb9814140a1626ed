//! Capability contracts for pipeline components.
//!
//! Each of the four roles a workflow configuration names (dataloader,
//! preprocessor, model, evaluator) is a trait here. Implementations are
//! constructed by factory functions registered in
//! [`crate::registry::Registry`] and receive their declared parameters as a
//! free-form [`Params`] mapping.

pub mod builtin;
mod dataloader;
mod evaluator;
mod model;
mod preprocessor;

pub use dataloader::{Dataloader, DataloaderCore, SharedDataloader};
pub use evaluator::{EvalResult, Evaluator};
pub use model::Model;
pub use preprocessor::{Preprocessor, PreprocessorSlot};

use std::collections::HashMap;

use crate::error::ComponentError;

/// Free-form component parameters, as declared in the configuration.
pub type Params = HashMap<String, serde_yaml::Value>;

/// Fetches a required string parameter.
pub fn require_str(params: &Params, key: &str) -> Result<String, ComponentError> {
    match params.get(key) {
        None => Err(ComponentError::MissingParameter(key.to_string())),
        Some(value) => value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ComponentError::InvalidParameter {
                name: key.to_string(),
                message: "expected a string".to_string(),
            }),
    }
}

/// Fetches an optional string parameter.
pub fn optional_str(params: &Params, key: &str) -> Result<Option<String>, ComponentError> {
    match params.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| ComponentError::InvalidParameter {
                name: key.to_string(),
                message: "expected a string".to_string(),
            }),
    }
}

/// Fetches an optional unsigned integer parameter.
pub fn optional_usize(params: &Params, key: &str) -> Result<Option<usize>, ComponentError> {
    match params.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_u64()
            .map(|n| Some(n as usize))
            .ok_or_else(|| ComponentError::InvalidParameter {
                name: key.to_string(),
                message: "expected a non-negative integer".to_string(),
            }),
    }
}

/// Fetches an optional boolean parameter.
pub fn optional_bool(params: &Params, key: &str) -> Result<Option<bool>, ComponentError> {
    match params.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_bool()
            .map(Some)
            .ok_or_else(|| ComponentError::InvalidParameter {
                name: key.to_string(),
                message: "expected a boolean".to_string(),
            }),
    }
}

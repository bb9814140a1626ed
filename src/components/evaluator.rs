//! Evaluator contract.

use crate::data::Value;
use crate::error::ComponentError;

/// An evaluation result: metric name to JSON value.
pub type EvalResult = serde_json::Map<String, serde_json::Value>;

/// Scores the predictions written into it after the model ran.
pub trait Evaluator {
    /// Stores the predictions produced by the model.
    fn set_predictions(&mut self, predictions: Value);

    /// Computes the evaluation result mapping.
    fn evaluate(&self) -> Result<EvalResult, ComponentError>;
}

//! Model contract.
//!
//! A model is a black box behind two methods. Loading data for the
//! configured split is the runner's responsibility (see
//! [`crate::pipeline::ReloadPolicy`]), so implementations read whatever the
//! shared dataloader's buffer currently holds.

use crate::data::Value;
use crate::error::ComponentError;

/// Trains on and predicts from the shared dataloader's buffer.
pub trait Model {
    /// Fits the model to the currently loaded data.
    fn fit(&mut self) -> Result<(), ComponentError>;

    /// Produces predictions from the currently loaded data.
    fn infer(&self) -> Result<Value, ComponentError>;
}

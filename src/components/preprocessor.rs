//! Preprocessor contract and output-recording slots.

use crate::data::Value;
use crate::error::ComponentError;

/// A preprocessing step applied to loaded data.
pub trait Preprocessor {
    /// Transforms the data, returning the processed value.
    fn process(&self, data: Value) -> Result<Value, ComponentError>;
}

/// A preprocessor plus its last produced output.
///
/// The dataloader owns its preprocessors through slots; the runner reads the
/// recorded outputs when validating preprocessor checkpoints. Before the
/// first load the output is empty and the checkpoint is skipped.
pub struct PreprocessorSlot {
    name: String,
    inner: Box<dyn Preprocessor>,
    output: Option<Value>,
}

impl PreprocessorSlot {
    /// Wraps a preprocessor under its component name.
    pub fn new(name: impl Into<String>, inner: Box<dyn Preprocessor>) -> Self {
        Self {
            name: name.into(),
            inner,
            output: None,
        }
    }

    /// The component name, used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the preprocessor and records its output.
    pub fn run(&mut self, data: Value) -> Result<Value, ComponentError> {
        let output = self.inner.process(data)?;
        self.output = Some(output.clone());
        Ok(output)
    }

    /// The output of the most recent [`run`](Self::run), if any.
    pub fn output(&self) -> Option<&Value> {
        self.output.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Cell;

    struct Doubler;

    impl Preprocessor for Doubler {
        fn process(&self, data: Value) -> Result<Value, ComponentError> {
            match data {
                Value::Sequence(cells) => Ok(Value::Sequence(
                    cells
                        .into_iter()
                        .map(|c| match c {
                            Cell::Int(i) => Cell::Int(i * 2),
                            other => other,
                        })
                        .collect(),
                )),
                other => Ok(other),
            }
        }
    }

    #[test]
    fn test_slot_records_output() {
        let mut slot = PreprocessorSlot::new("Doubler", Box::new(Doubler));
        assert!(slot.output().is_none());

        let out = slot
            .run(Value::Sequence(vec![Cell::Int(1), Cell::Int(2)]))
            .unwrap();
        assert_eq!(out, Value::Sequence(vec![Cell::Int(2), Cell::Int(4)]));
        assert_eq!(slot.output(), Some(&out));
        assert_eq!(slot.name(), "Doubler");
    }
}

//! Dataloader contract and shared buffer state.

use std::cell::RefCell;
use std::rc::Rc;

use crate::components::{Params, PreprocessorSlot};
use crate::data::{Cell, Value};
use crate::error::ComponentError;

/// A dataloader handle shared between the model and the evaluator.
///
/// The pipeline is single-threaded by design; any call to `load` overwrites
/// the internal buffer observably for every holder of the handle. Concurrent
/// pipeline runs must each use their own dataloader.
pub type SharedDataloader = Rc<RefCell<Box<dyn Dataloader>>>;

/// State every dataloader carries: the injected preprocessor slots and the
/// loaded data buffer.
#[derive(Default)]
pub struct DataloaderCore {
    preprocessors: Vec<PreprocessorSlot>,
    data: Option<Value>,
}

impl DataloaderCore {
    /// Creates the core around the injected preprocessor sequence.
    pub fn new(preprocessors: Vec<PreprocessorSlot>) -> Self {
        Self {
            preprocessors,
            data: None,
        }
    }

    /// The loaded data buffer, if a load has happened.
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// The preprocessor slots in declared order.
    pub fn preprocessors(&self) -> &[PreprocessorSlot] {
        &self.preprocessors
    }

    /// Folds raw data through the preprocessors in order, recording each
    /// slot's output.
    pub fn run_preprocessors(&mut self, raw: Value) -> Result<Value, ComponentError> {
        let mut current = raw;
        for slot in &mut self.preprocessors {
            current = slot.run(current)?;
        }
        Ok(current)
    }

    /// Stores the processed value in the buffer.
    pub fn store(&mut self, value: Value) {
        self.data = Some(value);
    }
}

/// Loads data for a split and exposes the loaded buffer.
pub trait Dataloader {
    /// Borrows the shared dataloader state.
    fn core(&self) -> &DataloaderCore;

    /// Mutably borrows the shared dataloader state.
    fn core_mut(&mut self) -> &mut DataloaderCore;

    /// Loads the raw data for a split, before preprocessing.
    fn load_raw(&mut self, split: &str) -> Result<Value, ComponentError>;

    /// Optional setup hook invoked with the deferred `dataloader_args`
    /// before training.
    fn setup(&mut self, params: &Params) -> Result<(), ComponentError> {
        let _ = params;
        Ok(())
    }

    /// Zero-argument sample accessor used for schema generation and the
    /// pre-run checkpoint. Returns `None` when the loader has no cheap way
    /// to produce a sample.
    fn fetch(&self) -> Result<Option<Value>, ComponentError> {
        Ok(None)
    }

    /// Loads a split: raw load, preprocessor fold, buffer store.
    fn load(&mut self, split: &str) -> Result<(), ComponentError> {
        let raw = self.load_raw(split)?;
        let processed = self.core_mut().run_preprocessors(raw)?;
        self.core_mut().store(processed);
        Ok(())
    }

    /// The loaded data buffer.
    fn data(&self) -> Option<&Value> {
        self.core().data()
    }

    /// The owned preprocessor slots.
    fn preprocessors(&self) -> &[PreprocessorSlot] {
        self.core().preprocessors()
    }

    /// Iterates the loaded buffer: frame rows materialize as mappings,
    /// sequences yield their elements, mappings yield their keys.
    ///
    /// # Errors
    /// `DataNotLoaded` before the first load; `Failed` for scalar buffers.
    fn iterate(&self) -> Result<Vec<Cell>, ComponentError> {
        let data = self.core().data().ok_or(ComponentError::DataNotLoaded)?;
        elements_of(data)
    }

    /// Iterates the loaded buffer in chunks of `size` elements.
    fn batch_iterate(&self, size: usize) -> Result<Vec<Vec<Cell>>, ComponentError> {
        if size == 0 {
            return Err(ComponentError::InvalidParameter {
                name: "batch_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        let elements = self.iterate()?;
        Ok(elements.chunks(size).map(<[Cell]>::to_vec).collect())
    }
}

fn elements_of(data: &Value) -> Result<Vec<Cell>, ComponentError> {
    match data {
        Value::Frame(frame) => Ok(frame.rows().map(Cell::Map).collect()),
        Value::Sequence(cells) => Ok(cells.clone()),
        Value::Mapping(map) => Ok(map.keys().map(|k| Cell::from(k.as_str())).collect()),
        Value::Scalar(cell) => Err(ComponentError::Failed(format!(
            "{} data is not iterable",
            cell.type_name()
        ))),
    }
}

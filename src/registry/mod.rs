//! Component registry for dotted-identifier resolution.
//!
//! A configuration names each component by a dotted identifier such as
//! `builtin.models.GradeCountModel`: everything before the last separator is
//! the container path, the last segment is the component name. The registry
//! maps, per capability role, container paths to named factory functions, so
//! resolution is an explicit table lookup instead of runtime code loading.

use std::collections::HashMap;

use crate::components::builtin;
use crate::components::{
    Dataloader, Evaluator, Model, Params, Preprocessor, PreprocessorSlot, SharedDataloader,
};
use crate::error::{ComponentError, ResolutionError};

/// Constructs a dataloader from its params and the injected preprocessors.
pub type DataloaderFactory =
    fn(&Params, Vec<PreprocessorSlot>) -> Result<Box<dyn Dataloader>, ComponentError>;

/// Constructs a preprocessor from its params.
pub type PreprocessorFactory = fn(&Params) -> Result<Box<dyn Preprocessor>, ComponentError>;

/// Constructs a model from its params, the shared dataloader, and the split.
pub type ModelFactory =
    fn(&Params, SharedDataloader, &str) -> Result<Box<dyn Model>, ComponentError>;

/// Constructs an evaluator from its params and the shared dataloader.
pub type EvaluatorFactory =
    fn(&Params, SharedDataloader) -> Result<Box<dyn Evaluator>, ComponentError>;

type Table<F> = HashMap<String, HashMap<String, F>>;

/// The final segment of a dotted identifier.
pub fn component_name(id: &str) -> &str {
    id.rsplit_once('.').map_or(id, |(_, name)| name)
}

fn split_id(id: &str) -> Result<(&str, &str), ResolutionError> {
    match id.rsplit_once('.') {
        Some((container, name)) if !container.is_empty() && !name.is_empty() => {
            Ok((container, name))
        }
        _ => Err(ResolutionError::InvalidIdentifier(id.to_string())),
    }
}

fn register_in<F>(table: &mut Table<F>, id: &str, factory: F) -> Result<(), ResolutionError> {
    let (container, name) = split_id(id)?;
    let entries = table.entry(container.to_string()).or_default();
    if entries.contains_key(name) {
        return Err(ResolutionError::DuplicateComponent(id.to_string()));
    }
    entries.insert(name.to_string(), factory);
    Ok(())
}

fn resolve_in<F: Copy>(table: &Table<F>, id: &str) -> Result<F, ResolutionError> {
    let (container, name) = split_id(id)?;
    let entries = table
        .get(container)
        .ok_or_else(|| ResolutionError::ContainerNotFound(container.to_string()))?;
    entries
        .get(name)
        .copied()
        .ok_or_else(|| ResolutionError::ComponentNotFound {
            container: container.to_string(),
            name: name.to_string(),
        })
}

/// Role-keyed store of component factories.
#[derive(Default)]
pub struct Registry {
    dataloaders: Table<DataloaderFactory>,
    preprocessors: Table<PreprocessorFactory>,
    models: Table<ModelFactory>,
    evaluators: Table<EvaluatorFactory>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry pre-populated with the shipped components.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        // Registration of the fixed builtin set cannot collide.
        let result: Result<(), ResolutionError> = (|| {
            registry.register_dataloader(
                "builtin.dataloaders.CsvDataloader",
                builtin::make_csv_dataloader,
            )?;

            registry.register_preprocessor(
                "builtin.preprocessors.ScoreToLetterPreprocessor",
                builtin::make_score_to_letter,
            )?;
            registry.register_preprocessor(
                "builtin.preprocessors.DoubleScorePreprocessor",
                builtin::make_double_score,
            )?;
            registry.register_preprocessor(
                "builtin.preprocessors.UppercaseNamePreprocessor",
                builtin::make_uppercase_name,
            )?;

            registry.register_model(
                "builtin.models.GradeCountModel",
                builtin::make_grade_count_model,
            )?;
            registry.register_model(
                "builtin.models.SumScoreModel",
                builtin::make_sum_score_model,
            )?;
            registry.register_model(
                "builtin.models.MeanScoreModel",
                builtin::make_mean_score_model,
            )?;
            registry.register_model(
                "builtin.models.RowCountModel",
                builtin::make_row_count_model,
            )?;

            registry.register_evaluator(
                "builtin.evaluators.PrintEvaluator",
                builtin::make_print_evaluator,
            )?;
            registry.register_evaluator(
                "builtin.evaluators.ScoreThresholdEvaluator",
                builtin::make_score_threshold_evaluator,
            )?;
            Ok(())
        })();
        debug_assert!(result.is_ok());
        registry
    }

    /// Registers a dataloader factory under a dotted identifier.
    pub fn register_dataloader(
        &mut self,
        id: &str,
        factory: DataloaderFactory,
    ) -> Result<(), ResolutionError> {
        register_in(&mut self.dataloaders, id, factory)
    }

    /// Registers a preprocessor factory under a dotted identifier.
    pub fn register_preprocessor(
        &mut self,
        id: &str,
        factory: PreprocessorFactory,
    ) -> Result<(), ResolutionError> {
        register_in(&mut self.preprocessors, id, factory)
    }

    /// Registers a model factory under a dotted identifier.
    pub fn register_model(
        &mut self,
        id: &str,
        factory: ModelFactory,
    ) -> Result<(), ResolutionError> {
        register_in(&mut self.models, id, factory)
    }

    /// Registers an evaluator factory under a dotted identifier.
    pub fn register_evaluator(
        &mut self,
        id: &str,
        factory: EvaluatorFactory,
    ) -> Result<(), ResolutionError> {
        register_in(&mut self.evaluators, id, factory)
    }

    /// Resolves a dataloader factory.
    pub fn resolve_dataloader(&self, id: &str) -> Result<DataloaderFactory, ResolutionError> {
        resolve_in(&self.dataloaders, id)
    }

    /// Resolves a preprocessor factory.
    pub fn resolve_preprocessor(&self, id: &str) -> Result<PreprocessorFactory, ResolutionError> {
        resolve_in(&self.preprocessors, id)
    }

    /// Resolves a model factory.
    pub fn resolve_model(&self, id: &str) -> Result<ModelFactory, ResolutionError> {
        resolve_in(&self.models, id)
    }

    /// Resolves an evaluator factory.
    pub fn resolve_evaluator(&self, id: &str) -> Result<EvaluatorFactory, ResolutionError> {
        resolve_in(&self.evaluators, id)
    }
}

//! Pipeline assembly from a workflow configuration.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use thiserror::Error;
use tracing::debug;

use crate::components::{Evaluator, Model, Params, PreprocessorSlot, SharedDataloader};
use crate::error::{ComponentError, ResolutionError};
use crate::pipeline::config::WorkflowConfig;
use crate::registry::{component_name, Registry};

/// The role a failing component was being assembled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineRole {
    Dataloader,
    Preprocessor,
    Model,
    Evaluator,
}

impl fmt::Display for PipelineRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineRole::Dataloader => "dataloader",
            PipelineRole::Preprocessor => "preprocessor",
            PipelineRole::Model => "model",
            PipelineRole::Evaluator => "evaluator",
        };
        write!(f, "{}", name)
    }
}

/// Errors that abort pipeline assembly.
///
/// Either variant names the failing role and the dotted identifier; no
/// partial pipeline is returned.
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("Failed to resolve {role} '{id}': {source}")]
    Resolution {
        role: PipelineRole,
        id: String,
        source: ResolutionError,
    },

    #[error("Failed to instantiate {role} '{id}': {source}")]
    Instantiation {
        role: PipelineRole,
        id: String,
        source: ComponentError,
    },
}

/// A fully assembled pipeline, ready for one run.
///
/// The dataloader handle is shared with the model and available to the
/// evaluator through it; the preprocessor slots live inside the dataloader.
pub struct AssembledPipeline {
    /// Shared dataloader handle.
    pub dataloader: SharedDataloader,
    /// The model instance.
    pub model: Box<dyn Model>,
    /// The evaluator instance; predictions are written in after prediction.
    pub evaluator: Box<dyn Evaluator>,
    /// Split the runner loads for training and prediction.
    pub split: String,
    /// Deferred `setup` arguments extracted from the model section.
    pub dataloader_args: Params,
}

/// Resolves and instantiates every component of a workflow configuration.
///
/// Components are built in dependency order: preprocessors first, then the
/// dataloader (owning the preprocessors), then the model and the evaluator
/// (sharing the dataloader handle).
pub fn assemble(
    config: &WorkflowConfig,
    registry: &Registry,
) -> Result<AssembledPipeline, AssemblyError> {
    let mut slots = Vec::with_capacity(config.preprocessors.len());
    for preprocessor in &config.preprocessors {
        let factory = registry
            .resolve_preprocessor(&preprocessor.class)
            .map_err(|source| AssemblyError::Resolution {
                role: PipelineRole::Preprocessor,
                id: preprocessor.class.clone(),
                source,
            })?;
        let inner = factory(&preprocessor.params).map_err(|source| {
            AssemblyError::Instantiation {
                role: PipelineRole::Preprocessor,
                id: preprocessor.class.clone(),
                source,
            }
        })?;
        slots.push(PreprocessorSlot::new(
            component_name(&preprocessor.class),
            inner,
        ));
    }
    debug!(count = slots.len(), "instantiated preprocessors");

    let dataloader_args = config.model.dataloader_args.clone();

    let factory = registry
        .resolve_dataloader(&config.dataloader.class)
        .map_err(|source| AssemblyError::Resolution {
            role: PipelineRole::Dataloader,
            id: config.dataloader.class.clone(),
            source,
        })?;
    let dataloader = factory(&config.dataloader.params, slots).map_err(|source| {
        AssemblyError::Instantiation {
            role: PipelineRole::Dataloader,
            id: config.dataloader.class.clone(),
            source,
        }
    })?;
    let dataloader: SharedDataloader = Rc::new(RefCell::new(dataloader));

    let factory =
        registry
            .resolve_model(&config.model.class)
            .map_err(|source| AssemblyError::Resolution {
                role: PipelineRole::Model,
                id: config.model.class.clone(),
                source,
            })?;
    let model = factory(
        &config.model.params,
        Rc::clone(&dataloader),
        &config.model.split,
    )
    .map_err(|source| AssemblyError::Instantiation {
        role: PipelineRole::Model,
        id: config.model.class.clone(),
        source,
    })?;

    let factory = registry
        .resolve_evaluator(&config.evaluator.class)
        .map_err(|source| AssemblyError::Resolution {
            role: PipelineRole::Evaluator,
            id: config.evaluator.class.clone(),
            source,
        })?;
    let evaluator = factory(&config.evaluator.params, Rc::clone(&dataloader)).map_err(
        |source| AssemblyError::Instantiation {
            role: PipelineRole::Evaluator,
            id: config.evaluator.class.clone(),
            source,
        },
    )?;

    debug!(
        dataloader = %config.dataloader.class,
        model = %config.model.class,
        evaluator = %config.evaluator.class,
        "pipeline assembled"
    );

    Ok(AssembledPipeline {
        dataloader,
        model,
        evaluator,
        split: config.model.split.clone(),
        dataloader_args,
    })
}

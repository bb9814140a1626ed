//! Drives an assembled pipeline through one run.
//!
//! The run is a linear state machine:
//! load checkpoint → preprocessor checkpoints → setup → train → predict →
//! prediction checkpoint → evaluate. Checkpoints are skipped when no schema
//! is declared, the schema file is absent, or the stage's data is not
//! tabular.

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::components::EvalResult;
use crate::data::Value;
use crate::error::{ComponentError, SchemaError};
use crate::pipeline::config::{ReloadPolicy, Severity, WorkflowConfig};
use crate::pipeline::AssembledPipeline;
use crate::schema::{validate, SchemaDoc, ValidationReport};

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum RunError {
    /// A component failed during the run.
    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    /// A schema document could not be used.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A checkpoint failed under [`Severity::Fatal`].
    #[error("Schema validation failed: {0}")]
    Validation(ValidationReport),
}

/// The outcome of a completed run.
#[derive(Debug)]
pub struct RunOutcome {
    /// Identifier of this run, carried in diagnostics.
    pub run_id: Uuid,
    /// The evaluator's result mapping.
    pub result: EvalResult,
    /// The predictions produced by the model.
    pub predictions: Value,
    /// Every validation report produced at a checkpoint, clean or not.
    pub reports: Vec<ValidationReport>,
}

/// Executes assembled pipelines under the configured validation policies.
pub struct PipelineRunner {
    severity: Severity,
    reload: ReloadPolicy,
}

impl PipelineRunner {
    /// Creates a runner with the configuration's validation policies.
    pub fn new(config: &WorkflowConfig) -> Self {
        Self {
            severity: config.validation.severity,
            reload: config.validation.reload,
        }
    }

    /// Runs the pipeline to completion and returns the evaluation outcome.
    pub fn run(
        &self,
        pipeline: &mut AssembledPipeline,
        config: &WorkflowConfig,
    ) -> Result<RunOutcome, RunError> {
        let run_id = Uuid::new_v4();
        info!(%run_id, split = %pipeline.split, "starting pipeline run");
        let mut reports = Vec::new();

        // Checkpoint the dataloader's sample, when it exposes one.
        let sample = pipeline.dataloader.borrow().fetch()?;
        match sample {
            Some(value) => self.checkpoint(
                &value,
                config.dataloader.output_schema.as_deref(),
                &mut reports,
            )?,
            None => debug!("dataloader exposes no sample accessor; skipping checkpoint"),
        }

        // Checkpoint each preprocessor's recorded output. Before the first
        // load the slots are empty and nothing is checked.
        {
            let dataloader = pipeline.dataloader.borrow();
            for (slot, section) in dataloader
                .preprocessors()
                .iter()
                .zip(&config.preprocessors)
            {
                match slot.output() {
                    Some(output) => self.checkpoint(
                        output,
                        section.output_schema.as_deref(),
                        &mut reports,
                    )?,
                    None => debug!(
                        preprocessor = slot.name(),
                        "no recorded output; skipping checkpoint"
                    ),
                }
            }
        }

        pipeline
            .dataloader
            .borrow_mut()
            .setup(&pipeline.dataloader_args)?;

        // Train. PerStage reloads here and again before prediction,
        // replacing whatever snapshot the checkpoints above validated.
        pipeline.dataloader.borrow_mut().load(&pipeline.split)?;
        pipeline.model.fit()?;
        info!("model trained");

        if self.reload == ReloadPolicy::PerStage {
            pipeline.dataloader.borrow_mut().load(&pipeline.split)?;
        }
        let predictions = pipeline.model.infer()?;
        info!(kind = predictions.type_name(), "predictions produced");

        self.checkpoint(
            &predictions,
            config.model.output_schema.as_deref(),
            &mut reports,
        )?;

        pipeline.evaluator.set_predictions(predictions.clone());
        let result = pipeline.evaluator.evaluate()?;
        info!(%run_id, ?result, "evaluation complete");

        Ok(RunOutcome {
            run_id,
            result,
            predictions,
            reports,
        })
    }

    /// Validates a stage's value against its declared schema, if applicable.
    ///
    /// The validation subject is the schema file's stem. Under
    /// [`Severity::Recoverable`] violations are logged and collected; under
    /// [`Severity::Fatal`] the first failing report aborts the run.
    fn checkpoint(
        &self,
        value: &Value,
        schema_path: Option<&Path>,
        reports: &mut Vec<ValidationReport>,
    ) -> Result<(), RunError> {
        let Some(path) = schema_path else {
            return Ok(());
        };
        let Some(frame) = value.as_frame() else {
            debug!(
                schema = %path.display(),
                kind = value.type_name(),
                "data is not tabular; skipping checkpoint"
            );
            return Ok(());
        };
        if !path.exists() {
            debug!(schema = %path.display(), "schema file not found; skipping checkpoint");
            return Ok(());
        }

        let doc = SchemaDoc::load(path)?;
        let subject = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let report = validate(frame, &doc, &subject)?;

        if report.is_clean() {
            info!(schema = %path.display(), "dataframe validated against schema");
        } else {
            match self.severity {
                Severity::Recoverable => {
                    for violation in &report.violations {
                        warn!(subject = %report.subject, "{}", violation);
                    }
                }
                Severity::Fatal => return Err(RunError::Validation(report)),
            }
        }
        reports.push(report);
        Ok(())
    }
}

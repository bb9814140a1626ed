//! Workflow configuration for the pipeline.
//!
//! A configuration document names the dataloader, the ordered preprocessors,
//! the model, and the evaluator, each with its parameters and optional
//! schema checkpoint, plus the validation policies applied during a run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::Params;

/// Errors that can occur while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error while reading the configuration file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document does not parse as a workflow configuration.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Configuration validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Severity applied to schema validation failures during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Violations are logged and reported; the run continues.
    #[default]
    Recoverable,
    /// The first failing report aborts the run.
    Fatal,
}

/// When the runner reloads the dataloader's split.
///
/// `PerStage` matches the source behavior: training and prediction each
/// trigger a fresh load, so preprocessing checkpoints validate a snapshot
/// that the train-time reload replaces. `Once` loads a single time before
/// training and lets prediction reuse that buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReloadPolicy {
    #[default]
    PerStage,
    Once,
}

/// Validation policies for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Severity of schema validation failures.
    #[serde(default)]
    pub severity: Severity,
    /// Reload behavior around training and prediction.
    #[serde(default)]
    pub reload: ReloadPolicy,
}

/// Dataloader section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataloaderConfig {
    /// Dotted component identifier.
    pub class: String,
    /// Component parameters.
    #[serde(default)]
    pub params: Params,
    /// Path of the schema checkpoint for loaded data.
    #[serde(default)]
    pub output_schema: Option<PathBuf>,
    /// Whether `--generate-schemas` should write the schema.
    #[serde(default = "default_true")]
    pub generate_schema: bool,
}

/// One preprocessor section; order in the document is execution order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessorConfig {
    /// Dotted component identifier.
    pub class: String,
    /// Component parameters.
    #[serde(default)]
    pub params: Params,
    /// Path of the schema checkpoint for this preprocessor's output.
    #[serde(default)]
    pub output_schema: Option<PathBuf>,
}

/// Model section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Dotted component identifier.
    pub class: String,
    /// Split loaded for training and prediction.
    #[serde(default = "default_split")]
    pub split: String,
    /// Component parameters.
    #[serde(default)]
    pub params: Params,
    /// Arguments passed to the dataloader's `setup` before training.
    #[serde(default)]
    pub dataloader_args: Params,
    /// Path of the schema checkpoint for predictions.
    #[serde(default)]
    pub output_schema: Option<PathBuf>,
}

/// Evaluator section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Dotted component identifier.
    pub class: String,
    /// Component parameters.
    #[serde(default)]
    pub params: Params,
}

/// The full workflow configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    pub dataloader: DataloaderConfig,
    #[serde(default)]
    pub preprocessors: Vec<PreprocessorConfig>,
    pub model: ModelConfig,
    pub evaluator: EvaluatorConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

fn default_true() -> bool {
    true
}

fn default_split() -> String {
    "train".to_string()
}

impl WorkflowConfig {
    /// Reads and validates a configuration from a YAML file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    /// Returns `ConfigError::ValidationFailed` if any values are invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_class("dataloader", &self.dataloader.class)?;
        for (idx, preprocessor) in self.preprocessors.iter().enumerate() {
            check_class(&format!("preprocessors[{}]", idx), &preprocessor.class)?;
        }
        check_class("model", &self.model.class)?;
        check_class("evaluator", &self.evaluator.class)?;

        if self.model.split.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "model.split cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn check_class(section: &str, class: &str) -> Result<(), ConfigError> {
    if class.trim().is_empty() {
        return Err(ConfigError::ValidationFailed(format!(
            "{}.class cannot be empty",
            section
        )));
    }
    if !class.contains('.') {
        return Err(ConfigError::ValidationFailed(format!(
            "{}.class '{}' is not a dotted identifier",
            section, class
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"
dataloader:
  class: builtin.dataloaders.CsvDataloader
  params:
    filepath: data/sample.csv
  output_schema: schemas/CsvDataloader.yaml
preprocessors:
  - class: builtin.preprocessors.ScoreToLetterPreprocessor
model:
  class: builtin.models.GradeCountModel
  dataloader_args:
    split: train
evaluator:
  class: builtin.evaluators.PrintEvaluator
"#;

    #[test]
    fn test_parse_example_config() {
        let config: WorkflowConfig = serde_yaml::from_str(EXAMPLE).unwrap();
        assert_eq!(config.dataloader.class, "builtin.dataloaders.CsvDataloader");
        assert_eq!(config.preprocessors.len(), 1);
        assert!(config.dataloader.generate_schema);
        assert_eq!(config.model.split, "train");
        assert_eq!(config.validation.severity, Severity::Recoverable);
        assert_eq!(config.validation.reload, ReloadPolicy::PerStage);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_preprocessors_default_empty() {
        let minimal = r#"
dataloader: { class: a.B }
model: { class: c.D }
evaluator: { class: e.F }
"#;
        let config: WorkflowConfig = serde_yaml::from_str(minimal).unwrap();
        assert!(config.preprocessors.is_empty());
        assert!(config.model.dataloader_args.is_empty());
    }

    #[test]
    fn test_mandatory_sections() {
        let missing_model = r#"
dataloader: { class: a.B }
evaluator: { class: e.F }
"#;
        let result: Result<WorkflowConfig, _> = serde_yaml::from_str(missing_model);
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_policies_parse() {
        let with_policies = r#"
dataloader: { class: a.B }
model: { class: c.D }
evaluator: { class: e.F }
validation:
  severity: fatal
  reload: once
"#;
        let config: WorkflowConfig = serde_yaml::from_str(with_policies).unwrap();
        assert_eq!(config.validation.severity, Severity::Fatal);
        assert_eq!(config.validation.reload, ReloadPolicy::Once);
    }

    #[test]
    fn test_validate_rejects_undotted_class() {
        let mut config: WorkflowConfig = serde_yaml::from_str(EXAMPLE).unwrap();
        config.model.class = "GradeCountModel".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("model.class"));
    }

    #[test]
    fn test_validate_rejects_empty_split() {
        let mut config: WorkflowConfig = serde_yaml::from_str(EXAMPLE).unwrap();
        config.model.split = "  ".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("model.split"));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, EXAMPLE).unwrap();
        let config = WorkflowConfig::from_path(&path).unwrap();
        assert_eq!(config.evaluator.class, "builtin.evaluators.PrintEvaluator");
    }
}

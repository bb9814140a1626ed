//! CLI command definitions and handlers.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;

use crate::pipeline::{assemble, PipelineRunner, WorkflowConfig};
use crate::registry::{component_name, Registry};
use crate::schema;

/// Default configuration path, matching the example layout.
const DEFAULT_CONFIG: &str = "demos/example_config.yml";

/// Schema-validated pipeline orchestrator for tabular workflows.
#[derive(Parser)]
#[command(name = "tabflow")]
#[command(about = "Run schema-validated tabular data pipelines")]
#[command(version)]
#[command(
    long_about = "tabflow wires a configured dataloader, preprocessors, model, and evaluator\ninto a pipeline, validating intermediate data against declared schemas.\n\nExample usage:\n  tabflow --config demos/example_config.yml --generate-schemas --run-pipeline"
)]
pub struct Cli {
    /// Generate output schemas from the configured dataloader.
    #[arg(long)]
    pub generate_schemas: bool,

    /// Run the pipeline. Default when no action flag is supplied.
    #[arg(long)]
    pub run_pipeline: bool,

    /// Path to the workflow configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    pub log_level: String,
}

/// Parses CLI arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Dispatches the parsed CLI arguments.
///
/// Any unrecoverable failure (bad config, unknown component, invalid
/// component parameters) propagates out and exits the process with a
/// non-zero status.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    let output_dir = output_dir_for(&cli.config);
    info!("All outputs will be saved in: {}", output_dir.display());

    if cli.generate_schemas {
        generate_schemas(&cli.config)?;
    }
    if cli.run_pipeline || !cli.generate_schemas {
        run_pipeline(&cli.config)?;
    }
    Ok(())
}

/// Timestamped output directory derived from the config file name.
fn output_dir_for(config_path: &Path) -> PathBuf {
    let stem = config_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "config".to_string());
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from("outputs").join(format!("{}_{}", stem, timestamp))
}

/// Infers the dataloader's output schema and writes it to the configured
/// path.
fn generate_schemas(config_path: &Path) -> anyhow::Result<()> {
    let config = WorkflowConfig::from_path(config_path)
        .with_context(|| format!("reading config {}", config_path.display()))?;

    if !config.dataloader.generate_schema {
        info!("Skipping schema generation: generate_schema is false in config");
        return Ok(());
    }
    let Some(schema_path) = &config.dataloader.output_schema else {
        bail!("output_schema must be specified in the config under dataloader");
    };

    info!(
        class = %config.dataloader.class,
        "generating dataloader output schema"
    );
    let registry = Registry::with_builtins();
    let factory = registry.resolve_dataloader(&config.dataloader.class)?;
    // The schema loader gets no preprocessors: the schema describes the raw
    // dataloader output.
    let dataloader = factory(&config.dataloader.params, Vec::new())?;
    let sample = dataloader
        .fetch()?
        .context("dataloader exposes no data accessor for schema generation")?;

    let subject = component_name(&config.dataloader.class);
    let doc = schema::infer(&sample, subject)?;
    doc.save(schema_path)
        .with_context(|| format!("writing schema {}", schema_path.display()))?;
    info!(path = %schema_path.display(), "schema generation complete");
    Ok(())
}

/// Assembles and runs the configured pipeline.
fn run_pipeline(config_path: &Path) -> anyhow::Result<()> {
    info!(config = %config_path.display(), "running pipeline");
    let config = WorkflowConfig::from_path(config_path)
        .with_context(|| format!("reading config {}", config_path.display()))?;

    let registry = Registry::with_builtins();
    let mut pipeline = assemble(&config, &registry)?;
    let outcome = PipelineRunner::new(&config).run(&mut pipeline, &config)?;

    println!(
        "Evaluation result: {}",
        serde_json::to_string(&outcome.result)?
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_flags_run_pipeline() {
        let cli = Cli::parse_from(["tabflow"]);
        assert!(!cli.generate_schemas);
        assert!(!cli.run_pipeline);
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG));
    }

    #[test]
    fn test_both_flags() {
        let cli = Cli::parse_from([
            "tabflow",
            "--generate-schemas",
            "--run-pipeline",
            "--config",
            "my.yml",
        ]);
        assert!(cli.generate_schemas);
        assert!(cli.run_pipeline);
        assert_eq!(cli.config, PathBuf::from("my.yml"));
    }

    #[test]
    fn test_output_dir_uses_config_stem() {
        let dir = output_dir_for(Path::new("configs/workflow.yml"));
        let name = dir.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("workflow_"));
        assert!(dir.starts_with("outputs"));
    }
}

//! Regression-model evaluation step - entry point.
//!
//! Invoked once per pipeline run by the orchestrator, with inputs staged
//! and outputs collected at fixed filesystem locations. Any failure
//! terminates the process with a non-zero status for the orchestrator to
//! interpret as a failed pipeline step.

use anyhow::Result;
use model_eval_pipeline::{config::EvalConfig, pipeline};
use tracing::info;

fn main() -> Result<()> {
    let config = EvalConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                format!("model_eval_pipeline={}", config.logging.level).parse()?,
            ),
        )
        .init();

    info!("Starting evaluation");
    let metrics = pipeline::run(&config)?;
    info!(mse = metrics.mse, "Evaluation complete");

    Ok(())
}

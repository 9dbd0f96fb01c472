//! Linear orchestration of the evaluation stages.
//!
//! Load model, read test data, score, compute metrics, write report.
//! Every stage is fatal on failure; the report file is only created once
//! metrics have been computed successfully.

use crate::config::EvalConfig;
use crate::dataset::TestDataset;
use crate::metrics::RegressionMetrics;
use crate::models::loader::ModelLoader;
use crate::report::EvaluationReport;
use anyhow::{Context, Result};
use tracing::{debug, info};

/// Run the evaluation end to end and return the computed metrics.
pub fn run(config: &EvalConfig) -> Result<RegressionMetrics> {
    let loader = ModelLoader::new(&config.paths.model_file);
    let model = loader
        .load_from_archive(&config.paths.model_archive, &config.paths.extract_dir)
        .context("Failed to load model artifact")?;

    debug!(path = %config.paths.test_data.display(), "Reading test data");
    let dataset = TestDataset::from_csv(&config.paths.test_data)
        .context("Failed to read test data")?;

    info!(rows = dataset.len(), "Performing predictions against test data");
    let predictions = model.predict(dataset.feature_rows())?;

    debug!("Calculating regression metrics");
    let metrics = RegressionMetrics::compute(dataset.targets(), &predictions)?;

    info!(
        mse = metrics.mse,
        path = %config.paths.report.display(),
        "Writing out evaluation report"
    );
    EvaluationReport::from_metrics(&metrics).write(&config.paths.report)?;

    Ok(metrics)
}

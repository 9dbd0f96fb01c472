//! Evaluation report structure and JSON writer.
//!
//! The report schema is fixed by the downstream orchestrator: a single
//! `regression_metrics` object with one entry per metric, each carrying
//! the metric value and the residual standard deviation. The same
//! standard deviation appears in every entry by construction.

use crate::metrics::RegressionMetrics;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// A metric value plus the residual standard deviation for the run
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MetricEntry {
    pub value: f64,
    pub standard_deviation: f64,
}

/// The four regression metric entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionMetricsReport {
    pub mae: MetricEntry,
    pub mse: MetricEntry,
    pub rmse: MetricEntry,
    pub r2: MetricEntry,
}

/// Top-level evaluation report consumed by the orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub regression_metrics: RegressionMetricsReport,
}

impl EvaluationReport {
    /// Build the report from computed metrics, reusing the single
    /// residual standard deviation across all entries.
    pub fn from_metrics(metrics: &RegressionMetrics) -> Self {
        let std = metrics.residual_std;
        let entry = |value: f64| MetricEntry {
            value,
            standard_deviation: std,
        };

        Self {
            regression_metrics: RegressionMetricsReport {
                mae: entry(metrics.mae),
                mse: entry(metrics.mse),
                rmse: entry(metrics.rmse),
                r2: entry(metrics.r2),
            },
        }
    }

    /// Serialize the report to JSON and write it to `path`, creating
    /// parent directories as needed and overwriting any existing file.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create report directory {}", parent.display())
            })?;
        }

        let payload =
            serde_json::to_string(self).context("Failed to serialize evaluation report")?;
        fs::write(path, payload)
            .with_context(|| format!("Failed to write evaluation report to {}", path.display()))?;

        debug!(path = %path.display(), "Evaluation report written");

        Ok(())
    }
}

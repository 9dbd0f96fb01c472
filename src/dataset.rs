//! Reader for the held-out test set.
//!
//! The test file is headerless delimited text staged by the orchestrator:
//! column 0 is the ground-truth target, every remaining column is a model
//! feature. Column order and count are assumed to match what the model was
//! trained on; a mismatch surfaces as an error from the scoring step.

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::path::Path;
use tracing::debug;

/// In-memory test set: targets paired positionally with feature rows.
///
/// Positional correspondence is the invariant the metrics depend on:
/// row `i` of `feature_rows` produced the prediction that pairs with
/// `targets[i]`.
#[derive(Debug, Clone)]
pub struct TestDataset {
    targets: Vec<f64>,
    features: Vec<Vec<f32>>,
}

impl TestDataset {
    /// Read a headerless CSV file into targets and a feature matrix.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Failed to open test data at {}", path.display()))?;

        let mut targets = Vec::new();
        let mut features = Vec::new();

        for (row, record) in reader.records().enumerate() {
            let record =
                record.with_context(|| format!("Failed to read test data row {}", row))?;
            let mut fields = record.iter();

            let raw = fields
                .next()
                .with_context(|| format!("Test data row {} has no columns", row))?;
            let target: f64 = raw
                .trim()
                .parse()
                .with_context(|| format!("Row {}: target {:?} is not numeric", row, raw))?;

            let row_features = fields
                .map(|field| {
                    field.trim().parse::<f32>().with_context(|| {
                        format!("Row {}: feature value {:?} is not numeric", row, field)
                    })
                })
                .collect::<Result<Vec<f32>>>()?;

            targets.push(target);
            features.push(row_features);
        }

        debug!(rows = targets.len(), path = %path.display(), "Test data loaded");

        Ok(Self { targets, features })
    }

    /// Number of test rows
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Ground-truth target values, in file order
    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    /// Feature rows, in file order
    pub fn feature_rows(&self) -> &[Vec<f32>] {
        &self.features
    }
}

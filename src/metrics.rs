//! Regression error metrics over paired targets and predictions.
//!
//! All metrics are computed in f64 from the residual vector (true minus
//! predicted). RMSE is derived from MSE rather than computed independently,
//! and the residual standard deviation is computed once and reused across
//! every entry of the report.

use anyhow::{bail, Result};

/// Standard regression metrics for one evaluation run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionMetrics {
    /// Mean absolute error
    pub mae: f64,
    /// Mean squared error
    pub mse: f64,
    /// Root mean squared error, always `mse.sqrt()`
    pub rmse: f64,
    /// Coefficient of determination
    pub r2: f64,
    /// Population standard deviation of the residuals
    pub residual_std: f64,
}

impl RegressionMetrics {
    /// Compute metrics from paired targets and predictions.
    ///
    /// The sequences must have equal, non-zero length; row `i` of
    /// `predictions` must correspond to row `i` of `targets`.
    pub fn compute(targets: &[f64], predictions: &[f32]) -> Result<Self> {
        if targets.len() != predictions.len() {
            bail!(
                "Length mismatch: {} targets vs {} predictions",
                targets.len(),
                predictions.len()
            );
        }
        if targets.is_empty() {
            bail!("Cannot compute metrics over an empty test set");
        }

        let n = targets.len() as f64;
        let residuals: Vec<f64> = targets
            .iter()
            .zip(predictions)
            .map(|(t, p)| t - f64::from(*p))
            .collect();

        let mae = residuals.iter().map(|r| r.abs()).sum::<f64>() / n;
        let mse = residuals.iter().map(|r| r * r).sum::<f64>() / n;
        let rmse = mse.sqrt();
        let r2 = r_squared(targets, &residuals);

        let residual_mean = residuals.iter().sum::<f64>() / n;
        let residual_std = (residuals
            .iter()
            .map(|r| (r - residual_mean).powi(2))
            .sum::<f64>()
            / n)
            .sqrt();

        Ok(Self {
            mae,
            mse,
            rmse,
            r2,
            residual_std,
        })
    }
}

/// Coefficient of determination, 1 − RSS/TSS.
///
/// Degenerate inputs follow scikit-learn's conventions, which the original
/// training pipeline used: fewer than two samples is undefined (NaN); a
/// zero-variance target vector yields 1.0 when the residuals are also zero
/// and 0.0 otherwise.
fn r_squared(targets: &[f64], residuals: &[f64]) -> f64 {
    if targets.len() < 2 {
        return f64::NAN;
    }

    let mean = targets.iter().sum::<f64>() / targets.len() as f64;
    let tss: f64 = targets.iter().map(|t| (t - mean).powi(2)).sum();
    let rss: f64 = residuals.iter().map(|r| r * r).sum();

    if tss == 0.0 {
        return if rss == 0.0 { 1.0 } else { 0.0 };
    }

    1.0 - rss / tss
}

//! Batch evaluation step for a regression-model training pipeline.
//!
//! Loads a trained model artifact, scores it against a held-out test set,
//! computes regression error metrics, and writes a JSON report to a fixed
//! location for the pipeline orchestrator to consume.

pub mod config;
pub mod dataset;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod report;

pub use config::EvalConfig;
pub use dataset::TestDataset;
pub use metrics::RegressionMetrics;
pub use models::loader::ModelLoader;
pub use models::predictor::TreeEnsemble;
pub use report::EvaluationReport;

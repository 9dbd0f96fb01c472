//! Configuration for the evaluation step.
//!
//! The production invocation is parameterless: the orchestrator stages
//! inputs and collects outputs at the well-known paths baked into the
//! defaults. An optional `config/evaluation.toml` can override them,
//! which is how the tests point the pipeline at fixture directories.

use anyhow::{Context, Result};
use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main evaluation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    pub paths: PathsConfig,
    pub logging: LoggingConfig,
}

/// Filesystem locations used by the evaluation step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Gzipped tar archive containing the serialized model
    pub model_archive: PathBuf,
    /// Directory the archive contents are extracted into
    pub extract_dir: PathBuf,
    /// Name of the serialized model file inside the archive
    pub model_file: String,
    /// Headerless CSV test set (column 0 = target, columns 1.. = features)
    pub test_data: PathBuf,
    /// Destination of the JSON evaluation report
    pub report: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl EvalConfig {
    /// Load configuration, falling back to the built-in defaults when no
    /// override file is present.
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/evaluation.toml")
    }

    /// Load configuration with overrides from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to encode default configuration")?;

        let config = Config::builder()
            .add_source(defaults)
            .add_source(File::from(path.as_ref()).required(false))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            paths: PathsConfig {
                model_archive: PathBuf::from("/opt/ml/processing/model/model.tar.gz"),
                extract_dir: PathBuf::from("."),
                model_file: "xgboost-model.json".to_string(),
                test_data: PathBuf::from("/opt/ml/processing/test/test.csv"),
                report: PathBuf::from("/opt/ml/processing/evaluation/evaluation.json"),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = EvalConfig::default();
        assert_eq!(
            config.paths.model_archive,
            PathBuf::from("/opt/ml/processing/model/model.tar.gz")
        );
        assert_eq!(
            config.paths.test_data,
            PathBuf::from("/opt/ml/processing/test/test.csv")
        );
        assert_eq!(
            config.paths.report,
            PathBuf::from("/opt/ml/processing/evaluation/evaluation.json")
        );
        assert_eq!(config.paths.model_file, "xgboost-model.json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_override_file_uses_defaults() {
        let config = EvalConfig::load_from_path("does/not/exist.toml").unwrap();
        assert_eq!(config.paths.model_file, "xgboost-model.json");
    }

    #[test]
    fn test_override_file_replaces_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("evaluation.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[paths]\nmodel_archive = \"/tmp/fixtures/model.tar.gz\"\ntest_data = \"/tmp/fixtures/test.csv\""
        )
        .unwrap();

        let config = EvalConfig::load_from_path(&path).unwrap();
        assert_eq!(
            config.paths.model_archive,
            PathBuf::from("/tmp/fixtures/model.tar.gz")
        );
        assert_eq!(
            config.paths.test_data,
            PathBuf::from("/tmp/fixtures/test.csv")
        );
        // Untouched keys keep their defaults
        assert_eq!(config.paths.model_file, "xgboost-model.json");
        assert_eq!(config.logging.level, "info");
    }
}

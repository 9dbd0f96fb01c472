//! Model artifact extraction and deserialization.
//!
//! The orchestrator stages the trained model as a gzipped tar archive at a
//! well-known path. The loader extracts every archive entry into the
//! working directory and then deserializes the model file named by
//! convention. Any failure here is fatal: a missing model means the
//! evaluation cannot proceed.

use crate::models::predictor::TreeEnsemble;
use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::path::Path;
use tar::Archive;
use tracing::{debug, info};

/// Loader for the packaged model artifact
pub struct ModelLoader {
    /// Name of the serialized model file inside the archive
    model_file: String,
}

impl ModelLoader {
    /// Create a loader expecting the given model file name
    pub fn new(model_file: &str) -> Self {
        Self {
            model_file: model_file.to_string(),
        }
    }

    /// Extract the archive into `extract_dir` and deserialize the model.
    pub fn load_from_archive<P, Q>(&self, archive_path: P, extract_dir: Q) -> Result<TreeEnsemble>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let archive_path = archive_path.as_ref();
        let extract_dir = extract_dir.as_ref();

        debug!(path = %archive_path.display(), "Extracting model archive");

        let file = File::open(archive_path).with_context(|| {
            format!("Failed to open model archive at {}", archive_path.display())
        })?;
        let mut archive = Archive::new(GzDecoder::new(file));
        archive.unpack(extract_dir).with_context(|| {
            format!("Failed to extract model archive {}", archive_path.display())
        })?;

        let model_path = extract_dir.join(&self.model_file);
        let payload = std::fs::read(&model_path).with_context(|| {
            format!(
                "Model file {} not found in extracted archive",
                model_path.display()
            )
        })?;

        let model = TreeEnsemble::from_json(&payload)
            .with_context(|| format!("Failed to load model from {}", model_path.display()))?;

        info!(
            trees = model.trees.len(),
            num_features = model.num_features,
            "Model loaded successfully"
        );

        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::predictor::{Node, Tree};
    use flate2::write::GzEncoder;
    use flate2::Compression;

    fn write_model_archive(archive_path: &Path, file_name: &str, payload: &[u8]) {
        let file = File::create(archive_path).unwrap();
        let encoder = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(encoder);

        let mut header = tar::Header::new_gnu();
        header.set_size(payload.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, file_name, payload).unwrap();
        builder.into_inner().unwrap().finish().unwrap();
    }

    fn sample_model() -> TreeEnsemble {
        TreeEnsemble {
            base_score: 0.5,
            num_features: 1,
            trees: vec![Tree {
                nodes: vec![Node::Leaf { leaf: 2.0 }],
            }],
        }
    }

    #[test]
    fn test_load_round_trip_through_archive() {
        let dir = tempfile::tempdir().unwrap();
        let archive_path = dir.path().join("model.tar.gz");
        let payload = serde_json::to_vec(&sample_model()).unwrap();
        write_model_archive(&archive_path, "xgboost-model.json", &payload);

        let loader = ModelLoader::new("xgboost-model.json");
        let model = loader.load_from_archive(&archive_path, dir.path()).unwrap();
        assert_eq!(model.predict_row(&[0.0]).unwrap(), 2.5);
    }

    #[test]
    fn test_missing_archive_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ModelLoader::new("xgboost-model.json");
        let err = loader
            .load_from_archive(dir.path().join("missing.tar.gz"), dir.path())
            .unwrap_err();
        assert!(err.to_string().contains("Failed to open model archive"));
    }

    #[test]
    fn test_archive_without_model_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let archive_path = dir.path().join("model.tar.gz");
        write_model_archive(&archive_path, "something-else.bin", b"not a model");

        let loader = ModelLoader::new("xgboost-model.json");
        let err = loader
            .load_from_archive(&archive_path, dir.path())
            .unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_corrupt_archive_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let archive_path = dir.path().join("model.tar.gz");
        std::fs::write(&archive_path, b"this is not a gzip stream").unwrap();

        let loader = ModelLoader::new("xgboost-model.json");
        let err = loader
            .load_from_archive(&archive_path, dir.path())
            .unwrap_err();
        assert!(err.to_string().contains("Failed to extract"));
    }

    #[test]
    fn test_corrupt_model_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let archive_path = dir.path().join("model.tar.gz");
        write_model_archive(&archive_path, "xgboost-model.json", b"{not json");

        let loader = ModelLoader::new("xgboost-model.json");
        let err = loader
            .load_from_archive(&archive_path, dir.path())
            .unwrap_err();
        assert!(format!("{:#}", err).contains("deserialize"));
    }
}

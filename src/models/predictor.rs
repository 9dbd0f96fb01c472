//! Gradient-boosted tree-ensemble predictor.
//!
//! The model file is a portable JSON serialization of a boosted regression
//! ensemble: a list of binary trees stored as flat node arrays, plus a
//! global base score. Prediction for a row is the base score plus the sum
//! of the leaf values reached in each tree. All numeric semantics beyond
//! that (split precision, missing-value routing) come from the serialized
//! model itself; this module adds no numeric logic of its own.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// A node in a decision tree: an internal split or a terminal leaf.
///
/// Child fields are indices into the owning tree's node array. NaN feature
/// values take the direction recorded in `default_left`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
        #[serde(default)]
        default_left: bool,
    },
    Leaf {
        leaf: f32,
    },
}

/// A single regression tree, root at node index 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    /// Walk from the root to a leaf for the given feature row.
    ///
    /// Assumes the tree passed [`TreeEnsemble::validate`]: children point
    /// strictly forward and feature indices are below `num_features`.
    fn score(&self, features: &[f32]) -> f32 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { leaf } => return *leaf,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    default_left,
                } => {
                    let value = features[*feature];
                    idx = if value.is_nan() {
                        if *default_left {
                            *left
                        } else {
                            *right
                        }
                    } else if value < *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// Deserialized regression model: base score plus boosted trees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub base_score: f32,
    pub num_features: usize,
    pub trees: Vec<Tree>,
}

impl TreeEnsemble {
    /// Deserialize a model from its JSON representation and validate it.
    pub fn from_json(payload: &[u8]) -> Result<Self> {
        let model: Self =
            serde_json::from_slice(payload).context("Failed to deserialize model file")?;
        model.validate()?;
        Ok(model)
    }

    /// Check structural soundness: non-empty ensemble, in-range feature
    /// indices, and child indices that point strictly forward (which also
    /// guarantees traversal terminates).
    pub fn validate(&self) -> Result<()> {
        if self.trees.is_empty() {
            bail!("Model contains no trees");
        }
        if self.num_features == 0 {
            bail!("Model declares zero features");
        }
        for (t, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                bail!("Tree {} has no nodes", t);
            }
            for (i, node) in tree.nodes.iter().enumerate() {
                if let Node::Split {
                    feature,
                    left,
                    right,
                    ..
                } = node
                {
                    if *feature >= self.num_features {
                        bail!(
                            "Tree {} node {} splits on feature {} but model has {} features",
                            t,
                            i,
                            feature,
                            self.num_features
                        );
                    }
                    if *left >= tree.nodes.len() || *right >= tree.nodes.len() {
                        bail!("Tree {} node {} has out-of-range child index", t, i);
                    }
                    if *left <= i || *right <= i {
                        bail!("Tree {} node {} has a backward child index", t, i);
                    }
                }
            }
        }
        Ok(())
    }

    /// Predict a single row.
    pub fn predict_row(&self, features: &[f32]) -> Result<f32> {
        if features.len() < self.num_features {
            bail!(
                "Feature row has {} columns but model expects {}",
                features.len(),
                self.num_features
            );
        }
        let score: f32 = self.trees.iter().map(|tree| tree.score(features)).sum();
        Ok(self.base_score + score)
    }

    /// Predict every row, preserving row order.
    pub fn predict(&self, rows: &[Vec<f32>]) -> Result<Vec<f32>> {
        rows.iter()
            .enumerate()
            .map(|(i, row)| {
                self.predict_row(row)
                    .with_context(|| format!("Failed to score test row {}", i))
            })
            .collect()
    }
}

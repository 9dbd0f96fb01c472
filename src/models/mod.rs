//! Model artifact loading and tree-ensemble inference

pub mod loader;
pub mod predictor;

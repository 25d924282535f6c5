//! Inference Engine
//!
//! Probabilistic classification for the scoring engines: the `Classifier`
//! capability, a bagged random forest implementing it, and `FittedModel`,
//! the immutable scaler + classifier pair produced once at start-up.

mod classifier;
mod forest;
mod model;
mod tree;

pub use classifier::Classifier;
pub use forest::{ForestParams, RandomForest};
pub use model::FittedModel;

use feature_engine::FeatureError;
use thiserror::Error;

/// Errors during training or inference
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("Training failed: {0}")]
    TrainingFailed(String),
    #[error("Invalid input shape: expected {expected} features, got {actual}")]
    InvalidInputShape { expected: usize, actual: usize },
    #[error("Invalid output shape: expected {expected} class probabilities, got {actual}")]
    InvalidOutputShape { expected: usize, actual: usize },
    #[error("Classifier returned an invalid probability vector: {0}")]
    InvalidProbabilities(String),
    #[error("Feature error: {0}")]
    Feature(#[from] FeatureError),
}

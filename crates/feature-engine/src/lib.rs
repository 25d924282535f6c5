//! Feature Engineering Engine
//!
//! Provides patient sample types, feature-vector assembly, and the standard
//! scaler shared by model training and inference.

mod dataset;
mod sample;
mod scaler;

pub use dataset::TrainingSet;
pub use sample::{BedAttributes, VitalsSample, BED_FEATURE_DIMENSION, VITALS_FEATURE_DIMENSION};
pub use scaler::StandardScaler;

use thiserror::Error;

/// Errors raised while assembling or scaling features
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    #[error("Feature dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("Cannot fit on an empty dataset")]
    EmptyDataset,
    #[error("Label count {labels} does not match row count {rows}")]
    LabelMismatch { rows: usize, labels: usize },
    #[error("Invalid generator parameter: {0}")]
    InvalidParameter(String),
}

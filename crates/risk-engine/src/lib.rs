//! Patient Risk Engine
//!
//! Combines the rule-based vitals heuristic with a trained classifier into a
//! single risk score, level, and explanation, and recommends a bed category
//! from patient attributes. Model state is fitted once and shared read-only.

mod batch;
mod bed;
mod risk;
mod service;

pub use batch::BatchOutcome;
pub use bed::{BedRecommendation, BedRecommendationEngine, RoomCategory};
pub use risk::{RiskAssessment, RiskClass, RiskLevel, RiskScoringEngine};
pub use service::{ModelRecipe, ScoringService, TrainingConfig};

pub use clinical_rules::Contributions;
pub use feature_engine::{BedAttributes, VitalsSample};

use inference_engine::InferenceError;
use thiserror::Error;
use vitals_validator::ValidationError;

/// Errors returned by the scoring engines
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    /// Input rejected at the boundary
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    /// Classifier inference failed; no score was produced
    #[error("Scoring computation failed: {0}")]
    Computation(#[from] InferenceError),
}

impl ScoringError {
    /// Stable machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            ScoringError::Validation(_) => "validation_error",
            ScoringError::Computation(_) => "computation_error",
        }
    }
}

/// Round to 3 decimal places.
///
/// Exact halves round away from zero (`0.0625` becomes `0.063`), not to even.
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

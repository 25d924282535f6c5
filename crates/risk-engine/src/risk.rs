//! Vitals Risk Scoring

use crate::service::ModelRecipe;
use crate::{round3, ScoringError};
use clinical_rules::{Contributions, RuleEngine};
use feature_engine::VitalsSample;
use inference_engine::{FittedModel, InferenceError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use synthetic_data::RiskDataBuilder;
use tracing::{debug, info};
use vitals_validator::Validator;

/// Weight of the rule-based score in the ensemble
pub const RULE_WEIGHT: f64 = 0.6;
/// Weight of the learned score in the ensemble
pub const ML_WEIGHT: f64 = 0.4;

/// Scores strictly above this are critical
pub const CRITICAL_THRESHOLD: f64 = 0.7;
/// Scores strictly above this (and not critical) are medium
pub const MEDIUM_THRESHOLD: f64 = 0.4;

/// Class labels of the risk classifier, with their probability-vector index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskClass {
    Low,
    Medium,
    Critical,
}

impl RiskClass {
    /// Number of classes the risk classifier is trained on
    pub const COUNT: usize = 3;

    /// Position of this class in the probability vector
    pub fn index(&self) -> usize {
        match self {
            RiskClass::Low => 0,
            RiskClass::Medium => 1,
            RiskClass::Critical => 2,
        }
    }
}

/// Categorical risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    Critical,
}

impl RiskLevel {
    /// Map a risk score to its level (thresholds are exclusive)
    pub fn from_score(score: f64) -> Self {
        if score > CRITICAL_THRESHOLD {
            RiskLevel::Critical
        } else if score > MEDIUM_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::Critical => "critical",
        }
    }
}

/// Result of scoring one vitals sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Ensemble score in [0, 1], 3 decimals
    pub risk_score: f64,
    /// Level derived from `risk_score`
    pub level: RiskLevel,
    /// Rule-based score in [0, 1], 3 decimals
    pub rule_based_score: f64,
    /// Classifier-derived score in [0, 1], 3 decimals
    pub ml_score: f64,
    /// Per-signal explanation bands
    pub contributions: Contributions,
}

/// Ensemble of the rule heuristic and a fitted risk classifier.
///
/// `risk_score = clamp(round(0.6 * rule_based_score + 0.4 * ml_score, 3), 0, 1)`,
/// computed from the reported (rounded) component scores so the identity can
/// be checked against any returned assessment.
#[derive(Clone)]
pub struct RiskScoringEngine {
    model: Arc<FittedModel>,
    rules: RuleEngine,
    validator: Validator,
}

impl RiskScoringEngine {
    /// Create an engine over a fitted risk model
    pub fn new(model: Arc<FittedModel>) -> Self {
        Self {
            model,
            rules: RuleEngine::new(),
            validator: Validator::default(),
        }
    }

    /// Generate the synthetic risk training set and fit a model on it
    pub fn train(recipe: &ModelRecipe) -> Result<Self, ScoringError> {
        let set = RiskDataBuilder::new(recipe.samples)
            .seed(recipe.data_seed)
            .build()
            .map_err(InferenceError::from)?;
        let model = FittedModel::train(&set, RiskClass::COUNT, &recipe.forest)?;
        info!("Risk predictor trained on {} samples", set.len());
        Ok(Self::new(Arc::new(model)))
    }

    /// Replace the validator used by `score_checked` and `batch_score`
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// Whether the underlying model was trained (rather than injected)
    pub fn is_trained(&self) -> bool {
        self.model.training_rows() > 0
    }

    /// Score a sample that has already passed boundary validation
    pub fn score(&self, vitals: &VitalsSample) -> Result<RiskAssessment, ScoringError> {
        let rule_based_score = round3(self.rules.score(vitals));

        let proba = self.model.predict_proba(&vitals.to_features())?;
        let ml_score = round3(Self::ml_score(&proba)?);

        let risk_score = Self::combine(rule_based_score, ml_score);
        let level = RiskLevel::from_score(risk_score);

        debug!(
            "Scored vitals: risk={} level={} rule={} ml={}",
            risk_score,
            level.as_str(),
            rule_based_score,
            ml_score
        );

        Ok(RiskAssessment {
            risk_score,
            level,
            rule_based_score,
            ml_score,
            contributions: Contributions::explain(vitals),
        })
    }

    /// Validate then score
    pub fn score_checked(&self, vitals: &VitalsSample) -> Result<RiskAssessment, ScoringError> {
        self.validator.validate_vitals(vitals)?;
        self.score(vitals)
    }

    /// Score each sample independently, in parallel, preserving input order.
    ///
    /// Every element is validated on its own; a rejected or failed sample
    /// yields an error in its slot without affecting the others.
    pub fn batch_score(&self, samples: &[VitalsSample]) -> Vec<Result<RiskAssessment, ScoringError>> {
        debug!("Scoring batch of {} samples", samples.len());
        samples.par_iter().map(|vitals| self.score_checked(vitals)).collect()
    }

    /// Learned score from class probabilities.
    ///
    /// With a critical class: `p[critical] + 0.5 * p[medium]`. A two-class
    /// model falls back to `p[1]`.
    pub fn ml_score(proba: &[f64]) -> Result<f64, ScoringError> {
        let medium = RiskClass::Medium.index();
        let critical = RiskClass::Critical.index();

        if proba.len() > critical {
            Ok(0.5 * proba[medium] + proba[critical])
        } else if proba.len() > medium {
            Ok(proba[medium])
        } else {
            Err(InferenceError::InvalidOutputShape {
                expected: RiskClass::COUNT,
                actual: proba.len(),
            }
            .into())
        }
    }

    /// Weighted ensemble, rounded to 3 decimals and clamped to [0, 1]
    pub fn combine(rule_based_score: f64, ml_score: f64) -> f64 {
        round3(RULE_WEIGHT * rule_based_score + ML_WEIGHT * ml_score).clamp(0.0, 1.0)
    }
}

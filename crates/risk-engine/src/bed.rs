//! Bed-Category Recommendation

use crate::service::ModelRecipe;
use crate::{round3, ScoringError};
use feature_engine::BedAttributes;
use inference_engine::{FittedModel, InferenceError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use synthetic_data::BedDataBuilder;
use tracing::{debug, info};
use vitals_validator::Validator;

/// Room categories in classifier index order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoomCategory {
    Normal,
    StepDown,
    Icu,
    Isolation,
}

impl RoomCategory {
    /// All categories, ordered by index
    pub const ALL: [RoomCategory; 4] = [
        RoomCategory::Normal,
        RoomCategory::StepDown,
        RoomCategory::Icu,
        RoomCategory::Isolation,
    ];

    /// Position of this category in the probability vector
    pub fn index(&self) -> usize {
        match self {
            RoomCategory::Normal => 0,
            RoomCategory::StepDown => 1,
            RoomCategory::Icu => 2,
            RoomCategory::Isolation => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomCategory::Normal => "normal",
            RoomCategory::StepDown => "step-down",
            RoomCategory::Icu => "icu",
            RoomCategory::Isolation => "isolation",
        }
    }
}

/// Recommended room with the full distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BedRecommendation {
    pub recommended_room: RoomCategory,
    /// Probability of the recommended room, rounded to 3 decimals.
    /// Within 5e-4 of the matching entry in `probabilities`.
    pub confidence: f64,
    /// Unrounded probability per category; sums to 1 within 1e-6
    pub probabilities: BTreeMap<RoomCategory, f64>,
}

/// Recommends a room category from patient attributes
#[derive(Clone)]
pub struct BedRecommendationEngine {
    model: Arc<FittedModel>,
    validator: Validator,
}

impl BedRecommendationEngine {
    pub fn new(model: Arc<FittedModel>) -> Self {
        Self {
            model,
            validator: Validator::default(),
        }
    }

    /// Generate the synthetic bed-allocation set and fit a model on it
    pub fn train(recipe: &ModelRecipe) -> Result<Self, ScoringError> {
        let set = BedDataBuilder::new(recipe.samples)
            .seed(recipe.data_seed)
            .build()
            .map_err(InferenceError::from)?;
        let model = FittedModel::train(&set, RoomCategory::ALL.len(), &recipe.forest)?;
        info!("Bed recommender trained on {} samples", set.len());
        Ok(Self::new(Arc::new(model)))
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    pub fn is_trained(&self) -> bool {
        self.model.training_rows() > 0
    }

    /// Most probable room; ties go to the lowest category index
    pub fn recommend(&self, attrs: &BedAttributes) -> Result<BedRecommendation, ScoringError> {
        let proba = self.model.predict_proba(&attrs.to_features())?;
        if proba.len() != RoomCategory::ALL.len() {
            return Err(InferenceError::InvalidOutputShape {
                expected: RoomCategory::ALL.len(),
                actual: proba.len(),
            }
            .into());
        }

        let best = proba
            .iter()
            .enumerate()
            .fold(0, |best, (i, &p)| if p > proba[best] { i } else { best });
        let recommended_room = RoomCategory::ALL[best];

        let probabilities = RoomCategory::ALL
            .iter()
            .map(|room| (*room, proba[room.index()]))
            .collect();

        debug!(
            "Recommended {} (p={:.3}) for severity={} isolation={}",
            recommended_room.as_str(),
            proba[best],
            attrs.severity_score,
            attrs.needs_isolation
        );

        Ok(BedRecommendation {
            recommended_room,
            confidence: round3(proba[best]),
            probabilities,
        })
    }

    /// Validate then recommend
    pub fn recommend_checked(&self, attrs: &BedAttributes) -> Result<BedRecommendation, ScoringError> {
        self.validator.validate_bed_attributes(attrs)?;
        self.recommend(attrs)
    }
}

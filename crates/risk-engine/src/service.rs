//! Scoring Service Assembly

use crate::bed::BedRecommendationEngine;
use crate::risk::RiskScoringEngine;
use crate::ScoringError;
use inference_engine::ForestParams;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use synthetic_data::{BED_DATA_SEED, RISK_DATA_SEED};
use tracing::info;
use vitals_validator::Validator;

/// Training recipe for one model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecipe {
    /// Synthetic rows to generate
    pub samples: usize,
    /// Seed for the synthetic data generator
    pub data_seed: u64,
    /// Forest hyperparameters
    pub forest: ForestParams,
}

/// Training recipes for both models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub risk: ModelRecipe,
    pub bed: ModelRecipe,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            risk: ModelRecipe {
                samples: 2000,
                data_seed: RISK_DATA_SEED,
                forest: ForestParams::risk(),
            },
            bed: ModelRecipe {
                samples: 1000,
                data_seed: BED_DATA_SEED,
                forest: ForestParams::bed(),
            },
        }
    }
}

/// Both engines, trained and ready to serve.
///
/// Cloning is cheap: the fitted models are shared.
#[derive(Clone)]
pub struct ScoringService {
    risk: RiskScoringEngine,
    bed: BedRecommendationEngine,
}

impl ScoringService {
    /// Train both models (in parallel) from their synthetic training sets
    pub fn initialize(config: &TrainingConfig) -> Result<Self, ScoringError> {
        let start = Instant::now();
        info!("Training scoring models");

        let (risk, bed) = rayon::join(
            || RiskScoringEngine::train(&config.risk),
            || BedRecommendationEngine::train(&config.bed),
        );

        let service = Self {
            risk: risk?,
            bed: bed?,
        };
        info!("Scoring models ready in {}ms", start.elapsed().as_millis());
        Ok(service)
    }

    /// Use `validator` for boundary checks in both engines
    pub fn with_validator(self, validator: Validator) -> Self {
        Self {
            risk: self.risk.with_validator(validator.clone()),
            bed: self.bed.with_validator(validator),
        }
    }

    pub fn risk(&self) -> &RiskScoringEngine {
        &self.risk
    }

    pub fn bed(&self) -> &BedRecommendationEngine {
        &self.bed
    }

    /// Whether both models were trained
    pub fn is_ready(&self) -> bool {
        self.risk.is_trained() && self.bed.is_trained()
    }
}

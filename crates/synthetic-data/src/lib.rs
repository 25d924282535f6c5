//! Synthetic Training Data
//!
//! Seeded generators for the labeled feature matrices that bootstrap the risk
//! and bed-recommendation classifiers. A fixed seed always yields the same
//! matrix, so independently trained models are identical.

mod bed;
mod risk;

pub use bed::{BedDataBuilder, BED_DATA_SEED};
pub use risk::{RiskDataBuilder, RISK_DATA_SEED};

use rand::Rng;
use rand_distr::StandardNormal;

/// Draw from N(mean, std_dev²)
pub(crate) fn sample_normal<R: Rng>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    mean + std_dev * z
}

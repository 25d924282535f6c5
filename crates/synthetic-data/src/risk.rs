//! Vitals Training Data (low / medium / critical)

use crate::sample_normal;
use feature_engine::{FeatureError, TrainingSet, VITALS_FEATURE_DIMENSION};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

/// Default seed for the vitals training set
pub const RISK_DATA_SEED: u64 = 42;

/// Per-column (mean, std_dev) for one risk class, in feature order
type ClassProfile = [(f64, f64); VITALS_FEATURE_DIMENSION];

const LOW_PROFILE: ClassProfile = [
    (75.0, 10.0),
    (97.0, 1.5),
    (36.8, 0.3),
    (120.0, 10.0),
    (78.0, 8.0),
    (16.0, 2.0),
];

const MEDIUM_PROFILE: ClassProfile = [
    (100.0, 8.0),
    (93.0, 2.0),
    (38.2, 0.4),
    (145.0, 12.0),
    (90.0, 8.0),
    (22.0, 3.0),
];

const CRITICAL_PROFILE: ClassProfile = [
    (125.0, 12.0),
    (87.0, 3.0),
    (39.5, 0.5),
    (170.0, 15.0),
    (105.0, 10.0),
    (30.0, 4.0),
];

/// Realistic clip bounds per column
const CLIP_BOUNDS: [(f64, f64); VITALS_FEATURE_DIMENSION] = [
    (30.0, 200.0),
    (60.0, 100.0),
    (34.0, 42.0),
    (70.0, 220.0),
    (40.0, 140.0),
    (8.0, 45.0),
];

/// Builder for the vitals training set.
///
/// 40% of rows are drawn from the low-risk profile (label 0), 35% from the
/// medium profile (label 1) and the remainder from the critical profile
/// (label 2). Rows are clipped to realistic ranges and shuffled.
#[derive(Debug, Clone)]
pub struct RiskDataBuilder {
    n_samples: usize,
    seed: u64,
}

impl RiskDataBuilder {
    /// Create a new builder for `n_samples` rows
    pub fn new(n_samples: usize) -> Self {
        Self {
            n_samples,
            seed: RISK_DATA_SEED,
        }
    }

    /// Set the random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Generate the labeled matrix
    pub fn build(self) -> Result<TrainingSet, FeatureError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let n = self.n_samples;

        let n_low = (n as f64 * 0.4) as usize;
        let n_medium = (n as f64 * 0.35) as usize;
        let n_critical = n - n_low - n_medium;

        let mut rows: Vec<[f64; VITALS_FEATURE_DIMENSION]> = Vec::with_capacity(n);
        let mut labels = Vec::with_capacity(n);

        for (label, count, profile) in [
            (0, n_low, &LOW_PROFILE),
            (1, n_medium, &MEDIUM_PROFILE),
            (2, n_critical, &CRITICAL_PROFILE),
        ] {
            let start = rows.len();
            rows.resize(start + count, [0.0; VITALS_FEATURE_DIMENSION]);
            // Column-major draws per class
            for (col, &(mean, std_dev)) in profile.iter().enumerate() {
                for row in &mut rows[start..] {
                    row[col] = sample_normal(&mut rng, mean, std_dev);
                }
            }
            labels.resize(start + count, label);
        }

        for row in &mut rows {
            for (value, &(lo, hi)) in row.iter_mut().zip(CLIP_BOUNDS.iter()) {
                *value = value.clamp(lo, hi);
            }
        }

        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(&mut rng);

        let features = Array2::from_shape_fn((n, VITALS_FEATURE_DIMENSION), |(i, j)| rows[order[i]][j]);
        let labels = order.iter().map(|&i| labels[i]).collect();

        debug!(
            "Generated vitals training set: {} rows (low={}, medium={}, critical={}, seed={})",
            n, n_low, n_medium, n_critical, self.seed
        );

        TrainingSet::new(features, labels)
    }
}

//! Bed-Allocation Training Data

use crate::sample_normal;
use feature_engine::{FeatureError, TrainingSet, BED_FEATURE_DIMENSION};
use ndarray::Array2;
use rand::distributions::Bernoulli;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Default seed for the bed-allocation training set
pub const BED_DATA_SEED: u64 = 123;

const VENTILATOR_RATE: f64 = 0.3;
const ISOLATION_RATE: f64 = 0.15;

/// Builder for the bed-allocation training set.
///
/// Features are `[severity, ventilator, isolation, age, risk]`. Labels follow
/// a fixed policy: isolation (3) whenever isolation is needed, else ICU (2)
/// for severity or risk above 0.7, else step-down (1) above 0.4, else
/// normal (0).
#[derive(Debug, Clone)]
pub struct BedDataBuilder {
    n_samples: usize,
    seed: u64,
}

impl BedDataBuilder {
    /// Create a new builder for `n_samples` rows
    pub fn new(n_samples: usize) -> Self {
        Self {
            n_samples,
            seed: BED_DATA_SEED,
        }
    }

    /// Set the random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Labeling rule the classifier is trained to reproduce
    pub fn label(row: &[f64; BED_FEATURE_DIMENSION]) -> usize {
        let [severity, _, isolation, _, risk] = *row;
        if isolation == 1.0 {
            3
        } else if severity > 0.7 || risk > 0.7 {
            2
        } else if severity > 0.4 || risk > 0.4 {
            1
        } else {
            0
        }
    }

    /// Generate the labeled matrix
    pub fn build(self) -> Result<TrainingSet, FeatureError> {
        let ventilator = Bernoulli::new(VENTILATOR_RATE).map_err(|e| FeatureError::InvalidParameter(e.to_string()))?;
        let isolation = Bernoulli::new(ISOLATION_RATE).map_err(|e| FeatureError::InvalidParameter(e.to_string()))?;

        let mut rng = StdRng::seed_from_u64(self.seed);
        let n = self.n_samples;

        let mut rows = vec![[0.0; BED_FEATURE_DIMENSION]; n];
        for row in &mut rows {
            row[0] = rng.gen::<f64>();
        }
        for row in &mut rows {
            row[1] = flag(rng.sample(ventilator));
        }
        for row in &mut rows {
            row[2] = flag(rng.sample(isolation));
        }
        for row in &mut rows {
            row[3] = sample_normal(&mut rng, 60.0, 15.0).clamp(18.0, 100.0);
        }
        for row in &mut rows {
            row[4] = rng.gen::<f64>();
        }

        let labels: Vec<usize> = rows.iter().map(Self::label).collect();
        let features = Array2::from_shape_fn((n, BED_FEATURE_DIMENSION), |(i, j)| rows[i][j]);

        debug!("Generated bed training set: {} rows (seed={})", n, self.seed);

        TrainingSet::new(features, labels)
    }
}

fn flag(set: bool) -> f64 {
    if set {
        1.0
    } else {
        0.0
    }
}

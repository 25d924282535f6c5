//! Random Forest Classifier

use crate::classifier::Classifier;
use crate::tree::{DecisionTree, TreeParams};
use crate::InferenceError;
use feature_engine::TrainingSet;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

/// Odd 64-bit constant used to spread per-tree seeds
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Random forest hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestParams {
    /// Number of trees
    pub n_estimators: usize,
    /// Maximum tree depth, unbounded if `None`
    pub max_depth: Option<usize>,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// Base seed for bootstrap sampling and feature selection
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: None,
            min_samples_split: 2,
            seed: 42,
        }
    }
}

impl ForestParams {
    /// Hyperparameters for the vitals risk classifier
    pub fn risk() -> Self {
        Self {
            n_estimators: 50,
            max_depth: Some(10),
            ..Default::default()
        }
    }

    /// Hyperparameters for the bed-category classifier
    pub fn bed() -> Self {
        Self {
            n_estimators: 30,
            max_depth: None,
            ..Default::default()
        }
    }

    fn tree_seed(&self, tree: usize) -> u64 {
        self.seed.wrapping_add((tree as u64 + 1).wrapping_mul(SEED_STRIDE))
    }
}

/// Bootstrap-aggregated ensemble of CART trees.
///
/// Each tree is grown on a bootstrap resample with `sqrt(n_features)`
/// candidate features per split. Class probabilities are the mean of the
/// trees' leaf distributions. Trees are grown in parallel; every tree draws
/// from its own seeded generator, so the fitted forest does not depend on
/// thread scheduling.
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_classes: usize,
    n_features: usize,
}

impl RandomForest {
    /// Fit a forest on an (already scaled) training set
    pub fn fit(set: &TrainingSet, n_classes: usize, params: &ForestParams) -> Result<Self, InferenceError> {
        if params.n_estimators == 0 {
            return Err(InferenceError::TrainingFailed("n_estimators must be > 0".to_string()));
        }
        if n_classes == 0 {
            return Err(InferenceError::TrainingFailed("n_classes must be > 0".to_string()));
        }
        if let Some(&label) = set.labels.iter().find(|&&l| l >= n_classes) {
            return Err(InferenceError::TrainingFailed(format!(
                "label {} outside {} classes",
                label, n_classes
            )));
        }

        let start = Instant::now();
        let n = set.len();
        let n_features = set.dimension();
        let tree_params = TreeParams {
            max_depth: params.max_depth,
            min_samples_split: params.min_samples_split.max(2),
            max_features: ((n_features as f64).sqrt() as usize).max(1),
        };

        let trees: Vec<DecisionTree> = (0..params.n_estimators)
            .into_par_iter()
            .map(|t| {
                let mut rng = StdRng::seed_from_u64(params.tree_seed(t));
                let bootstrap: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                DecisionTree::fit(&set.features, &set.labels, bootstrap, n_classes, tree_params, &mut rng)
            })
            .collect();

        info!(
            "Fitted random forest: {} trees, {} rows, {} features, {} classes in {}ms",
            trees.len(),
            n,
            n_features,
            n_classes,
            start.elapsed().as_millis()
        );

        Ok(Self {
            trees,
            n_classes,
            n_features,
        })
    }

    /// Number of trees
    pub fn n_estimators(&self) -> usize {
        self.trees.len()
    }

    /// Number of input features
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Total node count across trees
    pub fn node_count(&self) -> usize {
        self.trees.iter().map(DecisionTree::node_count).sum()
    }
}

impl Classifier for RandomForest {
    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError> {
        if features.len() != self.n_features {
            return Err(InferenceError::InvalidInputShape {
                expected: self.n_features,
                actual: features.len(),
            });
        }

        let mut proba = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (p, d) in proba.iter_mut().zip(tree.predict_distribution(features)) {
                *p += d;
            }
        }

        let n_trees = self.trees.len() as f64;
        for p in &mut proba {
            *p /= n_trees;
        }
        Ok(proba)
    }
}

//! Labeled Training Data

use crate::FeatureError;
use ndarray::{Array2, ArrayView1};

/// Labeled feature matrix: one row per sample, one class index per row
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet {
    /// Feature matrix (rows = samples)
    pub features: Array2<f64>,
    /// Class index per row
    pub labels: Vec<usize>,
}

impl TrainingSet {
    /// Create a training set, checking that every row has a label
    pub fn new(features: Array2<f64>, labels: Vec<usize>) -> Result<Self, FeatureError> {
        if features.nrows() != labels.len() {
            return Err(FeatureError::LabelMismatch {
                rows: features.nrows(),
                labels: labels.len(),
            });
        }
        if features.nrows() == 0 {
            return Err(FeatureError::EmptyDataset);
        }
        Ok(Self { features, labels })
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of feature columns
    pub fn dimension(&self) -> usize {
        self.features.ncols()
    }

    /// Feature row for one sample
    pub fn row(&self, index: usize) -> ArrayView1<'_, f64> {
        self.features.row(index)
    }

    /// Number of samples carrying each class index, sized to `n_classes`
    pub fn class_counts(&self, n_classes: usize) -> Vec<usize> {
        let mut counts = vec![0; n_classes];
        for &label in &self.labels {
            if label < n_classes {
                counts[label] += 1;
            }
        }
        counts
    }

    /// Copy of this set with features replaced (same labels)
    pub fn with_features(&self, features: Array2<f64>) -> Result<Self, FeatureError> {
        Self::new(features, self.labels.clone())
    }
}

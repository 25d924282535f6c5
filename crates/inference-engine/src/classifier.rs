//! Classifier Capability

use crate::InferenceError;

/// A trained multi-class classifier.
///
/// Implementors take an already-scaled feature vector and return one
/// probability per class, indexed by class label.
pub trait Classifier: Send + Sync {
    /// Number of classes in the output vector
    fn n_classes(&self) -> usize;

    /// Class probabilities for one feature vector
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError>;
}

//! Fitted Scaler + Classifier Pair

use crate::classifier::Classifier;
use crate::forest::{ForestParams, RandomForest};
use crate::InferenceError;
use feature_engine::{StandardScaler, TrainingSet};
use tracing::{debug, info};

/// Tolerance on the sum of a probability vector
const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

/// Immutable model state for one engine: the scaler fitted on the training
/// features and the classifier trained on the scaled features.
///
/// Built once at start-up and only read afterwards, so a single instance can
/// be shared across threads behind an `Arc`.
pub struct FittedModel {
    scaler: StandardScaler,
    classifier: Box<dyn Classifier>,
    training_rows: usize,
}

impl FittedModel {
    /// Assemble a model from an already-fitted scaler and classifier
    pub fn new(scaler: StandardScaler, classifier: Box<dyn Classifier>) -> Self {
        Self {
            scaler,
            classifier,
            training_rows: 0,
        }
    }

    /// Fit the scaler on `set`, then train a random forest on the scaled rows
    pub fn train(set: &TrainingSet, n_classes: usize, params: &ForestParams) -> Result<Self, InferenceError> {
        info!(
            "Training model: {} rows, {} features, {} classes",
            set.len(),
            set.dimension(),
            n_classes
        );

        let scaler = StandardScaler::fit(&set.features)?;
        let scaled = set.with_features(scaler.transform_matrix(&set.features)?)?;
        let forest = RandomForest::fit(&scaled, n_classes, params)?;

        Ok(Self {
            scaler,
            classifier: Box::new(forest),
            training_rows: set.len(),
        })
    }

    /// Scale raw features and return validated class probabilities
    pub fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError> {
        if features.len() != self.scaler.dimension() {
            return Err(InferenceError::InvalidInputShape {
                expected: self.scaler.dimension(),
                actual: features.len(),
            });
        }

        let scaled = self.scaler.transform(features)?;
        let proba = self.classifier.predict_proba(&scaled)?;
        self.check_probabilities(&proba)?;

        debug!("Class probabilities: {:?}", proba);
        Ok(proba)
    }

    /// Number of classes the classifier reports
    pub fn n_classes(&self) -> usize {
        self.classifier.n_classes()
    }

    /// Number of raw input features
    pub fn dimension(&self) -> usize {
        self.scaler.dimension()
    }

    /// Fitted scaler
    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    /// Rows used to train this model (0 when assembled from parts)
    pub fn training_rows(&self) -> usize {
        self.training_rows
    }

    fn check_probabilities(&self, proba: &[f64]) -> Result<(), InferenceError> {
        let expected = self.classifier.n_classes();
        if proba.len() != expected {
            return Err(InferenceError::InvalidOutputShape {
                expected,
                actual: proba.len(),
            });
        }
        if proba.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(InferenceError::InvalidProbabilities(format!("{:?}", proba)));
        }
        let sum: f64 = proba.iter().sum();
        if (sum - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
            return Err(InferenceError::InvalidProbabilities(format!("sum {}", sum)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    struct FixedClassifier(Vec<f64>);

    impl Classifier for FixedClassifier {
        fn n_classes(&self) -> usize {
            3
        }

        fn predict_proba(&self, _features: &[f64]) -> Result<Vec<f64>, InferenceError> {
            Ok(self.0.clone())
        }
    }

    fn scaler() -> StandardScaler {
        StandardScaler::fit(&array![[0.0, 0.0], [2.0, 2.0]]).unwrap()
    }

    #[test]
    fn test_passes_valid_probabilities() {
        let model = FittedModel::new(scaler(), Box::new(FixedClassifier(vec![0.2, 0.3, 0.5])));
        assert_eq!(model.predict_proba(&[1.0, 1.0]).unwrap(), vec![0.2, 0.3, 0.5]);
    }

    #[test]
    fn test_rejects_wrong_input_length() {
        let model = FittedModel::new(scaler(), Box::new(FixedClassifier(vec![0.2, 0.3, 0.5])));
        assert_eq!(
            model.predict_proba(&[1.0]).unwrap_err(),
            InferenceError::InvalidInputShape { expected: 2, actual: 1 }
        );
    }

    #[test]
    fn test_rejects_wrong_output_length() {
        let model = FittedModel::new(scaler(), Box::new(FixedClassifier(vec![0.5, 0.5])));
        assert_eq!(
            model.predict_proba(&[1.0, 1.0]).unwrap_err(),
            InferenceError::InvalidOutputShape { expected: 3, actual: 2 }
        );
    }

    #[test]
    fn test_rejects_nan_probabilities() {
        let model = FittedModel::new(scaler(), Box::new(FixedClassifier(vec![f64::NAN, 0.5, 0.5])));
        assert!(matches!(
            model.predict_proba(&[1.0, 1.0]),
            Err(InferenceError::InvalidProbabilities(_))
        ));
    }

    #[test]
    fn test_rejects_unnormalized_probabilities() {
        let model = FittedModel::new(scaler(), Box::new(FixedClassifier(vec![0.5, 0.5, 0.5])));
        assert!(matches!(
            model.predict_proba(&[1.0, 1.0]),
            Err(InferenceError::InvalidProbabilities(_))
        ));
    }

    #[test]
    fn test_train_records_rows() {
        let features = array![[0.0], [0.1], [5.0], [5.1]];
        let set = TrainingSet::new(features, vec![0, 0, 1, 1]).unwrap();
        let model = FittedModel::train(&set, 2, &ForestParams::default()).unwrap();

        assert_eq!(model.training_rows(), 4);
        assert_eq!(model.n_classes(), 2);
        assert_eq!(model.dimension(), 1);
    }
}

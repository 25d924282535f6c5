//! Standard Scaling (z-score per feature column)

use crate::FeatureError;
use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Scale floor below which a column is treated as constant
const MIN_SCALE: f64 = 1e-12;

/// Per-column standardization fitted once over a training matrix.
///
/// `transform` maps each value to `(x - mean) / std`. The standard deviation
/// is the population one; constant columns use a scale of 1 so they map to 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Column means
    mean: Vec<f64>,
    /// Column scales (standard deviations)
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Fit the scaler over the rows of `features`
    pub fn fit(features: &Array2<f64>) -> Result<Self, FeatureError> {
        let n = features.nrows();
        if n == 0 {
            return Err(FeatureError::EmptyDataset);
        }

        let mut mean = Vec::with_capacity(features.ncols());
        let mut scale = Vec::with_capacity(features.ncols());

        for column in features.axis_iter(Axis(1)) {
            let m = column.sum() / n as f64;
            let variance = column.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / n as f64;
            let std_dev = variance.sqrt();

            mean.push(m);
            scale.push(if std_dev > MIN_SCALE { std_dev } else { 1.0 });
        }

        debug!("Fitted scaler over {} rows x {} columns", n, mean.len());
        Ok(Self { mean, scale })
    }

    /// Number of feature columns the scaler was fitted on
    pub fn dimension(&self) -> usize {
        self.mean.len()
    }

    /// Column means
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /// Column scales
    pub fn scale(&self) -> &[f64] {
        &self.scale
    }

    /// Scale a single feature vector
    pub fn transform(&self, features: &[f64]) -> Result<Vec<f64>, FeatureError> {
        self.check_dimension(features.len())?;
        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (m, s))| (x - m) / s)
            .collect())
    }

    /// Scale every row of a matrix
    pub fn transform_matrix(&self, features: &Array2<f64>) -> Result<Array2<f64>, FeatureError> {
        self.check_dimension(features.ncols())?;
        let mut scaled = features.clone();
        for mut row in scaled.axis_iter_mut(Axis(0)) {
            for (j, value) in row.iter_mut().enumerate() {
                *value = (*value - self.mean[j]) / self.scale[j];
            }
        }
        Ok(scaled)
    }

    fn check_dimension(&self, actual: usize) -> Result<(), FeatureError> {
        if actual != self.mean.len() {
            return Err(FeatureError::DimensionMismatch {
                expected: self.mean.len(),
                actual,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use proptest::prelude::*;

    #[test]
    fn test_fit_mean_and_scale() {
        let features = array![[1.0, 10.0], [3.0, 10.0], [5.0, 10.0]];
        let scaler = StandardScaler::fit(&features).unwrap();

        assert!((scaler.mean()[0] - 3.0).abs() < 1e-12);
        // Population std of [1, 3, 5]
        assert!((scaler.scale()[0] - (8.0f64 / 3.0).sqrt()).abs() < 1e-12);
        // Constant column keeps unit scale
        assert_eq!(scaler.scale()[1], 1.0);
    }

    #[test]
    fn test_transform_centers_training_data() {
        let features = array![[2.0, 4.0], [4.0, 8.0], [6.0, 12.0], [8.0, 16.0]];
        let scaler = StandardScaler::fit(&features).unwrap();
        let scaled = scaler.transform_matrix(&features).unwrap();

        for column in scaled.axis_iter(Axis(1)) {
            let mean = column.sum() / column.len() as f64;
            let var = column.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / column.len() as f64;
            assert!(mean.abs() < 1e-12);
            assert!((var - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_transform_matches_matrix_rows() {
        let features = array![[60.0, 95.0], [120.0, 88.0], [80.0, 99.0]];
        let scaler = StandardScaler::fit(&features).unwrap();
        let matrix = scaler.transform_matrix(&features).unwrap();
        let single = scaler.transform(&[120.0, 88.0]).unwrap();
        assert_eq!(single, matrix.row(1).to_vec());
    }

    #[test]
    fn test_dimension_mismatch() {
        let scaler = StandardScaler::fit(&array![[1.0, 2.0, 3.0]]).unwrap();
        assert_eq!(
            scaler.transform(&[1.0, 2.0]).unwrap_err(),
            FeatureError::DimensionMismatch { expected: 3, actual: 2 }
        );
    }

    #[test]
    fn test_empty_fit_rejected() {
        let features = Array2::<f64>::zeros((0, 2));
        assert_eq!(StandardScaler::fit(&features).unwrap_err(), FeatureError::EmptyDataset);
    }

    proptest! {
        #[test]
        fn prop_column_mean_maps_to_zero(
            rows in proptest::collection::vec(proptest::array::uniform3(-500.0f64..500.0), 1..40)
        ) {
            let features = Array2::from_shape_fn((rows.len(), 3), |(i, j)| rows[i][j]);
            let scaler = StandardScaler::fit(&features).unwrap();

            let centered = scaler.transform(scaler.mean()).unwrap();
            for value in centered {
                prop_assert!(value.abs() < 1e-9);
            }
            prop_assert!(scaler.scale().iter().all(|s| *s > 0.0));
        }
    }
}

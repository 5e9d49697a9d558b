use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::ModelError;

/// A fitted standard scaler: `z = (x - mean) / std` per feature, with the
/// mean and standard deviation observed on the training set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f32>,
    std: Vec<f32>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f32>, std: Vec<f32>) -> Self {
        Self { mean, std }
    }

    /// Number of features the scaler was fitted on.
    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Returns the per-feature training mean.
    pub fn mean(&self) -> &[f32] {
        &self.mean
    }

    /// Returns the per-feature training standard deviation.
    pub fn std(&self) -> &[f32] {
        &self.std
    }

    /// Checks the deserialized scaler is internally consistent.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.mean.is_empty() {
            return Err(ModelError::InvalidArtifact("scaler has no features".into()));
        }
        if self.mean.len() != self.std.len() {
            return Err(ModelError::InvalidArtifact(format!(
                "scaler mean/std length mismatch: {} vs {}",
                self.mean.len(),
                self.std.len()
            )));
        }
        Ok(())
    }

    /// Standardizes one feature vector to the training distribution.
    ///
    /// Features with a near-zero training standard deviation are centered
    /// but not scaled, so constant columns do not blow up.
    pub fn transform(&self, features: &Array1<f32>) -> Result<Array1<f32>, ModelError> {
        if features.len() != self.mean.len() {
            return Err(ModelError::FeatureCountMismatch {
                expected: self.mean.len(),
                actual: features.len(),
            });
        }
        let mut scaled = features.clone();
        for (j, value) in scaled.iter_mut().enumerate() {
            *value -= self.mean[j];
            if self.std[j] > 1e-10 {
                *value /= self.std[j];
            }
        }
        Ok(scaled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standardizes() {
        let scaler = StandardScaler::new(vec![10.0, 0.0], vec![2.0, 1.0]);
        let x = Array1::from_vec(vec![14.0, 3.0]);
        let z = scaler.transform(&x).unwrap();
        assert!((z[0] - 2.0).abs() < 1e-6);
        assert!((z[1] - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_constant_column_not_scaled() {
        let scaler = StandardScaler::new(vec![5.0], vec![0.0]);
        let z = scaler.transform(&Array1::from_vec(vec![7.0])).unwrap();
        assert!((z[0] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_length_mismatch() {
        let scaler = StandardScaler::new(vec![0.0; 2], vec![1.0; 2]);
        let x = Array1::from_vec(vec![1.0]);
        assert!(matches!(
            scaler.transform(&x),
            Err(ModelError::FeatureCountMismatch { .. })
        ));
    }

    #[test]
    fn test_inconsistent_artifact_rejected() {
        let scaler = StandardScaler::new(vec![0.0; 3], vec![1.0; 2]);
        assert!(scaler.validate().is_err());
    }
}

use serde::{Deserialize, Serialize};

use super::feature_registry::{FEATURE_COUNT, FEATURE_NAMES};
use crate::domain::errors::ScoringError;

/// Per-feature standardisation `(x - mean) / scale`, fitted alongside a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureScaler {
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl FeatureScaler {
    pub fn new(means: Vec<f64>, scales: Vec<f64>) -> Result<Self, ScoringError> {
        let scaler = Self { means, scales };
        scaler.validate()?;
        Ok(scaler)
    }

    /// Population statistics the bundled baseline model was calibrated against
    pub fn baseline() -> Self {
        Self {
            means: vec![12.0, 150.0, 40.0, 2.5, 10.0, 3.0],
            scales: vec![8.0, 100.0, 30.0, 2.0, 10.0, 1.2],
        }
    }

    /// Checks shape and scale positivity, e.g. after deserialising an artifact
    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.means.len() != FEATURE_COUNT || self.scales.len() != FEATURE_COUNT {
            return Err(ScoringError::configuration(format!(
                "scaler must have {} means and scales, got {} and {}",
                FEATURE_COUNT,
                self.means.len(),
                self.scales.len()
            )));
        }
        for (i, (mean, scale)) in self.means.iter().zip(&self.scales).enumerate() {
            if !mean.is_finite() || !scale.is_finite() || *scale <= 0.0 {
                return Err(ScoringError::configuration(format!(
                    "scaler entry for {} is invalid (mean {}, scale {})",
                    FEATURE_NAMES[i], mean, scale
                )));
            }
        }
        Ok(())
    }

    pub fn transform(&self, vector: &[f64]) -> Vec<f64> {
        vector
            .iter()
            .zip(self.means.iter().zip(&self.scales))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_standardises() {
        let scaler = FeatureScaler::baseline();
        let scaled = scaler.transform(&[12.0, 250.0, 10.0, 2.5, 0.0, 4.2]);
        let expected = [0.0, 1.0, -1.0, 0.0, -1.0, 1.0];
        for (got, want) in scaled.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "{} != {}", got, want);
        }
    }

    #[test]
    fn test_zero_scale_rejected() {
        let result = FeatureScaler::new(vec![0.0; 6], vec![1.0, 1.0, 0.0, 1.0, 1.0, 1.0]);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("total_interactions"));
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(FeatureScaler::new(vec![0.0; 5], vec![1.0; 5]).is_err());
    }

    #[test]
    fn test_baseline_is_valid() {
        assert!(FeatureScaler::baseline().validate().is_ok());
    }
}

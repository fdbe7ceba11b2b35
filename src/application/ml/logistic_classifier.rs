use serde::{Deserialize, Serialize};

use super::predictor::ChurnClassifier;
use crate::domain::errors::ScoringError;
use crate::domain::ml::{FEATURE_COUNT, FeatureScaler};

/// Logistic churn model over standardised features.
///
/// `p = sigmoid(intercept + coefficients · scale(x))`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticClassifier {
    version: String,
    intercept: f64,
    coefficients: Vec<f64>,
    scaler: FeatureScaler,
}

impl LogisticClassifier {
    pub fn new(
        version: impl Into<String>,
        intercept: f64,
        coefficients: Vec<f64>,
        scaler: FeatureScaler,
    ) -> Result<Self, ScoringError> {
        let model = Self {
            version: version.into(),
            intercept,
            coefficients,
            scaler,
        };
        model.validate()?;
        Ok(model)
    }

    /// Bundled baseline calibrated on the reference customer population.
    ///
    /// Short tenure, low revenue, few interactions, many tickets, stale logins
    /// and low usage all push the probability up.
    pub fn baseline() -> Self {
        Self {
            version: "baseline-2024.2".to_string(),
            intercept: -1.2,
            coefficients: vec![-0.6, -0.4, -0.3, 0.5, 0.4, -0.6],
            scaler: FeatureScaler::baseline(),
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ScoringError> {
        let model: Self = serde_json::from_str(raw).map_err(|e| {
            ScoringError::configuration(format!("malformed logistic model: {}", e))
        })?;
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(ScoringError::configuration(format!(
                "logistic model needs {} coefficients, got {}",
                FEATURE_COUNT,
                self.coefficients.len()
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ScoringError::configuration(
                "logistic model has non-finite parameters",
            ));
        }
        self.scaler.validate()
    }
}

impl ChurnClassifier for LogisticClassifier {
    fn predict_proba(&self, vector: &[f64]) -> Result<f64, String> {
        if vector.len() != self.coefficients.len() {
            return Err(format!(
                "expected {} features, got {}",
                self.coefficients.len(),
                vector.len()
            ));
        }
        let logit = self.intercept
            + vector
                .iter()
                .zip(&self.coefficients)
                .map(|(x, w)| x * w)
                .sum::<f64>();
        Ok(1.0 / (1.0 + (-logit).exp()))
    }

    fn feature_scaler(&self) -> Option<&FeatureScaler> {
        Some(&self.scaler)
    }

    fn name(&self) -> &str {
        "Logistic Regression"
    }

    fn version(&self) -> &str {
        &self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_is_valid() {
        assert!(LogisticClassifier::baseline().validate().is_ok());
    }

    #[test]
    fn test_population_mean_scores_intercept() {
        let model = LogisticClassifier::baseline();
        let p = model.predict_proba(&[0.0; FEATURE_COUNT]).unwrap();
        let expected = 1.0 / (1.0 + 1.2f64.exp());
        assert!((p - expected).abs() < 1e-12);
    }

    #[test]
    fn test_new_customer_logit() {
        let model = LogisticClassifier::baseline();
        let scaled = model.scaler.transform(&[1.0, 150.0, 5.0, 2.0, 3.0, 2.5]);
        let p = model.predict_proba(&scaled).unwrap();
        let expected = 1.0 / (1.0 + 0.18f64.exp());
        assert!((p - expected).abs() < 1e-9, "p = {}", p);
        assert!((p - 0.455).abs() < 1e-3);
    }

    #[test]
    fn test_wrong_vector_length() {
        let model = LogisticClassifier::baseline();
        assert!(model.predict_proba(&[0.0; 3]).is_err());
    }

    #[test]
    fn test_json_round_trip_keeps_parameters() {
        let model = LogisticClassifier::baseline();
        let raw = serde_json::to_string(&model).unwrap();
        let loaded = LogisticClassifier::from_json_str(&raw).unwrap();
        assert_eq!(loaded, model);
    }

    #[test]
    fn test_short_coefficients_rejected() {
        let result = LogisticClassifier::new("bad", 0.0, vec![1.0; 4], FeatureScaler::baseline());
        assert!(result.is_err());
    }
}

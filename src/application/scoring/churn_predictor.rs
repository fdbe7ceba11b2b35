use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::application::ml::ChurnClassifier;
use crate::domain::churn::{ChurnResult, RiskThresholds};
use crate::domain::customer::CustomerFeatures;
use crate::domain::errors::ScoringError;
use crate::domain::ml::features_to_vector;

/// Maps customer features to a churn probability and risk tier.
///
/// The classifier is an injected, read-only capability; the predictor owns only
/// the feature transform and the tiering.
#[derive(Clone)]
pub struct ChurnPredictor {
    classifier: Arc<dyn ChurnClassifier>,
    thresholds: RiskThresholds,
}

impl ChurnPredictor {
    pub fn new(classifier: Arc<dyn ChurnClassifier>, thresholds: RiskThresholds) -> Self {
        info!(
            "ChurnPredictor using {} ({}), thresholds medium={:.2} high={:.2}",
            classifier.name(),
            classifier.version(),
            thresholds.medium(),
            thresholds.high()
        );
        Self {
            classifier,
            thresholds,
        }
    }

    pub fn thresholds(&self) -> &RiskThresholds {
        &self.thresholds
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    /// Registry-ordered feature vector, standardised with the classifier's scaler
    pub fn transform(&self, features: &CustomerFeatures) -> Vec<f64> {
        let vector = features_to_vector(features);
        match self.classifier.feature_scaler() {
            Some(scaler) => scaler.transform(&vector),
            None => vector,
        }
    }

    pub fn predict(&self, features: &CustomerFeatures) -> Result<ChurnResult, ScoringError> {
        features.validate()?;

        let vector = self.transform(features);
        let probability = self
            .classifier
            .predict_proba(&vector)
            .map_err(|reason| self.unavailable(reason))?;

        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(self.unavailable(format!(
                "classifier returned out-of-range probability {}",
                probability
            )));
        }

        let risk_level = self.thresholds.classify(probability);
        debug!(
            "Churn prediction: p={:.3} risk={} model={}",
            probability,
            risk_level,
            self.classifier.name()
        );

        Ok(ChurnResult {
            probability,
            risk_level,
        })
    }

    fn unavailable(&self, reason: String) -> ScoringError {
        warn!(
            "Churn classifier {} failed: {}",
            self.classifier.name(),
            reason
        );
        ScoringError::ModelUnavailable {
            model: self.classifier.name().to_string(),
            reason,
        }
    }
}

use super::predictor::ChurnClassifier;
use crate::domain::ml::FEATURE_COUNT;

/// Additive churn heuristic over raw (unscaled) features.
///
/// Only used when explicitly selected; it is never substituted for a failing
/// trained model.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicClassifier;

impl ChurnClassifier for HeuristicClassifier {
    fn predict_proba(&self, vector: &[f64]) -> Result<f64, String> {
        if vector.len() != FEATURE_COUNT {
            return Err(format!(
                "expected {} features, got {}",
                FEATURE_COUNT,
                vector.len()
            ));
        }
        let (tenure, revenue, interactions, last_login) =
            (vector[0], vector[1], vector[2], vector[4]);

        let mut risk: f64 = 0.0;

        // Short tenure
        if tenure < 3.0 {
            risk += 0.3;
        } else if tenure < 12.0 {
            risk += 0.1;
        }

        // Low revenue
        if revenue < 50.0 {
            risk += 0.2;
        } else if revenue < 100.0 {
            risk += 0.1;
        }

        if interactions < 5.0 {
            risk += 0.2;
        }

        // Stale logins
        if last_login > 30.0 {
            risk += 0.3;
        } else if last_login > 7.0 {
            risk += 0.1;
        }

        Ok(risk.min(1.0))
    }

    fn name(&self) -> &str {
        "Additive Heuristic"
    }

    fn version(&self) -> &str {
        "v1"
    }
}

use serde::Serialize;

use super::sub_scores::{SubScoreKind, SubScores};
use crate::domain::errors::ScoringError;

/// Relative weight of each sub-score in the composite.
///
/// Weights are a deployment-time constant; there is no runtime override.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HealthWeights {
    pub engagement: f64,
    pub usage: f64,
    pub satisfaction: f64,
    pub financial: f64,
    pub support: f64,
}

impl HealthWeights {
    pub const STANDARD: HealthWeights = HealthWeights {
        engagement: 0.30,
        usage: 0.25,
        satisfaction: 0.20,
        financial: 0.15,
        support: 0.10,
    };

    pub fn get(&self, kind: SubScoreKind) -> f64 {
        match kind {
            SubScoreKind::Engagement => self.engagement,
            SubScoreKind::Usage => self.usage,
            SubScoreKind::Satisfaction => self.satisfaction,
            SubScoreKind::Financial => self.financial,
            SubScoreKind::Support => self.support,
        }
    }

    /// Weights must be non-negative and sum to 1
    pub fn validate(&self) -> Result<(), ScoringError> {
        let mut total = 0.0;
        for kind in SubScoreKind::ALL {
            let weight = self.get(kind);
            if !weight.is_finite() || weight < 0.0 {
                return Err(ScoringError::configuration(format!(
                    "weight for {} must be a non-negative number, got {}",
                    kind, weight
                )));
            }
            total += weight;
        }
        if (total - 1.0).abs() > 1e-9 {
            return Err(ScoringError::configuration(format!(
                "health weights must sum to 1, got {}",
                total
            )));
        }
        Ok(())
    }

    /// Weighted sum of sub-scores, rounded to a whole number in [0, 100]
    pub fn composite(&self, scores: &SubScores) -> u8 {
        let raw: f64 = SubScoreKind::ALL
            .iter()
            .map(|kind| self.get(*kind) * scores.get(*kind))
            .sum();
        raw.clamp(0.0, 100.0).round() as u8
    }
}

impl Default for HealthWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::errors::ScoringError;

/// Discrete churn risk tier derived from a churn probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Probability cut-offs for risk tiers.
///
/// Lower bounds are inclusive: `medium <= p < high` is Medium.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    medium: f64,
    high: f64,
}

impl RiskThresholds {
    pub const STANDARD: RiskThresholds = RiskThresholds {
        medium: 0.20,
        high: 0.70,
    };

    pub fn new(medium: f64, high: f64) -> Result<Self, ScoringError> {
        if !(medium.is_finite() && high.is_finite()) || !(0.0 < medium && medium < high && high <= 1.0)
        {
            return Err(ScoringError::configuration(format!(
                "risk thresholds must satisfy 0 < medium < high <= 1, got medium={} high={}",
                medium, high
            )));
        }
        Ok(Self { medium, high })
    }

    pub fn medium(&self) -> f64 {
        self.medium
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn classify(&self, probability: f64) -> RiskLevel {
        if probability >= self.high {
            RiskLevel::High
        } else if probability >= self.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Outcome of a churn prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChurnResult {
    /// Positive-class probability in [0, 1]
    pub probability: f64,
    pub risk_level: RiskLevel,
}

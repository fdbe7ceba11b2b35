//! Risk tiering and health calibration parsed from environment variables.

use anyhow::{Context, Result};
use std::env;

use crate::domain::churn::RiskThresholds;
use crate::domain::errors::ScoringError;
use crate::domain::health::HealthCalibration;

/// Scoring environment configuration
#[derive(Debug, Clone)]
pub struct ScoringEnvConfig {
    pub risk_medium_threshold: f64,
    pub risk_high_threshold: f64,
    pub revenue_ceiling: f64,
    pub recency_horizon_days: f64,
}

impl Default for ScoringEnvConfig {
    fn default() -> Self {
        let calibration = HealthCalibration::default();
        Self {
            risk_medium_threshold: RiskThresholds::STANDARD.medium(),
            risk_high_threshold: RiskThresholds::STANDARD.high(),
            revenue_ceiling: calibration.revenue_ceiling,
            recency_horizon_days: calibration.recency_horizon_days,
        }
    }
}

impl ScoringEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            risk_medium_threshold: Self::parse_f64(
                "RISK_MEDIUM_THRESHOLD",
                defaults.risk_medium_threshold,
            )?,
            risk_high_threshold: Self::parse_f64(
                "RISK_HIGH_THRESHOLD",
                defaults.risk_high_threshold,
            )?,
            revenue_ceiling: Self::parse_f64("HEALTH_REVENUE_CEILING", defaults.revenue_ceiling)?,
            recency_horizon_days: Self::parse_f64(
                "HEALTH_RECENCY_HORIZON_DAYS",
                defaults.recency_horizon_days,
            )?,
        })
    }

    pub fn risk_thresholds(&self) -> Result<RiskThresholds, ScoringError> {
        RiskThresholds::new(self.risk_medium_threshold, self.risk_high_threshold)
    }

    pub fn health_calibration(&self) -> Result<HealthCalibration, ScoringError> {
        let calibration = HealthCalibration {
            revenue_ceiling: self.revenue_ceiling,
            recency_horizon_days: self.recency_horizon_days,
            ..HealthCalibration::default()
        };
        calibration.validate()?;
        Ok(calibration)
    }

    fn parse_f64(key: &str, default: f64) -> Result<f64> {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<f64>()
            .context(format!("Failed to parse {}", key))
    }
}

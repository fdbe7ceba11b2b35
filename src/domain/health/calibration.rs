use serde::{Deserialize, Serialize};

use crate::domain::errors::ScoringError;

/// Saturation points of the sub-score formulas.
///
/// Each sub-score reaches its maximum (or zero) at the value configured here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthCalibration {
    /// Days without login after which engagement is zero
    pub recency_horizon_days: f64,
    /// Interactions per month of tenure that count as fully active
    pub active_interactions_per_month: f64,
    /// Usage score mapped to 100
    pub usage_score_ceiling: f64,
    /// Satisfaction points lost per support ticket
    pub satisfaction_penalty_per_ticket: f64,
    /// Monthly revenue that earns the full revenue share of the financial score
    pub revenue_ceiling: f64,
    /// Financial points earned per month of tenure (capped at 30)
    pub tenure_points_per_month: f64,
    /// Ticket count at which the ticket share of the support score reaches zero
    pub support_ticket_ceiling: f64,
    /// Tenure that earns the full stability share of the support score
    pub support_tenure_months: f64,
}

impl Default for HealthCalibration {
    fn default() -> Self {
        Self {
            recency_horizon_days: 30.0,
            active_interactions_per_month: 4.0,
            usage_score_ceiling: 5.0,
            satisfaction_penalty_per_ticket: 10.0,
            revenue_ceiling: 250.0,
            tenure_points_per_month: 2.0,
            support_ticket_ceiling: 8.0,
            support_tenure_months: 12.0,
        }
    }
}

impl HealthCalibration {
    pub fn validate(&self) -> Result<(), ScoringError> {
        let entries = [
            ("recency_horizon_days", self.recency_horizon_days),
            ("active_interactions_per_month", self.active_interactions_per_month),
            ("usage_score_ceiling", self.usage_score_ceiling),
            ("satisfaction_penalty_per_ticket", self.satisfaction_penalty_per_ticket),
            ("revenue_ceiling", self.revenue_ceiling),
            ("tenure_points_per_month", self.tenure_points_per_month),
            ("support_ticket_ceiling", self.support_ticket_ceiling),
            ("support_tenure_months", self.support_tenure_months),
        ];
        for (name, value) in entries {
            if !value.is_finite() || value <= 0.0 {
                return Err(ScoringError::configuration(format!(
                    "health calibration {} must be positive, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_calibration_valid() {
        assert!(HealthCalibration::default().validate().is_ok());
    }

    #[test]
    fn test_zero_ceiling_rejected() {
        let calibration = HealthCalibration {
            revenue_ceiling: 0.0,
            ..Default::default()
        };
        let err = calibration.validate().unwrap_err();
        assert!(err.to_string().contains("revenue_ceiling"));
    }
}

use tracing::debug;

use crate::domain::customer::CustomerFeatures;
use crate::domain::errors::ScoringError;
use crate::domain::health::{HealthCalibration, HealthResult, HealthWeights, SubScores};

/// Share of the financial score earned by revenue; tenure earns the rest
const FINANCIAL_REVENUE_SHARE: f64 = 70.0;
const FINANCIAL_TENURE_SHARE: f64 = 30.0;
/// Share of the support score driven by ticket volume; tenure stability earns the rest
const SUPPORT_TICKET_SHARE: f64 = 70.0;
const SUPPORT_TENURE_SHARE: f64 = 30.0;

/// Deterministic health scoring: five saturating sub-scores and a weighted composite.
#[derive(Debug, Clone)]
pub struct HealthScorer {
    calibration: HealthCalibration,
}

impl HealthScorer {
    pub fn new(calibration: HealthCalibration) -> Result<Self, ScoringError> {
        HealthWeights::STANDARD.validate()?;
        calibration.validate()?;
        Ok(Self { calibration })
    }

    pub fn calibration(&self) -> &HealthCalibration {
        &self.calibration
    }

    pub fn weights(&self) -> &'static HealthWeights {
        &HealthWeights::STANDARD
    }

    pub fn score(&self, features: &CustomerFeatures) -> Result<HealthResult, ScoringError> {
        features.validate()?;

        let sub_scores = self.sub_scores(features);
        let result = HealthResult::from_sub_scores(sub_scores, &HealthWeights::STANDARD);

        debug!(
            "Health score: composite={} status={} engagement={:.1} usage={:.1} satisfaction={:.1} financial={:.1} support={:.1}",
            result.composite,
            result.status,
            sub_scores.engagement,
            sub_scores.usage,
            sub_scores.satisfaction,
            sub_scores.financial,
            sub_scores.support
        );

        Ok(result)
    }

    pub fn sub_scores(&self, features: &CustomerFeatures) -> SubScores {
        SubScores {
            engagement: self.engagement(features),
            usage: self.usage(features),
            satisfaction: self.satisfaction(features),
            financial: self.financial(features),
            support: self.support(features),
        }
    }

    /// Recency gates everything: no login within the horizon means zero.
    fn engagement(&self, f: &CustomerFeatures) -> f64 {
        let c = &self.calibration;
        let recency = (1.0 - f.last_login_days / c.recency_horizon_days).clamp(0.0, 1.0);
        let monthly_rate = f.total_interactions / f.tenure_months.max(1.0);
        let activity = (monthly_rate / c.active_interactions_per_month).min(1.0);
        clamp_score(100.0 * recency * (0.5 + 0.5 * activity))
    }

    fn usage(&self, f: &CustomerFeatures) -> f64 {
        clamp_score(100.0 * f.feature_usage_score / self.calibration.usage_score_ceiling)
    }

    fn satisfaction(&self, f: &CustomerFeatures) -> f64 {
        clamp_score(100.0 - self.calibration.satisfaction_penalty_per_ticket * f.support_tickets)
    }

    fn financial(&self, f: &CustomerFeatures) -> f64 {
        let c = &self.calibration;
        let revenue = FINANCIAL_REVENUE_SHARE * (f.monthly_revenue / c.revenue_ceiling).min(1.0);
        let tenure = (c.tenure_points_per_month * f.tenure_months).min(FINANCIAL_TENURE_SHARE);
        clamp_score(revenue + tenure)
    }

    fn support(&self, f: &CustomerFeatures) -> f64 {
        let c = &self.calibration;
        let tickets = SUPPORT_TICKET_SHARE * (1.0 - f.support_tickets / c.support_ticket_ceiling).max(0.0);
        let stability = SUPPORT_TENURE_SHARE * (f.tenure_months / c.support_tenure_months).min(1.0);
        clamp_score(tickets + stability)
    }
}

fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::health::HealthStatus;

    fn scorer() -> HealthScorer {
        HealthScorer::new(HealthCalibration::default()).unwrap()
    }

    fn base() -> CustomerFeatures {
        CustomerFeatures {
            tenure_months: 12.0,
            monthly_revenue: 200.0,
            total_interactions: 45.0,
            support_tickets: 2.0,
            last_login_days: 3.0,
            feature_usage_score: 3.8,
        }
    }

    #[test]
    fn test_new_customer_sub_scores() {
        let features = CustomerFeatures {
            tenure_months: 1.0,
            monthly_revenue: 150.0,
            total_interactions: 5.0,
            support_tickets: 2.0,
            last_login_days: 3.0,
            feature_usage_score: 2.5,
        };
        let s = scorer().sub_scores(&features);
        assert!((s.engagement - 90.0).abs() < 1e-9);
        assert!((s.usage - 50.0).abs() < 1e-9);
        assert!((s.satisfaction - 80.0).abs() < 1e-9);
        assert!((s.financial - 44.0).abs() < 1e-9);
        assert!((s.support - 55.0).abs() < 1e-9);

        let result = scorer().score(&features).unwrap();
        assert_eq!(result.composite, 68);
        assert_eq!(result.status, HealthStatus::Fair);
    }

    #[test]
    fn test_stale_login_zeroes_engagement() {
        let features = CustomerFeatures {
            total_interactions: 500.0,
            last_login_days: 45.0,
            ..base()
        };
        assert_eq!(scorer().sub_scores(&features).engagement, 0.0);
    }

    #[test]
    fn test_usage_saturates_at_ceiling() {
        let s = scorer().sub_scores(&CustomerFeatures {
            feature_usage_score: 5.0,
            ..base()
        });
        assert_eq!(s.usage, 100.0);
        let s = scorer().sub_scores(&CustomerFeatures {
            feature_usage_score: 7.5,
            ..base()
        });
        assert_eq!(s.usage, 100.0);
    }

    #[test]
    fn test_satisfaction_saturates_at_zero() {
        let s = scorer().sub_scores(&CustomerFeatures {
            support_tickets: 25.0,
            ..base()
        });
        assert_eq!(s.satisfaction, 0.0);
    }

    #[test]
    fn test_long_tenured_low_ticket_support_near_full() {
        let s = scorer().sub_scores(&CustomerFeatures {
            tenure_months: 36.0,
            support_tickets: 0.0,
            ..base()
        });
        assert_eq!(s.support, 100.0);
    }

    #[test]
    fn test_financial_saturates_at_revenue_ceiling() {
        let s = scorer().sub_scores(&CustomerFeatures {
            monthly_revenue: 10_000.0,
            tenure_months: 24.0,
            ..base()
        });
        assert_eq!(s.financial, 100.0);
    }

    #[test]
    fn test_sub_scores_are_monotonic() {
        let scorer = scorer();
        let mut previous = scorer.sub_scores(&base());
        for step in 1..=40 {
            let step = step as f64;
            let current = scorer.sub_scores(&CustomerFeatures {
                total_interactions: 45.0 + step,
                monthly_revenue: 200.0 + step * 10.0,
                feature_usage_score: 3.8 + step * 0.05,
                ..base()
            });
            assert!(current.engagement >= previous.engagement);
            assert!(current.financial >= previous.financial);
            assert!(current.usage >= previous.usage);
            previous = current;
        }

        let mut previous = scorer.sub_scores(&base());
        for tickets in 3..=20 {
            let current = scorer.sub_scores(&CustomerFeatures {
                support_tickets: tickets as f64,
                ..base()
            });
            assert!(current.satisfaction <= previous.satisfaction);
            assert!(current.support <= previous.support);
            previous = current;
        }
    }

    #[test]
    fn test_composite_recomputes_from_sub_scores() {
        let result = scorer().score(&base()).unwrap();
        assert_eq!(
            HealthWeights::STANDARD.composite(&result.sub_scores),
            result.composite
        );
        assert_eq!(HealthStatus::from_composite(result.composite), result.status);
    }

    #[test]
    fn test_invalid_features_rejected() {
        let err = scorer()
            .score(&CustomerFeatures {
                monthly_revenue: -10.0,
                ..base()
            })
            .unwrap_err();
        assert_eq!(err.kind(), "validation");
        assert_eq!(err.field(), Some("monthly_revenue"));
    }

    #[test]
    fn test_invalid_calibration_rejected() {
        let result = HealthScorer::new(HealthCalibration {
            recency_horizon_days: -1.0,
            ..Default::default()
        });
        assert!(result.is_err());
    }
}

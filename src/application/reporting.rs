use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::assessment::{BatchEntry, CustomerAssessment};
use crate::domain::churn::RiskLevel;
use crate::domain::health::HealthStatus;

/// Portfolio-level view over a batch of assessments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_customers: usize,
    pub assessed: usize,
    pub failures: usize,
    pub high_risk_customers: usize,
    /// Mean churn probability over assessed customers
    pub average_churn_probability: f64,
    /// Mean health composite, rounded to 2 decimals
    pub average_health_score: f64,
    pub health_distribution: BTreeMap<HealthStatus, usize>,
    pub risk_distribution: BTreeMap<RiskLevel, usize>,
    pub generated_at: DateTime<Utc>,
}

impl PortfolioSummary {
    pub fn from_entries(entries: &[BatchEntry]) -> Self {
        let assessments: Vec<&CustomerAssessment> =
            entries.iter().filter_map(|e| e.outcome.as_ref().ok()).collect();

        let mut health_distribution: BTreeMap<HealthStatus, usize> =
            HealthStatus::ALL.iter().map(|s| (*s, 0)).collect();
        let mut risk_distribution: BTreeMap<RiskLevel, usize> =
            RiskLevel::ALL.iter().map(|r| (*r, 0)).collect();

        for a in &assessments {
            *health_distribution.entry(a.health.status).or_default() += 1;
            *risk_distribution.entry(a.churn.risk_level).or_default() += 1;
        }

        let assessed = assessments.len();
        let (average_churn_probability, average_health_score) = if assessed == 0 {
            (0.0, 0.0)
        } else {
            let n = assessed as f64;
            let churn = assessments.iter().map(|a| a.churn.probability).sum::<f64>() / n;
            let health = assessments
                .iter()
                .map(|a| f64::from(a.health.composite))
                .sum::<f64>()
                / n;
            (churn, round2(health))
        };

        Self {
            total_customers: entries.len(),
            assessed,
            failures: entries.len() - assessed,
            high_risk_customers: risk_distribution
                .get(&RiskLevel::High)
                .copied()
                .unwrap_or(0),
            average_churn_probability,
            average_health_score,
            health_distribution,
            risk_distribution,
            generated_at: Utc::now(),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::churn::ChurnResult;
    use crate::domain::errors::ScoringError;
    use crate::domain::health::{HealthResult, SubScores};

    fn entry(id: &str, probability: f64, risk_level: RiskLevel, composite: u8) -> BatchEntry {
        let score = f64::from(composite);
        BatchEntry {
            customer_id: id.to_string(),
            outcome: Ok(CustomerAssessment {
                customer_id: Some(id.to_string()),
                churn: ChurnResult {
                    probability,
                    risk_level,
                },
                health: HealthResult {
                    sub_scores: SubScores {
                        engagement: score,
                        usage: score,
                        satisfaction: score,
                        financial: score,
                        support: score,
                    },
                    composite,
                    status: HealthStatus::from_composite(composite),
                },
                recommendations: Vec::new(),
            }),
        }
    }

    #[test]
    fn test_summary_aggregates() {
        let entries = vec![
            entry("a", 0.9, RiskLevel::High, 27),
            entry("b", 0.1, RiskLevel::Low, 93),
            entry("c", 0.5, RiskLevel::Medium, 68),
            BatchEntry::failed("d", ScoringError::validation("monthly_revenue", "must be >= 0")),
        ];
        let summary = PortfolioSummary::from_entries(&entries);

        assert_eq!(summary.total_customers, 4);
        assert_eq!(summary.assessed, 3);
        assert_eq!(summary.failures, 1);
        assert_eq!(summary.high_risk_customers, 1);
        assert!((summary.average_churn_probability - 0.5).abs() < 1e-9);
        assert_eq!(summary.average_health_score, 62.67);
        assert_eq!(summary.health_distribution[&HealthStatus::Poor], 1);
        assert_eq!(summary.health_distribution[&HealthStatus::Good], 0);
        assert_eq!(summary.risk_distribution[&RiskLevel::Medium], 1);
    }

    #[test]
    fn test_empty_batch() {
        let summary = PortfolioSummary::from_entries(&[]);
        assert_eq!(summary.total_customers, 0);
        assert_eq!(summary.average_health_score, 0.0);
        assert_eq!(summary.health_distribution.len(), 4);
    }
}

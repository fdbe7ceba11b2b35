use churnwatch::application::scoring::InterventionRecommender;
use churnwatch::domain::churn::{ChurnResult, RiskLevel};
use churnwatch::domain::customer::CustomerFeatures;
use churnwatch::domain::health::{HealthResult, HealthStatus, HealthWeights, SubScores};
use churnwatch::domain::recommendation::{Recommendation, RuleTable};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

const CUSTOM_RULES: &str = include_str!("fixtures/custom_rules.toml");

fn tables() -> Vec<RuleTable> {
    vec![
        RuleTable::standard().unwrap(),
        RuleTable::from_toml_str(CUSTOM_RULES).unwrap(),
    ]
}

fn customers() -> Vec<CustomerFeatures> {
    let mut customers = Vec::new();
    for tenure in [1.0, 6.0, 36.0] {
        for tickets in [0.0, 3.0, 9.0] {
            for login in [1.0, 14.0, 45.0] {
                customers.push(CustomerFeatures {
                    tenure_months: tenure,
                    monthly_revenue: 40.0 * tenure,
                    total_interactions: tenure * 2.0 + tickets,
                    support_tickets: tickets,
                    last_login_days: login,
                    feature_usage_score: 5.0 / (1.0 + tickets),
                });
            }
        }
    }
    customers
}

/// Even and lopsided sub-score profiles covering every health status
fn health_profiles() -> Vec<HealthResult> {
    let mut profiles = Vec::new();
    for base in [10.0, 40.0, 55.0, 65.0, 75.0, 85.0, 92.0, 100.0] {
        for skew in [0.0, 30.0] {
            let low = f64::max(base - skew, 0.0);
            let high = f64::min(base + skew, 100.0);
            profiles.push(HealthResult::from_sub_scores(
                SubScores {
                    engagement: low,
                    usage: high,
                    satisfaction: base,
                    financial: low,
                    support: high,
                },
                &HealthWeights::STANDARD,
            ));
        }
    }
    profiles
}

fn churn_for(level: RiskLevel) -> ChurnResult {
    let probability = match level {
        RiskLevel::Low => 0.08,
        RiskLevel::Medium => 0.45,
        RiskLevel::High => 0.88,
    };
    ChurnResult {
        probability,
        risk_level: level,
    }
}

fn is_ranked(recs: &[Recommendation]) -> bool {
    recs.windows(2).all(|pair| {
        pair[0].priority > pair[1].priority
            || (pair[0].priority == pair[1].priority && pair[0].category <= pair[1].category)
    })
}

#[test]
fn test_recommendation_guarantees_hold_for_every_tier_pair() {
    let mut covered = BTreeSet::new();

    for table in tables() {
        for cap in 1..=5 {
            let capped = table.clone().with_max_recommendations(cap).unwrap();
            let recommender = InterventionRecommender::new(Arc::new(capped));

            for features in customers() {
                for health in health_profiles() {
                    for level in RiskLevel::ALL {
                        covered.insert((level, health.status));
                        let churn = churn_for(level);
                        let recs = recommender.recommend(&features, &churn, &health);
                        let context = format!(
                            "table={} cap={} risk={} status={} features={:?}",
                            table.version, cap, level, health.status, features
                        );

                        assert!(recs.len() <= cap, "{}", context);
                        if level == RiskLevel::High || health.status.is_at_risk() {
                            assert!(!recs.is_empty(), "{}", context);
                        }
                        if level == RiskLevel::High {
                            assert!(
                                recs.iter().any(|r| r.category.is_retention()),
                                "no retention item: {}",
                                context
                            );
                        }

                        let actions: HashSet<&str> =
                            recs.iter().map(|r| r.action.as_str()).collect();
                        assert_eq!(actions.len(), recs.len(), "{}", context);
                        assert!(is_ranked(&recs), "{}", context);
                    }
                }
            }
        }
    }

    let expected: BTreeSet<_> = RiskLevel::ALL
        .into_iter()
        .flat_map(|level| HealthStatus::ALL.into_iter().map(move |status| (level, status)))
        .collect();
    assert_eq!(covered, expected);
}

#[test]
fn test_healthy_low_risk_gets_at_most_one_maintenance_item() {
    let features = CustomerFeatures {
        tenure_months: 24.0,
        monthly_revenue: 350.0,
        total_interactions: 85.0,
        support_tickets: 1.0,
        last_login_days: 1.0,
        feature_usage_score: 4.8,
    };
    let recommender = InterventionRecommender::new(Arc::new(RuleTable::standard().unwrap()));

    for health in health_profiles() {
        if health.status < HealthStatus::Excellent {
            continue;
        }
        let recs = recommender.recommend(&features, &churn_for(RiskLevel::Low), &health);
        assert!(recs.len() <= 1, "status={} recs={:?}", health.status, recs);
    }
}

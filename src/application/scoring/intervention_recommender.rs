use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::churn::{ChurnResult, RiskLevel};
use crate::domain::customer::CustomerFeatures;
use crate::domain::health::HealthResult;
use crate::domain::recommendation::{
    FallbackAction, Priority, Recommendation, RuleContext, RuleTable,
};

pub const AT_RISK_FALLBACK_ID: &str = "fallback-at-risk";
pub const HEALTHY_FALLBACK_ID: &str = "fallback-healthy";

/// Turns a churn tier and health status into a ranked list of interventions.
///
/// Ranking: priority descending, then canonical category order, then rule
/// table order. Duplicate actions keep their highest ranked occurrence.
#[derive(Debug, Clone)]
pub struct InterventionRecommender {
    table: Arc<RuleTable>,
}

impl InterventionRecommender {
    pub fn new(table: Arc<RuleTable>) -> Self {
        info!(
            "InterventionRecommender using rule table {} ({} rules, max {} per customer)",
            table.version,
            table.rules.len(),
            table.max_recommendations()
        );
        Self { table }
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    pub fn recommend(
        &self,
        features: &CustomerFeatures,
        churn: &ChurnResult,
        health: &HealthResult,
    ) -> Vec<Recommendation> {
        let ctx = RuleContext::new(features, churn, health);

        let mut recommendations: Vec<Recommendation> = self
            .table
            .rules
            .iter()
            .filter(|rule| rule.matches(&ctx))
            .inspect(|rule| debug!("Rule {} matched ({} {})", rule.id, rule.priority, rule.category))
            .map(|rule| Recommendation {
                category: rule.category,
                action: rule.action.clone(),
                priority: rule.priority,
                rule_id: rule.id.clone(),
            })
            .collect();

        self.apply_fallbacks(&mut recommendations, churn, health);

        rank(&mut recommendations);

        let ranked = recommendations.clone();
        let mut seen = HashSet::new();
        recommendations.retain(|r| seen.insert(r.action.clone()));
        recommendations.truncate(self.table.max_recommendations());

        if churn.risk_level == RiskLevel::High {
            self.keep_retention(&mut recommendations, &ranked);
        }

        debug!(
            "Recommended {} interventions (risk={}, status={})",
            recommendations.len(),
            churn.risk_level,
            health.status
        );
        recommendations
    }

    fn apply_fallbacks(
        &self,
        recommendations: &mut Vec<Recommendation>,
        churn: &ChurnResult,
        health: &HealthResult,
    ) {
        let fallback = &self.table.fallback;
        let high_risk = churn.risk_level == RiskLevel::High;

        // High risk must always surface a retention action, ranked with the other High items
        if high_risk && !recommendations.iter().any(|r| r.category.is_retention()) {
            recommendations.push(fallback_recommendation(
                &fallback.at_risk,
                Priority::High,
                AT_RISK_FALLBACK_ID,
            ));
            return;
        }

        if !recommendations.is_empty() {
            return;
        }

        if health.status.is_at_risk() {
            recommendations.push(fallback_recommendation(
                &fallback.at_risk,
                fallback.at_risk.priority,
                AT_RISK_FALLBACK_ID,
            ));
        } else if let Some(healthy) = &fallback.healthy {
            recommendations.push(fallback_recommendation(
                healthy,
                healthy.priority,
                HEALTHY_FALLBACK_ID,
            ));
        }
    }

    /// Dedup and the cap can push every retention item out of a High risk list.
    /// The last slot then goes to the best ranked retention item left over, or to
    /// the at-risk fallback promoted to High.
    fn keep_retention(
        &self,
        recommendations: &mut Vec<Recommendation>,
        ranked: &[Recommendation],
    ) {
        if recommendations.iter().any(|r| r.category.is_retention()) {
            return;
        }

        let replacement = ranked
            .iter()
            .find(|r| {
                r.category.is_retention() && !recommendations.iter().any(|k| k.action == r.action)
            })
            .cloned()
            .unwrap_or_else(|| {
                fallback_recommendation(
                    &self.table.fallback.at_risk,
                    Priority::High,
                    AT_RISK_FALLBACK_ID,
                )
            });

        recommendations.retain(|r| r.action != replacement.action);
        if recommendations.len() >= self.table.max_recommendations() {
            recommendations.pop();
        }
        debug!(
            "Retention item {} kept in place of lower ranked interventions",
            replacement.rule_id
        );
        recommendations.push(replacement);
        rank(recommendations);
    }
}

// Stable sort keeps table order within equal (priority, category)
fn rank(recommendations: &mut [Recommendation]) {
    recommendations.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| a.category.cmp(&b.category))
    });
}

fn fallback_recommendation(action: &FallbackAction, priority: Priority, id: &str) -> Recommendation {
    Recommendation {
        category: action.category,
        action: action.action.clone(),
        priority,
        rule_id: id.to_string(),
    }
}

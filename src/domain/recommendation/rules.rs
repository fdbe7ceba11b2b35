//! Recommendation rule table.
//!
//! Rules are data: an ordered list of (conditions, category, action, priority)
//! entries loaded from TOML. The standard table ships inside the crate and can
//! be replaced by a file at deployment time.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::types::{InterventionCategory, Priority};
use crate::domain::churn::{ChurnResult, RiskLevel};
use crate::domain::customer::{CustomerFeatures, FeatureField};
use crate::domain::errors::ScoringError;
use crate::domain::health::{HealthResult, HealthStatus, SubScoreKind};

const STANDARD_RULES: &str = include_str!("standard_rules.toml");

const DEFAULT_MAX_RECOMMENDATIONS: usize = 5;

/// Inputs every condition is evaluated against
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub features: &'a CustomerFeatures,
    pub churn: &'a ChurnResult,
    pub health: &'a HealthResult,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        features: &'a CustomerFeatures,
        churn: &'a ChurnResult,
        health: &'a HealthResult,
    ) -> Self {
        Self {
            features,
            churn,
            health,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Lt,
    Le,
    Gt,
    Ge,
}

impl Comparison {
    pub fn apply(&self, lhs: f64, rhs: f64) -> bool {
        match self {
            Comparison::Lt => lhs < rhs,
            Comparison::Le => lhs <= rhs,
            Comparison::Gt => lhs > rhs,
            Comparison::Ge => lhs >= rhs,
        }
    }
}

/// A single predicate over the rule context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    RiskAtLeast {
        level: RiskLevel,
    },
    RiskAtMost {
        level: RiskLevel,
    },
    StatusAtLeast {
        status: HealthStatus,
    },
    StatusAtMost {
        status: HealthStatus,
    },
    Feature {
        field: FeatureField,
        op: Comparison,
        value: f64,
    },
    SubScore {
        score: SubScoreKind,
        op: Comparison,
        value: f64,
    },
    /// `lower` trails `higher` by more than `margin` points
    SubScoreGap {
        lower: SubScoreKind,
        higher: SubScoreKind,
        margin: f64,
    },
}

impl Condition {
    pub fn holds(&self, ctx: &RuleContext<'_>) -> bool {
        match self {
            Condition::RiskAtLeast { level } => ctx.churn.risk_level >= *level,
            Condition::RiskAtMost { level } => ctx.churn.risk_level <= *level,
            Condition::StatusAtLeast { status } => ctx.health.status >= *status,
            Condition::StatusAtMost { status } => ctx.health.status <= *status,
            Condition::Feature { field, op, value } => op.apply(ctx.features.get(*field), *value),
            Condition::SubScore { score, op, value } => {
                op.apply(ctx.health.sub_scores.get(*score), *value)
            }
            Condition::SubScoreGap {
                lower,
                higher,
                margin,
            } => {
                let scores = &ctx.health.sub_scores;
                scores.get(*higher) - scores.get(*lower) > *margin
            }
        }
    }

    fn threshold(&self) -> Option<f64> {
        match self {
            Condition::Feature { value, .. } | Condition::SubScore { value, .. } => Some(*value),
            Condition::SubScoreGap { margin, .. } => Some(*margin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub category: InterventionCategory,
    pub action: String,
    pub priority: Priority,
    /// Every condition must hold
    #[serde(default)]
    pub all: Vec<Condition>,
    /// At least one condition must hold (ignored when empty)
    #[serde(default)]
    pub any: Vec<Condition>,
}

impl Rule {
    pub fn matches(&self, ctx: &RuleContext<'_>) -> bool {
        self.all.iter().all(|c| c.holds(ctx))
            && (self.any.is_empty() || self.any.iter().any(|c| c.holds(ctx)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackAction {
    pub category: InterventionCategory,
    pub action: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fallbacks {
    /// Used when an at-risk customer matched no retention rule
    pub at_risk: FallbackAction,
    /// Optional "maintain engagement" action for customers that matched nothing
    pub healthy: Option<FallbackAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSettings {
    pub max_recommendations: Option<usize>,
}

/// Versioned, validated set of recommendation rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTable {
    pub version: String,
    #[serde(default)]
    pub settings: RuleSettings,
    pub rules: Vec<Rule>,
    pub fallback: Fallbacks,
}

impl RuleTable {
    /// The table bundled with the crate
    pub fn standard() -> Result<Self, ScoringError> {
        Self::from_toml_str(STANDARD_RULES)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ScoringError> {
        let table: RuleTable = toml::from_str(raw)
            .map_err(|e| ScoringError::configuration(format!("malformed rule table: {}", e)))?;
        table.validate()?;
        Ok(table)
    }

    pub fn max_recommendations(&self) -> usize {
        self.settings
            .max_recommendations
            .unwrap_or(DEFAULT_MAX_RECOMMENDATIONS)
    }

    pub fn with_max_recommendations(mut self, max: usize) -> Result<Self, ScoringError> {
        self.settings.max_recommendations = Some(max);
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.version.trim().is_empty() {
            return Err(ScoringError::configuration("rule table version is empty"));
        }
        if self.rules.is_empty() {
            return Err(ScoringError::configuration("rule table has no rules"));
        }
        if self.settings.max_recommendations == Some(0) {
            return Err(ScoringError::configuration(
                "max_recommendations must be at least 1",
            ));
        }

        let mut seen = HashSet::new();
        for rule in &self.rules {
            if rule.id.trim().is_empty() {
                return Err(ScoringError::configuration("rule with empty id"));
            }
            if !seen.insert(rule.id.as_str()) {
                return Err(ScoringError::configuration(format!(
                    "duplicate rule id '{}'",
                    rule.id
                )));
            }
            if rule.action.trim().is_empty() {
                return Err(ScoringError::configuration(format!(
                    "rule '{}' has an empty action",
                    rule.id
                )));
            }
            if rule.all.is_empty() && rule.any.is_empty() {
                return Err(ScoringError::configuration(format!(
                    "rule '{}' has no conditions",
                    rule.id
                )));
            }
            for condition in rule.all.iter().chain(&rule.any) {
                if condition.threshold().is_some_and(|value| !value.is_finite()) {
                    return Err(ScoringError::configuration(format!(
                        "rule '{}' has a non-finite threshold",
                        rule.id
                    )));
                }
            }
        }

        let at_risk = &self.fallback.at_risk;
        if !at_risk.category.is_retention() {
            return Err(ScoringError::configuration(format!(
                "at-risk fallback must be personal-outreach or product-education, got {}",
                at_risk.category
            )));
        }
        let fallback_actions =
            std::iter::once(at_risk).chain(self.fallback.healthy.as_ref());
        for fallback in fallback_actions {
            if fallback.action.trim().is_empty() {
                return Err(ScoringError::configuration("fallback with an empty action"));
            }
        }

        Ok(())
    }
}

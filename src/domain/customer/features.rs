use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::domain::errors::ScoringError;

/// Raw behavioural/account fields of a customer.
///
/// Field names are the wire contract of the scoring API and must not be renamed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CustomerFeatures {
    /// Account age in months
    pub tenure_months: f64,
    /// Monthly revenue in currency units
    pub monthly_revenue: f64,
    /// Lifetime interaction count
    pub total_interactions: f64,
    /// Recent support ticket count
    pub support_tickets: f64,
    /// Days since last login
    pub last_login_days: f64,
    /// Breadth/depth of product usage (observed range ~0-5)
    pub feature_usage_score: f64,
}

/// Identifies one field of [`CustomerFeatures`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureField {
    TenureMonths,
    MonthlyRevenue,
    TotalInteractions,
    SupportTickets,
    LastLoginDays,
    FeatureUsageScore,
}

impl FeatureField {
    pub const ALL: [FeatureField; 6] = [
        FeatureField::TenureMonths,
        FeatureField::MonthlyRevenue,
        FeatureField::TotalInteractions,
        FeatureField::SupportTickets,
        FeatureField::LastLoginDays,
        FeatureField::FeatureUsageScore,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FeatureField::TenureMonths => "tenure_months",
            FeatureField::MonthlyRevenue => "monthly_revenue",
            FeatureField::TotalInteractions => "total_interactions",
            FeatureField::SupportTickets => "support_tickets",
            FeatureField::LastLoginDays => "last_login_days",
            FeatureField::FeatureUsageScore => "feature_usage_score",
        }
    }

    /// Count fields only accept whole numbers
    pub fn is_count(&self) -> bool {
        matches!(
            self,
            FeatureField::TotalInteractions
                | FeatureField::SupportTickets
                | FeatureField::LastLoginDays
        )
    }
}

impl fmt::Display for FeatureField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl CustomerFeatures {
    pub fn get(&self, field: FeatureField) -> f64 {
        match field {
            FeatureField::TenureMonths => self.tenure_months,
            FeatureField::MonthlyRevenue => self.monthly_revenue,
            FeatureField::TotalInteractions => self.total_interactions,
            FeatureField::SupportTickets => self.support_tickets,
            FeatureField::LastLoginDays => self.last_login_days,
            FeatureField::FeatureUsageScore => self.feature_usage_score,
        }
    }

    /// Checks every field is finite, non-negative and, for counts, whole.
    ///
    /// Values are never clamped: the first offending field is reported.
    pub fn validate(&self) -> Result<(), ScoringError> {
        for field in FeatureField::ALL {
            validate_value(field, self.get(field))?;
        }
        Ok(())
    }

    /// Parses and validates a JSON object carrying the six feature fields.
    ///
    /// Unknown keys (customer ids, precomputed scores) are ignored.
    pub fn from_json(value: &Value) -> Result<Self, ScoringError> {
        let object = value
            .as_object()
            .ok_or_else(|| ScoringError::validation("features", "expected a JSON object"))?;

        let read = |field: FeatureField| -> Result<f64, ScoringError> {
            match object.get(field.name()) {
                None | Some(Value::Null) => {
                    Err(ScoringError::validation(field.name(), "is required"))
                }
                Some(Value::Number(n)) => n
                    .as_f64()
                    .ok_or_else(|| ScoringError::validation(field.name(), "must be numeric")),
                Some(other) => Err(ScoringError::validation(
                    field.name(),
                    format!("must be numeric, got {}", json_type_name(other)),
                )),
            }
        };

        let features = Self {
            tenure_months: read(FeatureField::TenureMonths)?,
            monthly_revenue: read(FeatureField::MonthlyRevenue)?,
            total_interactions: read(FeatureField::TotalInteractions)?,
            support_tickets: read(FeatureField::SupportTickets)?,
            last_login_days: read(FeatureField::LastLoginDays)?,
            feature_usage_score: read(FeatureField::FeatureUsageScore)?,
        };
        features.validate()?;
        Ok(features)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ScoringError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| ScoringError::validation("features", format!("malformed JSON: {}", e)))?;
        Self::from_json(&value)
    }
}

fn validate_value(field: FeatureField, value: f64) -> Result<(), ScoringError> {
    if !value.is_finite() {
        return Err(ScoringError::validation(
            field.name(),
            "must be a finite number",
        ));
    }
    if value < 0.0 {
        return Err(ScoringError::validation(
            field.name(),
            format!("must be non-negative, got {}", value),
        ));
    }
    if field.is_count() && value.fract() != 0.0 {
        return Err(ScoringError::validation(
            field.name(),
            format!("must be a whole number, got {}", value),
        ));
    }
    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

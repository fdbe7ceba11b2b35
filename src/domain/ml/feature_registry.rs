use crate::domain::customer::{CustomerFeatures, FeatureField};

/// Ordered list of feature names.
/// This order MUST match the column order the churn models were trained on.
/// Any change here is a breaking change for persisted models.
pub const FEATURE_NAMES: &[&str] = &[
    "tenure_months",
    "monthly_revenue",
    "total_interactions",
    "support_tickets",
    "last_login_days",
    "feature_usage_score",
];

pub const FEATURE_COUNT: usize = 6;

/// Converts features into the model input vector, in `FEATURE_NAMES` order.
pub fn features_to_vector(features: &CustomerFeatures) -> Vec<f64> {
    FeatureField::ALL
        .iter()
        .map(|field| features.get(*field))
        .collect()
}

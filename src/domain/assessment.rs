use serde::{Deserialize, Serialize};

use crate::domain::churn::ChurnResult;
use crate::domain::errors::ScoringError;
use crate::domain::health::HealthResult;
use crate::domain::recommendation::Recommendation;

/// Full assessment of one customer: churn, health and ranked interventions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerAssessment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    pub churn: ChurnResult,
    pub health: HealthResult,
    pub recommendations: Vec<Recommendation>,
}

/// One customer's outcome within a batch run
#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    pub customer_id: String,
    pub outcome: Result<CustomerAssessment, ScoringError>,
}

impl BatchEntry {
    pub fn failed(customer_id: impl Into<String>, error: ScoringError) -> Self {
        Self {
            customer_id: customer_id.into(),
            outcome: Err(error),
        }
    }
}

use serde::{Deserialize, Serialize};

use super::features::CustomerFeatures;

/// A customer's features keyed by the caller's identifier.
///
/// The scorer never interprets the id; it only carries it through batch results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub customer_id: String,
    #[serde(flatten)]
    pub features: CustomerFeatures,
}

impl CustomerRecord {
    pub fn new(customer_id: impl Into<String>, features: CustomerFeatures) -> Self {
        Self {
            customer_id: customer_id.into(),
            features,
        }
    }
}

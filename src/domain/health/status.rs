use serde::{Deserialize, Serialize};
use std::fmt;

/// Health status tier of a composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    /// Composite 0-49
    Poor,
    /// Composite 50-69
    Fair,
    /// Composite 70-89
    Good,
    /// Composite 90-100
    Excellent,
}

impl HealthStatus {
    pub const ALL: [HealthStatus; 4] = [
        HealthStatus::Poor,
        HealthStatus::Fair,
        HealthStatus::Good,
        HealthStatus::Excellent,
    ];

    pub const FAIR_FLOOR: u8 = 50;
    pub const GOOD_FLOOR: u8 = 70;
    pub const EXCELLENT_FLOOR: u8 = 90;

    pub fn from_composite(composite: u8) -> Self {
        match composite {
            c if c >= Self::EXCELLENT_FLOOR => HealthStatus::Excellent,
            c if c >= Self::GOOD_FLOOR => HealthStatus::Good,
            c if c >= Self::FAIR_FLOOR => HealthStatus::Fair,
            _ => HealthStatus::Poor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Poor => "Poor",
            HealthStatus::Fair => "Fair",
            HealthStatus::Good => "Good",
            HealthStatus::Excellent => "Excellent",
        }
    }

    /// Poor and Fair customers need attention
    pub fn is_at_risk(&self) -> bool {
        *self <= HealthStatus::Fair
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

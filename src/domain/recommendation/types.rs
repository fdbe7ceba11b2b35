use serde::{Deserialize, Serialize};
use std::fmt;

/// Intervention category.
///
/// Declaration order is the canonical tie-break order within a priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterventionCategory {
    PersonalOutreach,
    SupportEnhancement,
    ProductEducation,
    Engagement,
    Commercial,
}

impl InterventionCategory {
    pub const ALL: [InterventionCategory; 5] = [
        InterventionCategory::PersonalOutreach,
        InterventionCategory::SupportEnhancement,
        InterventionCategory::ProductEducation,
        InterventionCategory::Engagement,
        InterventionCategory::Commercial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InterventionCategory::PersonalOutreach => "personal-outreach",
            InterventionCategory::SupportEnhancement => "support-enhancement",
            InterventionCategory::ProductEducation => "product-education",
            InterventionCategory::Engagement => "engagement",
            InterventionCategory::Commercial => "commercial",
        }
    }

    /// Categories that count as direct retention work for high-risk customers
    pub fn is_retention(&self) -> bool {
        matches!(
            self,
            InterventionCategory::PersonalOutreach | InterventionCategory::ProductEducation
        )
    }
}

impl fmt::Display for InterventionCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single recommended action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: InterventionCategory,
    pub action: String,
    pub priority: Priority,
    /// Id of the rule (or fallback) that produced this recommendation
    pub rule_id: String,
}

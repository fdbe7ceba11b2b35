use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one of the five health dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubScoreKind {
    Engagement,
    Usage,
    Satisfaction,
    Financial,
    Support,
}

impl SubScoreKind {
    pub const ALL: [SubScoreKind; 5] = [
        SubScoreKind::Engagement,
        SubScoreKind::Usage,
        SubScoreKind::Satisfaction,
        SubScoreKind::Financial,
        SubScoreKind::Support,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SubScoreKind::Engagement => "engagement",
            SubScoreKind::Usage => "usage",
            SubScoreKind::Satisfaction => "satisfaction",
            SubScoreKind::Financial => "financial",
            SubScoreKind::Support => "support",
        }
    }
}

impl fmt::Display for SubScoreKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The five health sub-scores, each in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub engagement: f64,
    pub usage: f64,
    pub satisfaction: f64,
    pub financial: f64,
    pub support: f64,
}

impl SubScores {
    pub fn get(&self, kind: SubScoreKind) -> f64 {
        match kind {
            SubScoreKind::Engagement => self.engagement,
            SubScoreKind::Usage => self.usage,
            SubScoreKind::Satisfaction => self.satisfaction,
            SubScoreKind::Financial => self.financial,
            SubScoreKind::Support => self.support,
        }
    }
}

pub mod calibration;
pub mod status;
pub mod sub_scores;
pub mod weights;

pub use calibration::HealthCalibration;
pub use status::HealthStatus;
pub use sub_scores::{SubScoreKind, SubScores};
pub use weights::HealthWeights;

use serde::{Deserialize, Serialize};

/// Outcome of a health scoring call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthResult {
    #[serde(flatten)]
    pub sub_scores: SubScores,
    /// Weighted composite in [0, 100]
    pub composite: u8,
    pub status: HealthStatus,
}

impl HealthResult {
    pub fn from_sub_scores(sub_scores: SubScores, weights: &HealthWeights) -> Self {
        let composite = weights.composite(&sub_scores);
        Self {
            sub_scores,
            composite,
            status: HealthStatus::from_composite(composite),
        }
    }
}

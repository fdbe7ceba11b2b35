//! Rule table location and output cap parsed from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Recommendation environment configuration
#[derive(Debug, Clone, Default)]
pub struct RecommendationEnvConfig {
    /// Rule table file; the bundled table is used when unset
    pub rules_path: Option<PathBuf>,
    /// Overrides the table's own `max_recommendations` setting
    pub max_recommendations: Option<usize>,
}

impl RecommendationEnvConfig {
    pub fn from_env() -> Result<Self> {
        let rules_path = env::var("RULES_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let max_recommendations = match env::var("MAX_RECOMMENDATIONS") {
            Ok(raw) => Some(
                raw.parse::<usize>()
                    .context("Failed to parse MAX_RECOMMENDATIONS")?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            rules_path,
            max_recommendations,
        })
    }
}

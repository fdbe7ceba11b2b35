//! Configuration module for churnwatch.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: Model, Scoring, Recommendations, and Observability.
//! Everything here is bound once at startup; nothing is configurable per call.

mod model_config;
mod observability_config;
mod recommendation_config;
mod scoring_config;

pub use model_config::{ClassifierKind, ModelEnvConfig};
pub use observability_config::{LogFormat, ObservabilityEnvConfig};
pub use recommendation_config::RecommendationEnvConfig;
pub use scoring_config::ScoringEnvConfig;

use anyhow::{Context, Result};

/// Main application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub model: ModelEnvConfig,
    pub scoring: ScoringEnvConfig,
    pub recommendations: RecommendationEnvConfig,
    pub observability: ObservabilityEnvConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            model: ModelEnvConfig::from_env().context("Invalid model configuration")?,
            scoring: ScoringEnvConfig::from_env().context("Invalid scoring configuration")?,
            recommendations: RecommendationEnvConfig::from_env()
                .context("Invalid recommendation configuration")?,
            observability: ObservabilityEnvConfig::from_env()
                .context("Invalid observability configuration")?,
        })
    }
}

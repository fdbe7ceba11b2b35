//! Observability configuration parsing from environment variables.
//!
//! This module handles loading logging and metrics configuration.

use std::env;
use std::str::FromStr;

/// tracing-subscriber output style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            _ => anyhow::bail!("Invalid LOG_FORMAT: {}. Must be 'pretty' or 'compact'", s),
        }
    }
}

/// Observability environment configuration
#[derive(Debug, Clone, Default)]
pub struct ObservabilityEnvConfig {
    pub metrics_enabled: bool,
    pub log_format: LogFormat,
}

impl ObservabilityEnvConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            metrics_enabled: env::var("METRICS_ENABLED")
                .unwrap_or_else(|_| "false".to_string())
                .parse::<bool>()
                .unwrap_or(false),
            log_format: match env::var("LOG_FORMAT") {
                Ok(raw) => raw.parse()?,
                Err(_) => LogFormat::default(),
            },
        })
    }
}

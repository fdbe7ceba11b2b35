use thiserror::Error;

/// Errors surfaced by the scoring pipeline
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("Invalid value for {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Churn model '{model}' unavailable: {reason}")]
    ModelUnavailable { model: String, reason: String },

    #[error("Invalid scoring configuration: {reason}")]
    Configuration { reason: String },
}

impl ScoringError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ScoringError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn configuration(reason: impl Into<String>) -> Self {
        ScoringError::Configuration {
            reason: reason.into(),
        }
    }

    /// Stable label used for log fields and metric labels
    pub fn kind(&self) -> &'static str {
        match self {
            ScoringError::Validation { .. } => "validation",
            ScoringError::ModelUnavailable { .. } => "model_unavailable",
            ScoringError::Configuration { .. } => "configuration",
        }
    }

    /// Offending field for validation failures
    pub fn field(&self) -> Option<&str> {
        match self {
            ScoringError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

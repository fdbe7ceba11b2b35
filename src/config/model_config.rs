//! Churn model selection parsed from environment variables.

use anyhow::Result;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Which churn classifier backs the predictor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassifierKind {
    /// Bundled logistic coefficients
    #[default]
    Baseline,
    /// Logistic coefficients loaded from `CHURN_MODEL_PATH`
    Logistic,
    /// SmartCore forest bundle loaded from `CHURN_MODEL_PATH`
    Forest,
    /// Additive rule heuristic
    Heuristic,
}

impl ClassifierKind {
    pub fn requires_artifact(&self) -> bool {
        matches!(self, ClassifierKind::Logistic | ClassifierKind::Forest)
    }
}

impl FromStr for ClassifierKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "baseline" => Ok(ClassifierKind::Baseline),
            "logistic" => Ok(ClassifierKind::Logistic),
            "forest" => Ok(ClassifierKind::Forest),
            "heuristic" => Ok(ClassifierKind::Heuristic),
            _ => anyhow::bail!(
                "Invalid CHURN_MODEL_KIND: {}. Must be 'baseline', 'logistic', 'forest', or 'heuristic'",
                s
            ),
        }
    }
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ClassifierKind::Baseline => "baseline",
            ClassifierKind::Logistic => "logistic",
            ClassifierKind::Forest => "forest",
            ClassifierKind::Heuristic => "heuristic",
        };
        f.write_str(name)
    }
}

/// Model environment configuration
#[derive(Debug, Clone, Default)]
pub struct ModelEnvConfig {
    pub kind: ClassifierKind,
    pub model_path: Option<PathBuf>,
}

impl ModelEnvConfig {
    pub fn from_env() -> Result<Self> {
        let kind = match env::var("CHURN_MODEL_KIND") {
            Ok(raw) => raw.parse::<ClassifierKind>()?,
            Err(_) => ClassifierKind::default(),
        };
        let model_path = env::var("CHURN_MODEL_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        if kind.requires_artifact() && model_path.is_none() {
            anyhow::bail!("CHURN_MODEL_KIND={} requires CHURN_MODEL_PATH", kind);
        }

        Ok(Self { kind, model_path })
    }
}

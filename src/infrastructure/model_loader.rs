//! Reads model artifacts and rule tables from disk.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::application::ml::{
    ChurnClassifier, ForestClassifier, HeuristicClassifier, LogisticClassifier,
};
use crate::config::{ClassifierKind, ModelEnvConfig, RecommendationEnvConfig};
use crate::domain::recommendation::RuleTable;

/// Builds the classifier capability selected by configuration.
///
/// A forest artifact that cannot be read still yields a classifier; it reports
/// itself unavailable on every prediction.
pub fn load_classifier(config: &ModelEnvConfig) -> Result<Arc<dyn ChurnClassifier>> {
    let classifier: Arc<dyn ChurnClassifier> = match config.kind {
        ClassifierKind::Baseline => Arc::new(LogisticClassifier::baseline()),
        ClassifierKind::Heuristic => Arc::new(HeuristicClassifier),
        ClassifierKind::Logistic => {
            let path = required_path(config)?;
            Arc::new(load_logistic(path)?)
        }
        ClassifierKind::Forest => {
            let path = required_path(config)?;
            Arc::new(ForestClassifier::load(path))
        }
    };

    info!(
        "Churn classifier: {} ({})",
        classifier.name(),
        classifier.version()
    );
    Ok(classifier)
}

pub fn load_logistic(path: &Path) -> Result<LogisticClassifier> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read logistic model {:?}", path))?;
    LogisticClassifier::from_json_str(&raw)
        .with_context(|| format!("Invalid logistic model {:?}", path))
}

pub fn load_rule_table(path: &Path) -> Result<RuleTable> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rule table {:?}", path))?;
    RuleTable::from_toml_str(&raw).with_context(|| format!("Invalid rule table {:?}", path))
}

/// The configured rule table (bundled when no path is set), with the cap override applied
pub fn resolve_rule_table(config: &RecommendationEnvConfig) -> Result<RuleTable> {
    let table = match &config.rules_path {
        Some(path) => load_rule_table(path)?,
        None => RuleTable::standard().context("Bundled rule table is invalid")?,
    };

    match config.max_recommendations {
        Some(max) => table
            .with_max_recommendations(max)
            .context("Invalid MAX_RECOMMENDATIONS"),
        None => Ok(table),
    }
}

fn required_path(config: &ModelEnvConfig) -> Result<&Path> {
    config
        .model_path
        .as_deref()
        .with_context(|| format!("CHURN_MODEL_KIND={} requires CHURN_MODEL_PATH", config.kind))
}

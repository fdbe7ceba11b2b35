use crate::config::{ClassifierKind, Config, LogFormat};
use std::env;
use std::sync::Mutex;
use std::sync::OnceLock;

// Global lock to prevent race conditions when modifying environment variables in tests
static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn get_env_lock() -> &'static Mutex<()> {
    ENV_LOCK.get_or_init(|| Mutex::new(()))
}

const KEYS: [&str; 10] = [
    "CHURN_MODEL_KIND",
    "CHURN_MODEL_PATH",
    "RISK_MEDIUM_THRESHOLD",
    "RISK_HIGH_THRESHOLD",
    "HEALTH_REVENUE_CEILING",
    "HEALTH_RECENCY_HORIZON_DAYS",
    "RULES_PATH",
    "MAX_RECOMMENDATIONS",
    "METRICS_ENABLED",
    "LOG_FORMAT",
];

fn clear_env() {
    for key in KEYS {
        // SAFETY: callers hold ENV_LOCK, so no other test touches the environment concurrently
        unsafe { env::remove_var(key) };
    }
}

fn set(key: &str, value: &str) {
    // SAFETY: callers hold ENV_LOCK
    unsafe { env::set_var(key, value) };
}

#[test]
fn test_config_defaults() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();

    let config = Config::from_env().unwrap();

    assert_eq!(config.model.kind, ClassifierKind::Baseline);
    assert!(config.model.model_path.is_none());
    assert!((config.scoring.risk_medium_threshold - 0.20).abs() < 1e-12);
    assert!((config.scoring.risk_high_threshold - 0.70).abs() < 1e-12);
    assert!(config.recommendations.rules_path.is_none());
    assert!(config.recommendations.max_recommendations.is_none());
    assert!(!config.observability.metrics_enabled);
    assert_eq!(config.observability.log_format, LogFormat::Pretty);
}

#[test]
fn test_config_overrides() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();
    set("CHURN_MODEL_KIND", "forest");
    set("CHURN_MODEL_PATH", "models/churn_forest.json");
    set("RISK_MEDIUM_THRESHOLD", "0.3");
    set("RISK_HIGH_THRESHOLD", "0.8");
    set("HEALTH_REVENUE_CEILING", "400");
    set("MAX_RECOMMENDATIONS", "3");
    set("METRICS_ENABLED", "true");
    set("LOG_FORMAT", "compact");

    let config = Config::from_env().unwrap();

    assert_eq!(config.model.kind, ClassifierKind::Forest);
    assert_eq!(
        config.model.model_path.as_deref(),
        Some(std::path::Path::new("models/churn_forest.json"))
    );
    let thresholds = config.scoring.risk_thresholds().unwrap();
    assert!((thresholds.medium() - 0.3).abs() < 1e-12);
    assert!((thresholds.high() - 0.8).abs() < 1e-12);
    assert!((config.scoring.health_calibration().unwrap().revenue_ceiling - 400.0).abs() < 1e-12);
    assert_eq!(config.recommendations.max_recommendations, Some(3));
    assert!(config.observability.metrics_enabled);
    assert_eq!(config.observability.log_format, LogFormat::Compact);

    clear_env();
}

#[test]
fn test_trained_model_requires_path() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();
    set("CHURN_MODEL_KIND", "logistic");

    let err = Config::from_env().unwrap_err();
    assert!(format!("{:#}", err).contains("CHURN_MODEL_PATH"));

    clear_env();
}

#[test]
fn test_malformed_numbers_fail_with_context() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();
    set("RISK_HIGH_THRESHOLD", "seventy");

    let err = Config::from_env().unwrap_err();
    assert!(format!("{:#}", err).contains("RISK_HIGH_THRESHOLD"));

    clear_env();
    set("MAX_RECOMMENDATIONS", "-1");
    assert!(Config::from_env().is_err());

    clear_env();
}

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::application::AssessmentService;
use crate::application::ml::ChurnClassifier;
use crate::application::scoring::{ChurnPredictor, HealthScorer, InterventionRecommender};
use crate::config::Config;
use crate::infrastructure::model_loader;
use crate::infrastructure::observability::ScoringMetrics;

pub struct ServiceFactory;

impl ServiceFactory {
    /// Wires the scoring components from configuration.
    ///
    /// Invalid thresholds, calibration or rule tables fail here, once, at startup.
    pub fn create_service(config: &Config) -> Result<AssessmentService> {
        let classifier = model_loader::load_classifier(&config.model)?;
        Self::create_service_with_classifier(config, classifier)
    }

    /// Same as [`Self::create_service`] with an already initialised classifier
    pub fn create_service_with_classifier(
        config: &Config,
        classifier: Arc<dyn ChurnClassifier>,
    ) -> Result<AssessmentService> {
        let thresholds = config
            .scoring
            .risk_thresholds()
            .context("Invalid risk thresholds")?;
        let calibration = config
            .scoring
            .health_calibration()
            .context("Invalid health calibration")?;
        let table = model_loader::resolve_rule_table(&config.recommendations)?;

        let predictor = ChurnPredictor::new(classifier, thresholds);
        let scorer = HealthScorer::new(calibration)?;
        let recommender = InterventionRecommender::new(Arc::new(table));

        let mut service = AssessmentService::new(predictor, scorer, recommender);
        if config.observability.metrics_enabled {
            service = service.with_metrics(ScoringMetrics::new()?);
            info!("Scoring metrics enabled");
        }
        Ok(service)
    }
}

use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::application::scoring::{ChurnPredictor, HealthScorer, InterventionRecommender};
use crate::domain::assessment::{BatchEntry, CustomerAssessment};
use crate::domain::churn::ChurnResult;
use crate::domain::customer::{CustomerFeatures, CustomerRecord};
use crate::domain::errors::ScoringError;
use crate::domain::health::HealthResult;
use crate::domain::recommendation::Recommendation;
use crate::infrastructure::observability::ScoringMetrics;

/// Facade over the three scoring components.
///
/// All components are read-only after construction, so one service can be
/// shared across threads and called concurrently.
#[derive(Clone)]
pub struct AssessmentService {
    predictor: ChurnPredictor,
    scorer: HealthScorer,
    recommender: InterventionRecommender,
    metrics: Option<ScoringMetrics>,
}

impl AssessmentService {
    pub fn new(
        predictor: ChurnPredictor,
        scorer: HealthScorer,
        recommender: InterventionRecommender,
    ) -> Self {
        Self {
            predictor,
            scorer,
            recommender,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: ScoringMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn metrics(&self) -> Option<&ScoringMetrics> {
        self.metrics.as_ref()
    }

    pub fn predictor(&self) -> &ChurnPredictor {
        &self.predictor
    }

    pub fn scorer(&self) -> &HealthScorer {
        &self.scorer
    }

    pub fn recommender(&self) -> &InterventionRecommender {
        &self.recommender
    }

    pub fn predict_churn(&self, features: &CustomerFeatures) -> Result<ChurnResult, ScoringError> {
        let result = self.predictor.predict(features);
        match &result {
            Ok(churn) => self.observe(|m| m.observe_churn(churn.probability)),
            Err(e) => self.record_error(e),
        }
        result
    }

    pub fn score_health(&self, features: &CustomerFeatures) -> Result<HealthResult, ScoringError> {
        let result = self.scorer.score(features);
        match &result {
            Ok(health) => self.observe(|m| m.observe_health(health.composite)),
            Err(e) => self.record_error(e),
        }
        result
    }

    pub fn get_recommendations(
        &self,
        features: &CustomerFeatures,
        churn: &ChurnResult,
        health: &HealthResult,
    ) -> Vec<Recommendation> {
        self.recommender.recommend(features, churn, health)
    }

    /// Churn and health run concurrently; recommendations need both.
    ///
    /// Features are validated once up front so a rejected customer is counted once.
    pub fn assess(&self, features: &CustomerFeatures) -> Result<CustomerAssessment, ScoringError> {
        if let Err(e) = features.validate() {
            self.record_error(&e);
            return Err(e);
        }

        let (churn, health) = rayon::join(
            || self.predict_churn(features),
            || self.score_health(features),
        );
        let (churn, health) = (churn?, health?);
        let recommendations = self.get_recommendations(features, &churn, &health);

        let assessment = CustomerAssessment {
            customer_id: None,
            churn,
            health,
            recommendations,
        };
        self.observe(|m| m.record_assessment(&assessment));
        Ok(assessment)
    }

    pub fn assess_record(&self, record: &CustomerRecord) -> BatchEntry {
        let outcome = self.assess(&record.features).map(|mut assessment| {
            assessment.customer_id = Some(record.customer_id.clone());
            assessment
        });
        if let Err(e) = &outcome {
            debug!("Customer {} not assessed: {}", record.customer_id, e);
        }
        BatchEntry {
            customer_id: record.customer_id.clone(),
            outcome,
        }
    }

    /// Reports a customer whose input was rejected before scoring, such as a bad CSV cell
    pub fn reject(&self, customer_id: impl Into<String>, error: ScoringError) -> BatchEntry {
        let entry = BatchEntry::failed(customer_id, error);
        if let Err(e) = &entry.outcome {
            debug!("Customer {} not assessed: {}", entry.customer_id, e);
            self.observe(|m| m.inc_error(e));
        }
        entry
    }

    /// Assesses every record in parallel. Output order matches input order and
    /// a failing customer never aborts the batch.
    pub fn assess_batch(&self, records: &[CustomerRecord]) -> Vec<BatchEntry> {
        let start = Instant::now();
        let entries: Vec<BatchEntry> = records
            .par_iter()
            .map(|record| self.assess_record(record))
            .collect();

        let failures = entries.iter().filter(|e| e.outcome.is_err()).count();
        info!(
            "Assessed {} customers ({} failed) in {:?}",
            entries.len(),
            failures,
            start.elapsed()
        );
        entries
    }

    fn observe(&self, f: impl FnOnce(&ScoringMetrics)) {
        if let Some(metrics) = &self.metrics {
            f(metrics);
        }
    }

    fn record_error(&self, error: &ScoringError) {
        if let ScoringError::Validation { .. } = error {
            warn!("Rejected customer features: {}", error);
        }
        self.observe(|m| m.inc_error(error));
    }
}

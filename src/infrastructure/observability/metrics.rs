//! Prometheus metrics definitions for churnwatch
//!
//! All metrics use the `churnwatch_` prefix and are read-only.

use prometheus::{CounterVec, Histogram, HistogramOpts, Opts, Registry, TextEncoder};
use std::sync::Arc;

use crate::domain::assessment::CustomerAssessment;
use crate::domain::errors::ScoringError;

/// Prometheus metrics for the scoring core
#[derive(Clone)]
pub struct ScoringMetrics {
    registry: Arc<Registry>,
    /// Completed assessments by risk level and health status
    pub assessments_total: CounterVec,
    /// Failed scoring calls by error kind
    pub scoring_errors_total: CounterVec,
    /// Emitted recommendations by category and priority
    pub recommendations_total: CounterVec,
    /// Distribution of churn probabilities (0-1)
    pub churn_probability: Histogram,
    /// Distribution of health composites (0-100)
    pub health_composite: Histogram,
}

impl ScoringMetrics {
    /// Create a new ScoringMetrics instance with all counters and histograms registered
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let assessments_total = CounterVec::new(
            Opts::new(
                "churnwatch_assessments_total",
                "Completed customer assessments by risk level and health status",
            ),
            &["risk_level", "health_status"],
        )?;
        registry.register(Box::new(assessments_total.clone()))?;

        let scoring_errors_total = CounterVec::new(
            Opts::new(
                "churnwatch_scoring_errors_total",
                "Scoring failures by error kind",
            ),
            &["kind"],
        )?;
        registry.register(Box::new(scoring_errors_total.clone()))?;

        let recommendations_total = CounterVec::new(
            Opts::new(
                "churnwatch_recommendations_total",
                "Recommendations emitted by category and priority",
            ),
            &["category", "priority"],
        )?;
        registry.register(Box::new(recommendations_total.clone()))?;

        let churn_probability = Histogram::with_opts(
            HistogramOpts::new(
                "churnwatch_churn_probability",
                "Predicted churn probability",
            )
            .buckets(vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0]),
        )?;
        registry.register(Box::new(churn_probability.clone()))?;

        let health_composite = Histogram::with_opts(
            HistogramOpts::new(
                "churnwatch_health_composite",
                "Composite customer health score",
            )
            .buckets(vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0]),
        )?;
        registry.register(Box::new(health_composite.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            assessments_total,
            scoring_errors_total,
            recommendations_total,
            churn_probability,
            health_composite,
        })
    }

    /// Render all metrics in Prometheus text format
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder
            .encode_to_string(&metric_families)
            .unwrap_or_default()
    }

    pub fn observe_churn(&self, probability: f64) {
        self.churn_probability.observe(probability);
    }

    pub fn observe_health(&self, composite: u8) {
        self.health_composite.observe(f64::from(composite));
    }

    pub fn inc_error(&self, error: &ScoringError) {
        self.scoring_errors_total
            .with_label_values(&[error.kind()])
            .inc();
    }

    /// Record a completed assessment and the recommendations it produced
    pub fn record_assessment(&self, assessment: &CustomerAssessment) {
        self.assessments_total
            .with_label_values(&[
                assessment.churn.risk_level.as_str(),
                assessment.health.status.as_str(),
            ])
            .inc();
        for rec in &assessment.recommendations {
            self.recommendations_total
                .with_label_values(&[rec.category.as_str(), rec.priority.as_str()])
                .inc();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = ScoringMetrics::new().expect("Failed to create metrics");
        metrics.observe_churn(0.5);
        assert!(metrics.render().contains("churnwatch_"));
    }

    #[test]
    fn test_error_counter_uses_kind_label() {
        let metrics = ScoringMetrics::new().expect("Failed to create metrics");
        metrics.inc_error(&ScoringError::validation("monthly_revenue", "must be >= 0"));
        let output = metrics.render();
        assert!(output.contains("churnwatch_scoring_errors_total{kind=\"validation\"} 1"));
    }

    #[test]
    fn test_health_histogram() {
        let metrics = ScoringMetrics::new().expect("Failed to create metrics");
        metrics.observe_health(68);
        metrics.observe_health(93);
        let output = metrics.render();
        assert!(output.contains("churnwatch_health_composite_count 2"));
    }
}

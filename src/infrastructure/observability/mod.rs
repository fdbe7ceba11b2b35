//! Push-based observability for churnwatch
//!
//! Metrics are collected in-process and rendered in Prometheus text format on
//! demand. Nothing here listens for requests.

pub mod metrics;

pub use metrics::ScoringMetrics;

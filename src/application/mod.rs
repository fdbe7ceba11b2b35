// Churn classifier capability and implementations
pub mod ml;

// Scoring components
pub mod scoring;

// Orchestration and portfolio reporting
pub mod assessment_service;
pub mod reporting;

pub use assessment_service::AssessmentService;
pub use reporting::PortfolioSummary;

pub mod churn_predictor;
pub mod health_scorer;
pub mod intervention_recommender;

pub use churn_predictor::ChurnPredictor;
pub use health_scorer::HealthScorer;
pub use intervention_recommender::{
    AT_RISK_FALLBACK_ID, HEALTHY_FALLBACK_ID, InterventionRecommender,
};

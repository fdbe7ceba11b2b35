pub mod forest_classifier;
pub mod heuristic_classifier;
pub mod logistic_classifier;
pub mod predictor;

pub use forest_classifier::{ChurnForest, ForestBundle, ForestClassifier};
pub use heuristic_classifier::HeuristicClassifier;
pub use logistic_classifier::LogisticClassifier;
pub use predictor::ChurnClassifier;

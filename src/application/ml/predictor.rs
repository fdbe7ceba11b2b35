use crate::domain::ml::FeatureScaler;

/// Interface for trained churn classifiers.
///
/// Implementations are read-only after construction and may be shared across
/// threads without further synchronisation.
pub trait ChurnClassifier: Send + Sync {
    /// Probability of the positive (churn) class, in [0, 1].
    ///
    /// `vector` follows the feature registry order and has already been passed
    /// through `feature_scaler()` when one is declared.
    fn predict_proba(&self, vector: &[f64]) -> Result<f64, String>;

    /// Standardisation the model was trained with, if any
    fn feature_scaler(&self) -> Option<&FeatureScaler> {
        None
    }

    /// Get model name/type
    fn name(&self) -> &str;

    /// Get model version/id
    fn version(&self) -> &str;
}

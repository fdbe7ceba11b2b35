use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use super::predictor::ChurnClassifier;
use crate::domain::ml::FeatureScaler;

pub type ChurnForest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Serialized forest artifact: the forest plus the scaler it was fitted with.
///
/// The forest is regressed on 0/1 churn labels, so its mean leaf value is the
/// fraction of churners, i.e. the positive-class probability.
#[derive(Serialize, Deserialize)]
pub struct ForestBundle {
    pub version: String,
    pub scaler: FeatureScaler,
    pub forest: ChurnForest,
}

pub struct ForestClassifier {
    bundle: Option<ForestBundle>,
    source: Option<PathBuf>,
}

impl ForestClassifier {
    pub fn from_bundle(bundle: ForestBundle) -> Self {
        Self {
            bundle: Some(bundle),
            source: None,
        }
    }

    /// Loads a JSON bundle from disk.
    ///
    /// A missing or unreadable artifact leaves the classifier unloaded; every
    /// prediction then fails instead of returning a neutral value.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let mut classifier = Self {
            bundle: None,
            source: Some(path.to_path_buf()),
        };

        if !path.exists() {
            warn!(
                "Churn forest artifact not found at {:?}. Predictions will be unavailable.",
                path
            );
            return classifier;
        }

        let buffer = match std::fs::read(path) {
            Ok(buffer) => buffer,
            Err(e) => {
                error!("Failed to read churn forest artifact: {}", e);
                return classifier;
            }
        };

        match serde_json::from_slice::<ForestBundle>(&buffer) {
            Ok(bundle) => match bundle.scaler.validate() {
                Ok(()) => {
                    info!(
                        "Loaded churn forest {} from {:?}",
                        bundle.version, path
                    );
                    classifier.bundle = Some(bundle);
                }
                Err(e) => error!("Churn forest artifact has an invalid scaler: {}", e),
            },
            Err(e) => {
                error!("Failed to deserialize churn forest: {}", e);
            }
        }

        classifier
    }

    pub fn is_loaded(&self) -> bool {
        self.bundle.is_some()
    }
}

impl ChurnClassifier for ForestClassifier {
    fn predict_proba(&self, vector: &[f64]) -> Result<f64, String> {
        let Some(bundle) = &self.bundle else {
            return Err(match &self.source {
                Some(path) => format!("model not loaded from {:?}", path),
                None => "model not loaded".to_string(),
            });
        };

        let input_matrix = DenseMatrix::from_2d_vec(&vec![vector.to_vec()])
            .map_err(|e| format!("Matrix creation failed: {}", e))?;

        let predictions = bundle
            .forest
            .predict(&input_matrix)
            .map_err(|e| format!("Prediction failed: {}", e))?;

        predictions
            .first()
            .copied()
            .ok_or_else(|| "No prediction returned".to_string())
    }

    fn feature_scaler(&self) -> Option<&FeatureScaler> {
        self.bundle.as_ref().map(|b| &b.scaler)
    }

    fn name(&self) -> &str {
        "SmartCore Random Forest"
    }

    fn version(&self) -> &str {
        self.bundle
            .as_ref()
            .map(|b| b.version.as_str())
            .unwrap_or("unloaded")
    }
}

//! The trained pipeline artifact
//!
//! `QualityPipeline` is what training persists and serving loads: the
//! feature-name order, the fitted preprocessing stages, the fitted
//! regressor, and the configuration that produced them. The server
//! deserializes it once at startup and never mutates it.

use crate::error::{Result, VintnerError};
use crate::preprocessing::Preprocessor;
use crate::training::{ModelType, Regressor, TrainConfig};
use chrono::Utc;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// A fitted end-to-end prediction pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityPipeline {
    feature_names: Vec<String>,
    preprocessor: Preprocessor,
    regressor: Regressor,
    trained_at: String,
    config: TrainConfig,
}

impl QualityPipeline {
    /// Assemble a pipeline from freshly fitted parts
    pub(crate) fn from_parts(
        feature_names: Vec<String>,
        preprocessor: Preprocessor,
        regressor: Regressor,
        config: TrainConfig,
    ) -> Self {
        Self {
            feature_names,
            preprocessor,
            regressor,
            trained_at: Utc::now().to_rfc3339(),
            config,
        }
    }

    /// Names of the raw input features, in training column order
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Number of raw input features the pipeline expects
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Family of the fitted regressor
    pub fn model_kind(&self) -> ModelType {
        self.regressor.kind()
    }

    /// RFC 3339 timestamp recorded when the pipeline was fitted
    pub fn trained_at(&self) -> &str {
        &self.trained_at
    }

    /// Predict the raw quality score for one feature vector.
    ///
    /// The vector must supply every raw feature in training column order;
    /// the pipeline applies its own imputation, scaling, and selection.
    pub fn predict(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.feature_names.len() {
            return Err(VintnerError::ShapeError {
                expected: format!("{} features", self.feature_names.len()),
                actual: format!("{} features", features.len()),
            });
        }

        let x = Array2::from_shape_vec((1, features.len()), features.to_vec())
            .map_err(|e| VintnerError::InferenceError(e.to_string()))?;
        let transformed = self.preprocessor.transform(&x)?;
        let predictions = self.regressor.predict(&transformed)?;
        Ok(predictions[0])
    }

    /// Predict and round to the nearest integer quality score
    pub fn predict_quality(&self, features: &[f64]) -> Result<i64> {
        Ok(self.predict(features)?.round() as i64)
    }

    /// Persist the pipeline as pretty JSON
    pub fn save(&self, path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a pipeline artifact from disk
    pub fn load(path: &str) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            VintnerError::InferenceError(format!("cannot read model artifact at {path}: {e}"))
        })?;
        let pipeline: Self = serde_json::from_str(&json)?;
        Ok(pipeline)
    }
}

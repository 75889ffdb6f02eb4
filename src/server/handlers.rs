//! HTTP request handlers

use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use super::error::{Result, ServerError};
use super::state::AppState;

/// Feature payload for `POST /predict`.
///
/// Clients have historically sent the vector under `features`, under `data`,
/// or as individual named fields; all three shapes are accepted. The named
/// form is fixed to the red-wine schema and yields the values in training
/// column order.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PredictRequest {
    Features { features: Vec<f64> },
    Data { data: Vec<f64> },
    Named(NamedFeatures),
}

/// The 11 chemical measurements of the red-wine dataset, snake_cased
#[derive(Debug, Deserialize)]
pub struct NamedFeatures {
    pub fixed_acidity: f64,
    pub volatile_acidity: f64,
    pub citric_acid: f64,
    pub residual_sugar: f64,
    pub chlorides: f64,
    pub free_sulfur_dioxide: f64,
    pub total_sulfur_dioxide: f64,
    pub density: f64,
    #[serde(alias = "pH")]
    pub ph: f64,
    pub sulphates: f64,
    pub alcohol: f64,
}

impl PredictRequest {
    /// Flatten any of the accepted shapes into the ordered feature vector
    pub fn into_vector(self) -> Vec<f64> {
        match self {
            PredictRequest::Features { features } => features,
            PredictRequest::Data { data } => data,
            PredictRequest::Named(f) => vec![
                f.fixed_acidity,
                f.volatile_acidity,
                f.citric_acid,
                f.residual_sugar,
                f.chlorides,
                f.free_sulfur_dioxide,
                f.total_sulfur_dioxide,
                f.density,
                f.ph,
                f.sulphates,
                f.alcohol,
            ],
        }
    }
}

// ============================================================================
// Endpoints
// ============================================================================

/// Static identity payload for `GET /`
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
    }))
}

/// Health payload with metadata about the loaded artifact
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "model": {
            "kind": state.pipeline.model_kind().to_string(),
            "n_features": state.pipeline.n_features(),
            "trained_at": state.pipeline.trained_at(),
        },
        "uptime_secs": state.uptime_secs(),
    }))
}

/// Predict an integer wine-quality score from one feature vector
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<serde_json::Value>> {
    let features = request.into_vector();

    let expected = state.pipeline.n_features();
    if features.len() != expected {
        return Err(ServerError::Validation(format!(
            "expected exactly {} features, got {}",
            expected,
            features.len()
        )));
    }

    let wine_quality = state.pipeline.predict_quality(&features)?;
    debug!(wine_quality, "Prediction served");

    Ok(Json(serde_json::json!({
        "wine_quality": wine_quality,
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

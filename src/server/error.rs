//! Error types for the server

use crate::error::VintnerError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<VintnerError> for ServerError {
    fn from(err: VintnerError) -> Self {
        match err {
            VintnerError::ShapeError { .. } | VintnerError::ValidationError(_) => {
                ServerError::Validation(err.to_string())
            }
            other => ServerError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            ServerError::Internal(msg) => {
                tracing::error!(detail = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": true,
            "message": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_error_maps_to_validation() {
        let err: ServerError = VintnerError::ShapeError {
            expected: "11 features".to_string(),
            actual: "9 features".to_string(),
        }
        .into();
        assert!(matches!(err, ServerError::Validation(_)));
    }

    #[test]
    fn test_other_errors_map_to_internal() {
        let err: ServerError = VintnerError::ModelNotFitted.into();
        assert!(matches!(err, ServerError::Internal(_)));
    }
}

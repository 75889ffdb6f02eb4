//! Error types for the vintner crate

use thiserror::Error;

/// Result type alias for vintner operations
pub type Result<T> = std::result::Result<T, VintnerError>;

/// Main error type for the vintner crate
#[derive(Error, Debug)]
pub enum VintnerError {
    #[error("Data error: {0}")]
    DataError(String),

    #[error("Preprocessing error: {0}")]
    PreprocessingError(String),

    #[error("Training error: {0}")]
    TrainingError(String),

    #[error("Inference error: {0}")]
    InferenceError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    #[error("Model not fitted")]
    ModelNotFitted,

    #[error("Invalid parameter: {name} = {value}, {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<polars::error::PolarsError> for VintnerError {
    fn from(err: polars::error::PolarsError) -> Self {
        VintnerError::DataError(err.to_string())
    }
}

impl From<serde_json::Error> for VintnerError {
    fn from(err: serde_json::Error) -> Self {
        VintnerError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VintnerError::DataError("test error".to_string());
        assert_eq!(err.to_string(), "Data error: test error");
    }

    #[test]
    fn test_shape_error_display() {
        let err = VintnerError::ShapeError {
            expected: "11 features".to_string(),
            actual: "9 features".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid shape: expected 11 features, got 9 features");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: VintnerError = io_err.into();
        assert!(matches!(err, VintnerError::IoError(_)));
    }
}

//! Vintner - wine quality regression
//!
//! Training pipeline and prediction API for red-wine quality scores. The
//! offline trainer fits a preprocessing + linear-regression pipeline on the
//! wine-quality CSV and persists it; the HTTP server loads that artifact once
//! and answers `POST /predict` with an integer score from 11 chemical
//! measurements.
//!
//! # Modules
//!
//! - [`data`] - CSV loading and seeded train/test splitting
//! - [`preprocessing`] - Imputation, optional scaling, SelectKBest
//! - [`training`] - Linear/ridge/lasso regressors, metrics, the trainer
//! - [`pipeline`] - The persisted fit/predict artifact
//! - [`server`] - Axum HTTP server over a loaded artifact
//! - [`cli`] - Command-line interface

pub mod error;

pub mod data;
pub mod pipeline;
pub mod preprocessing;
pub mod training;

pub mod cli;
pub mod server;

pub use error::{Result, VintnerError};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{Result, VintnerError};

    pub use crate::data::{features_and_target, train_test_split, DatasetLoader};

    pub use crate::preprocessing::{
        ImputeStrategy, Imputer, PreprocessConfig, Preprocessor, SelectKBest, StandardScaler,
    };

    pub use crate::training::{
        LassoRegression, LinearRegression, ModelType, RegressionMetrics, Regressor,
        RidgeRegression, TrainConfig, TrainReport, Trainer,
    };

    pub use crate::pipeline::QualityPipeline;

    pub use crate::server::{create_router, AppState, ServerConfig};
}

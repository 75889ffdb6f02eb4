//! Model training module
//!
//! Covers the full training run: configuration, the linear model family
//! (OLS, Ridge, Lasso), evaluation metrics, and the trainer that wires
//! loading, splitting, preprocessing, fitting, and artifact output together.

mod config;
mod metrics;
mod trainer;
pub mod linear;

pub use config::{ModelType, TrainConfig};
pub use linear::{LassoRegression, LinearRegression, Regressor, RidgeRegression};
pub use metrics::RegressionMetrics;
pub use trainer::{TrainReport, Trainer};

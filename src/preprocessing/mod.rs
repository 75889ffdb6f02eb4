//! Preprocessing stages applied between raw features and the regressor
//!
//! The stages run in a fixed order:
//! 1. Missing value imputation
//! 2. Optional standard scaling
//! 3. Univariate feature selection
//!
//! Every stage stores its fitted parameters so the exact training-time
//! transform can be replayed at prediction time from a saved artifact.

mod config;
mod imputer;
mod pipeline;
mod scaler;
mod selection;

pub use config::PreprocessConfig;
pub use imputer::{ImputeStrategy, Imputer};
pub use pipeline::Preprocessor;
pub use scaler::StandardScaler;
pub use selection::SelectKBest;

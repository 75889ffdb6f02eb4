//! Preprocessing configuration

use super::imputer::ImputeStrategy;
use serde::{Deserialize, Serialize};

/// Configuration for the preprocessing pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessConfig {
    /// Strategy for filling missing feature values
    pub impute_strategy: ImputeStrategy,

    /// Whether to apply standard scaling after imputation
    pub use_scaler: bool,

    /// Number of features kept by univariate selection
    pub k_best: usize,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            impute_strategy: ImputeStrategy::Median,
            use_scaler: false,
            k_best: 6,
        }
    }
}

impl PreprocessConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the imputation strategy
    pub fn with_impute_strategy(mut self, strategy: ImputeStrategy) -> Self {
        self.impute_strategy = strategy;
        self
    }

    /// Builder method to enable or disable standard scaling
    pub fn with_scaler(mut self, use_scaler: bool) -> Self {
        self.use_scaler = use_scaler;
        self
    }

    /// Builder method to set the number of selected features
    pub fn with_k_best(mut self, k_best: usize) -> Self {
        self.k_best = k_best;
        self
    }
}

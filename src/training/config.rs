//! Training configuration

use crate::error::VintnerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which regressor to train
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    /// Ordinary least squares
    Linear,
    /// L2-regularized least squares
    Ridge,
    /// L1-regularized, fitted by coordinate descent
    Lasso,
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ModelType::Linear => "linear",
            ModelType::Ridge => "ridge",
            ModelType::Lasso => "lasso",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ModelType {
    type Err = VintnerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear" => Ok(ModelType::Linear),
            "ridge" => Ok(ModelType::Ridge),
            "lasso" => Ok(ModelType::Lasso),
            other => Err(VintnerError::InvalidParameter {
                name: "model_type".to_string(),
                value: other.to_string(),
                reason: "must be one of: linear, ridge, lasso".to_string(),
            }),
        }
    }
}

/// Configuration for one training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Path to the training CSV
    pub data_path: String,

    /// Name of the target column
    pub target_column: String,

    /// Regressor family to fit
    pub model_type: ModelType,

    /// Regularization strength for ridge and lasso
    pub alpha: f64,

    /// Fraction of rows held out for evaluation
    pub test_size: f64,

    /// Whether to standard-scale features before selection
    pub use_scaler: bool,

    /// Number of features kept by univariate selection
    pub k_best: usize,

    /// Seed for the train/test shuffle
    pub random_state: u64,

    /// Directory receiving model and results artifacts
    pub output_dir: String,

    /// CSV field separator
    pub separator: u8,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_path: "dataset/winequality-red.csv".to_string(),
            target_column: "quality".to_string(),
            model_type: ModelType::Linear,
            alpha: 1.0,
            test_size: 0.2,
            use_scaler: false,
            k_best: 6,
            random_state: 42,
            output_dir: "outputs".to_string(),
            separator: b';',
        }
    }
}

impl TrainConfig {
    /// Create a configuration for the given dataset with default knobs
    pub fn new(data_path: impl Into<String>) -> Self {
        Self {
            data_path: data_path.into(),
            ..Self::default()
        }
    }

    /// Builder method to set the target column
    pub fn with_target_column(mut self, target_column: impl Into<String>) -> Self {
        self.target_column = target_column.into();
        self
    }

    /// Builder method to set the regressor family
    pub fn with_model_type(mut self, model_type: ModelType) -> Self {
        self.model_type = model_type;
        self
    }

    /// Builder method to set the regularization strength
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Builder method to set the held-out fraction
    pub fn with_test_size(mut self, test_size: f64) -> Self {
        self.test_size = test_size;
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

    /// Builder method to set the shuffle seed
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = random_state;
        self
    }

    /// Builder method to set the artifact directory
    pub fn with_output_dir(mut self, output_dir: impl Into<String>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Builder method to set the CSV field separator
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }
}

//! Composed preprocessing pipeline

use super::{
    config::PreprocessConfig,
    imputer::Imputer,
    scaler::StandardScaler,
    selection::SelectKBest,
};
use crate::error::{Result, VintnerError};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Imputation, optional scaling, and feature selection as one fitted unit.
///
/// The full pipeline serializes into the model artifact, so a loaded
/// pipeline reproduces the training-time transform exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preprocessor {
    config: PreprocessConfig,
    imputer: Imputer,
    scaler: Option<StandardScaler>,
    selector: SelectKBest,
    is_fitted: bool,
}

impl Preprocessor {
    /// Create an unfitted pipeline from a configuration
    pub fn new(config: PreprocessConfig) -> Self {
        let imputer = Imputer::new(config.impute_strategy.clone());
        let scaler = config.use_scaler.then(StandardScaler::new);
        let selector = SelectKBest::new(config.k_best);
        Self {
            config,
            imputer,
            scaler,
            selector,
            is_fitted: false,
        }
    }

    /// Fit all stages in order on training data
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<&mut Self> {
        let imputed = self.imputer.fit_transform(x)?;

        let scaled = match self.scaler.as_mut() {
            Some(scaler) => scaler.fit_transform(&imputed)?,
            None => imputed,
        };

        self.selector.fit(&scaled, y)?;
        self.is_fitted = true;
        Ok(self)
    }

    /// Apply the fitted stages to new data
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(VintnerError::ModelNotFitted);
        }

        let imputed = self.imputer.transform(x)?;
        let scaled = match self.scaler.as_ref() {
            Some(scaler) => scaler.transform(&imputed)?,
            None => imputed,
        };
        self.selector.transform(&scaled)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<Array2<f64>> {
        self.fit(x, y)?;
        self.transform(x)
    }

    /// Indices of the columns the selector kept, ascending
    pub fn selected_indices(&self) -> Option<&[usize]> {
        self.selector.selected_indices()
    }

    /// The configuration this pipeline was built from
    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }
}

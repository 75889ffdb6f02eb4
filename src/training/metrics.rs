//! Regression evaluation metrics

use crate::error::{Result, VintnerError};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Held-out evaluation metrics for a trained regressor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionMetrics {
    /// Mean squared error
    pub mse: f64,
    /// Root mean squared error
    pub rmse: f64,
    /// Mean absolute error
    pub mae: f64,
    /// Coefficient of determination; 0.0 when the target has no variance
    pub r2: f64,
}

impl RegressionMetrics {
    /// Compute all metrics from true and predicted values
    pub fn compute(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<Self> {
        if y_true.is_empty() {
            return Err(VintnerError::InvalidParameter {
                name: "y_true".to_string(),
                value: "[]".to_string(),
                reason: "cannot compute metrics on an empty set".to_string(),
            });
        }
        if y_true.len() != y_pred.len() {
            return Err(VintnerError::ShapeError {
                expected: format!("{} predictions", y_true.len()),
                actual: format!("{} predictions", y_pred.len()),
            });
        }

        let n = y_true.len() as f64;
        let errors: Vec<f64> = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(t, p)| t - p)
            .collect();

        let mse = errors.iter().map(|e| e * e).sum::<f64>() / n;
        let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;

        let y_mean = y_true.mean().unwrap_or(0.0);
        let ss_res: f64 = errors.iter().map(|e| e * e).sum();
        let ss_tot: f64 = y_true.iter().map(|&v| (v - y_mean).powi(2)).sum();
        let r2 = if ss_tot <= 0.0 {
            0.0
        } else {
            1.0 - ss_res / ss_tot
        };

        Ok(Self {
            mse,
            rmse: mse.sqrt(),
            mae,
            r2,
        })
    }
}

//! Standard feature scaling

use crate::error::{Result, VintnerError};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Parameters for one scaled column
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScalerParams {
    center: f64,
    scale: f64,
}

/// Z-score scaler: (x - mean) / std with population std.
///
/// A constant column gets scale 1.0 so transforming it is a no-op shift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    params: Option<Vec<ScalerParams>>,
    is_fitted: bool,
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardScaler {
    /// Create an unfitted scaler
    pub fn new() -> Self {
        Self {
            params: None,
            is_fitted: false,
        }
    }

    /// Fit per-column mean and standard deviation
    pub fn fit(&mut self, x: &Array2<f64>) -> Result<&mut Self> {
        let n = x.nrows() as f64;
        let params: Vec<ScalerParams> = (0..x.ncols())
            .map(|col_idx| {
                let col = x.column(col_idx);
                let mean = col.mean().unwrap_or(0.0);
                let std = (col.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
                ScalerParams {
                    center: mean,
                    scale: if std == 0.0 { 1.0 } else { std },
                }
            })
            .collect();

        self.params = Some(params);
        self.is_fitted = true;
        Ok(self)
    }

    /// Apply the fitted scaling
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(VintnerError::ModelNotFitted);
        }
        let params = self.params.as_ref().ok_or(VintnerError::ModelNotFitted)?;

        if x.ncols() != params.len() {
            return Err(VintnerError::ShapeError {
                expected: format!("{} columns", params.len()),
                actual: format!("{} columns", x.ncols()),
            });
        }

        let mut result = x.clone();
        for (col_idx, mut col) in result.columns_mut().into_iter().enumerate() {
            let p = &params[col_idx];
            for v in col.iter_mut() {
                *v = (*v - p.center) / p.scale;
            }
        }

        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, x: &Array2<f64>) -> Result<Array2<f64>> {
        self.fit(x)?;
        self.transform(x)
    }
}

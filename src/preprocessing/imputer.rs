//! Missing value imputation

use crate::error::{Result, VintnerError};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Strategy for filling missing values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImputeStrategy {
    /// Replace with the column mean
    Mean,
    /// Replace with the column median
    Median,
    /// Replace with a fixed value
    Constant(f64),
}

/// Column-wise imputer for NaN feature values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Imputer {
    strategy: ImputeStrategy,
    fill_values: Option<Vec<f64>>,
    is_fitted: bool,
}

impl Imputer {
    /// Create a new imputer
    pub fn new(strategy: ImputeStrategy) -> Self {
        Self {
            strategy,
            fill_values: None,
            is_fitted: false,
        }
    }

    /// Fit the imputer, computing one fill value per column.
    ///
    /// Fill values are computed over the finite entries of each column; a
    /// column with no finite entry falls back to 0.0.
    pub fn fit(&mut self, x: &Array2<f64>) -> Result<&mut Self> {
        let fill_values: Vec<f64> = (0..x.ncols())
            .map(|col_idx| {
                let finite: Vec<f64> = x
                    .column(col_idx)
                    .iter()
                    .copied()
                    .filter(|v| v.is_finite())
                    .collect();
                self.compute_fill(&finite)
            })
            .collect();

        self.fill_values = Some(fill_values);
        self.is_fitted = true;
        Ok(self)
    }

    /// Replace non-finite entries with the fitted fill values
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(VintnerError::ModelNotFitted);
        }
        let fill_values = self
            .fill_values
            .as_ref()
            .ok_or(VintnerError::ModelNotFitted)?;

        if x.ncols() != fill_values.len() {
            return Err(VintnerError::ShapeError {
                expected: format!("{} columns", fill_values.len()),
                actual: format!("{} columns", x.ncols()),
            });
        }

        let mut result = x.clone();
        for (col_idx, mut col) in result.columns_mut().into_iter().enumerate() {
            let fill = fill_values[col_idx];
            for v in col.iter_mut() {
                if !v.is_finite() {
                    *v = fill;
                }
            }
        }

        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, x: &Array2<f64>) -> Result<Array2<f64>> {
        self.fit(x)?;
        self.transform(x)
    }

    fn compute_fill(&self, finite: &[f64]) -> f64 {
        match self.strategy {
            ImputeStrategy::Constant(value) => value,
            ImputeStrategy::Mean => {
                if finite.is_empty() {
                    0.0
                } else {
                    finite.iter().sum::<f64>() / finite.len() as f64
                }
            }
            ImputeStrategy::Median => median(finite),
        }
    }
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_median_imputation() {
        let x = array![
            [1.0, 10.0],
            [f64::NAN, 20.0],
            [3.0, f64::NAN],
            [5.0, 40.0],
        ];

        let mut imputer = Imputer::new(ImputeStrategy::Median);
        let result = imputer.fit_transform(&x).unwrap();

        // Column 0 finite values: {1, 3, 5} -> median 3
        assert!((result[[1, 0]] - 3.0).abs() < 1e-12);
        // Column 1 finite values: {10, 20, 40} -> median 20
        assert!((result[[2, 1]] - 20.0).abs() < 1e-12);
        // Existing values untouched
        assert!((result[[0, 0]] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_imputation() {
        let x = array![[2.0], [f64::NAN], [4.0]];

        let mut imputer = Imputer::new(ImputeStrategy::Mean);
        let result = imputer.fit_transform(&x).unwrap();

        assert!((result[[1, 0]] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_imputation() {
        let x = array![[f64::NAN], [7.0]];

        let mut imputer = Imputer::new(ImputeStrategy::Constant(-1.0));
        let result = imputer.fit_transform(&x).unwrap();

        assert!((result[[0, 0]] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_all_missing_column_falls_back_to_zero() {
        let x = array![[f64::NAN, 1.0], [f64::NAN, 2.0]];

        let mut imputer = Imputer::new(ImputeStrategy::Median);
        let result = imputer.fit_transform(&x).unwrap();

        assert!((result[[0, 0]]).abs() < 1e-12);
        assert!((result[[1, 0]]).abs() < 1e-12);
    }

    #[test]
    fn test_even_count_median_averages() {
        let x = array![[1.0], [2.0], [3.0], [4.0], [f64::NAN]];

        let mut imputer = Imputer::new(ImputeStrategy::Median);
        let result = imputer.fit_transform(&x).unwrap();

        assert!((result[[4, 0]] - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_transform_before_fit_fails() {
        let x = array![[1.0]];
        let imputer = Imputer::new(ImputeStrategy::Median);
        assert!(imputer.transform(&x).is_err());
    }

    #[test]
    fn test_column_count_mismatch() {
        let x = array![[1.0, 2.0], [3.0, 4.0]];
        let mut imputer = Imputer::new(ImputeStrategy::Median);
        imputer.fit(&x).unwrap();

        let narrow = array![[1.0], [2.0]];
        assert!(imputer.transform(&narrow).is_err());
    }
}

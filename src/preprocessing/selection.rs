//! Univariate feature selection

use crate::error::{Result, VintnerError};
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// Select the k features with the highest regression F-statistic.
///
/// For each feature the score is F = r^2 / (1 - r^2) * (n - 2), where r is
/// the Pearson correlation between the feature and the target. Selected
/// column indices are kept in ascending order so transformed matrices
/// preserve the original column ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectKBest {
    k: usize,
    scores: Option<Vec<f64>>,
    selected_features: Option<Vec<usize>>,
    n_features_in: Option<usize>,
}

impl SelectKBest {
    /// Create a selector keeping `k` features
    pub fn new(k: usize) -> Self {
        Self {
            k,
            scores: None,
            selected_features: None,
            n_features_in: None,
        }
    }

    /// Score all features against the target and pick the top k.
    ///
    /// `k` is clamped to `[1, n_features]`, so asking for more features than
    /// exist keeps them all.
    pub fn fit(&mut self, x: &Array2<f64>, y: &ndarray::Array1<f64>) -> Result<&mut Self> {
        let n_samples = x.nrows();
        let n_features = x.ncols();

        if n_samples < 3 {
            return Err(VintnerError::PreprocessingError(format!(
                "need at least 3 samples to score features, got {n_samples}"
            )));
        }
        if x.nrows() != y.len() {
            return Err(VintnerError::ShapeError {
                expected: format!("{} rows", x.nrows()),
                actual: format!("{} target values", y.len()),
            });
        }

        let scores: Vec<f64> = (0..n_features)
            .map(|col_idx| f_score(x.column(col_idx), y.view()))
            .collect();

        let k_eff = self.k.min(n_features).max(1);
        let mut indexed: Vec<(usize, f64)> = scores.iter().copied().enumerate().collect();
        indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let mut selected: Vec<usize> = indexed.into_iter().take(k_eff).map(|(i, _)| i).collect();
        selected.sort_unstable();

        self.scores = Some(scores);
        self.selected_features = Some(selected);
        self.n_features_in = Some(n_features);
        Ok(self)
    }

    /// Keep only the selected columns
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        let selected = self
            .selected_features
            .as_ref()
            .ok_or(VintnerError::ModelNotFitted)?;

        if let Some(n_in) = self.n_features_in {
            if x.ncols() != n_in {
                return Err(VintnerError::ShapeError {
                    expected: format!("{n_in} columns"),
                    actual: format!("{} columns", x.ncols()),
                });
            }
        }

        let mut result = Array2::zeros((x.nrows(), selected.len()));
        for (new_idx, &old_idx) in selected.iter().enumerate() {
            result.column_mut(new_idx).assign(&x.column(old_idx));
        }

        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, x: &Array2<f64>, y: &ndarray::Array1<f64>) -> Result<Array2<f64>> {
        self.fit(x, y)?;
        self.transform(x)
    }

    /// Get selected feature indices, ascending
    pub fn selected_indices(&self) -> Option<&[usize]> {
        self.selected_features.as_deref()
    }

    /// Get the per-feature F scores
    pub fn scores(&self) -> Option<&[f64]> {
        self.scores.as_deref()
    }
}

// F-statistic for a single feature (views avoid allocation)
fn f_score(x: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
    let n = x.len() as f64;
    let r = pearson_correlation(x, y);
    let r2 = r * r;

    if 1.0 - r2 <= f64::EPSILON {
        return f64::INFINITY;
    }
    r2 / (1.0 - r2) * (n - 2.0)
}

fn pearson_correlation(x: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
    let n = x.len() as f64;
    if n < 2.0 {
        return 0.0;
    }

    let x_mean = x.mean().unwrap_or(0.0);
    let y_mean = y.mean().unwrap_or(0.0);

    let x_std = (x.iter().map(|&v| (v - x_mean).powi(2)).sum::<f64>() / n).sqrt();
    let y_std = (y.iter().map(|&v| (v - y_mean).powi(2)).sum::<f64>() / n).sqrt();

    if x_std <= 0.0 || y_std <= 0.0 {
        return 0.0;
    }

    let covariance: f64 = x
        .iter()
        .zip(y.iter())
        .map(|(&x, &y)| (x - x_mean) * (y - y_mean))
        .sum::<f64>()
        / n;

    covariance / (x_std * y_std)
}

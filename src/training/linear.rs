//! Linear model implementations
//!
//! All three families fit an intercept by centering the design matrix, so
//! the regularized models never penalize the bias term.

use super::config::ModelType;
use crate::error::{Result, VintnerError};
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

/// Cholesky factorization A = L L^T. None if A is not positive definite.
fn cholesky_factor(a: &Array2<f64>) -> Option<Array2<f64>> {
    let n = a.nrows();
    let mut l = Array2::zeros((n, n));

    for i in 0..n {
        for j in 0..=i {
            let mut sum = 0.0;
            for k in 0..j {
                sum += l[[i, k]] * l[[j, k]];
            }

            if i == j {
                let diag = a[[i, i]] - sum;
                if diag <= 0.0 {
                    return None;
                }
                l[[i, j]] = diag.sqrt();
            } else {
                l[[i, j]] = (a[[i, j]] - sum) / l[[j, j]];
            }
        }
    }

    Some(l)
}

/// Solve L L^T x = b given the Cholesky factor L
fn solve_with_factor(l: &Array2<f64>, b: &Array1<f64>) -> Array1<f64> {
    let n = l.nrows();

    // Forward substitution: L * y = b
    let mut y = Array1::zeros(n);
    for i in 0..n {
        let mut sum = 0.0;
        for j in 0..i {
            sum += l[[i, j]] * y[j];
        }
        y[i] = (b[i] - sum) / l[[i, i]];
    }

    // Backward substitution: L^T * x = y
    let mut x = Array1::zeros(n);
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..n {
            sum += l[[j, i]] * x[j];
        }
        x[i] = (y[i] - sum) / l[[i, i]];
    }

    x
}

/// Solve a symmetric positive-definite system Ax = b, retrying once with a
/// small diagonal jitter when the factorization fails.
fn solve_spd(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    if let Some(l) = cholesky_factor(a) {
        return Some(solve_with_factor(&l, b));
    }

    let n = a.nrows();
    let jitter = 1e-8 * a.diag().iter().map(|v| v.abs()).sum::<f64>() / n as f64;
    let mut a_reg = a.clone();
    for k in 0..n {
        a_reg[[k, k]] += jitter;
    }

    cholesky_factor(&a_reg).map(|l| solve_with_factor(&l, b))
}

/// Matrix inversion via Gauss-Jordan elimination (last-resort fallback)
fn gauss_jordan_inverse(m: &Array2<f64>) -> Option<Array2<f64>> {
    let n = m.nrows();
    if n != m.ncols() {
        return None;
    }

    // Augmented matrix [M | I]
    let mut aug = Array2::zeros((n, 2 * n));
    for i in 0..n {
        for j in 0..n {
            aug[[i, j]] = m[[i, j]];
        }
        aug[[i, n + i]] = 1.0;
    }

    for col in 0..n {
        // Partial pivoting
        let mut max_row = col;
        for row in col + 1..n {
            if aug[[row, col]].abs() > aug[[max_row, col]].abs() {
                max_row = row;
            }
        }
        if max_row != col {
            for j in 0..2 * n {
                let tmp = aug[[col, j]];
                aug[[col, j]] = aug[[max_row, j]];
                aug[[max_row, j]] = tmp;
            }
        }

        if aug[[col, col]].abs() < 1e-10 {
            return None;
        }

        let pivot = aug[[col, col]];
        for j in 0..2 * n {
            aug[[col, j]] /= pivot;
        }

        for row in 0..n {
            if row != col {
                let factor = aug[[row, col]];
                for j in 0..2 * n {
                    aug[[row, j]] -= factor * aug[[col, j]];
                }
            }
        }
    }

    let mut inv = Array2::zeros((n, n));
    for i in 0..n {
        for j in 0..n {
            inv[[i, j]] = aug[[i, n + j]];
        }
    }

    Some(inv)
}

/// Solve the normal equations (X^T X) w = X^T y
fn solve_normal_equations(xtx: &Array2<f64>, xty: &Array1<f64>) -> Result<Array1<f64>> {
    if let Some(w) = solve_spd(xtx, xty) {
        return Ok(w);
    }

    gauss_jordan_inverse(xtx)
        .map(|inv| inv.dot(xty))
        .ok_or_else(|| VintnerError::TrainingError("normal equations are singular".to_string()))
}

fn check_train_shapes(x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
    if x.nrows() == 0 {
        return Err(VintnerError::TrainingError(
            "cannot fit on an empty training set".to_string(),
        ));
    }
    if x.nrows() != y.len() {
        return Err(VintnerError::ShapeError {
            expected: format!("{} target values", x.nrows()),
            actual: format!("{} target values", y.len()),
        });
    }
    Ok(())
}

/// Center x and y, returning the centered copies and their means
fn center(x: &Array2<f64>, y: &Array1<f64>) -> (Array2<f64>, Array1<f64>, Array1<f64>, f64) {
    let x_mean = x
        .mean_axis(Axis(0))
        .unwrap_or_else(|| Array1::zeros(x.ncols()));
    let y_mean = y.mean().unwrap_or(0.0);

    let x_centered = x - &x_mean.clone().insert_axis(Axis(0));
    let y_centered = y - y_mean;

    (x_centered, y_centered, x_mean, y_mean)
}

fn r_squared(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
    let y_mean = y_true.mean().unwrap_or(0.0);
    let ss_res = (y_pred - y_true).mapv(|v| v * v).sum();
    let ss_tot = y_true.mapv(|v| (v - y_mean).powi(2)).sum();

    if ss_tot == 0.0 {
        1.0
    } else {
        1.0 - ss_res / ss_tot
    }
}

/// Ordinary least squares regression
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinearRegression {
    coefficients: Option<Array1<f64>>,
    intercept: f64,
}

impl LinearRegression {
    /// Create an unfitted model
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit via the normal equations on centered data
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<&mut Self> {
        check_train_shapes(x, y)?;

        let (x_c, y_c, x_mean, y_mean) = center(x, y);
        let xtx = x_c.t().dot(&x_c);
        let xty = x_c.t().dot(&y_c);
        let coefficients = solve_normal_equations(&xtx, &xty)?;

        self.intercept = y_mean - coefficients.dot(&x_mean);
        self.coefficients = Some(coefficients);
        Ok(self)
    }

    /// Make predictions
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let coefficients = self
            .coefficients
            .as_ref()
            .ok_or(VintnerError::ModelNotFitted)?;
        Ok(x.dot(coefficients) + self.intercept)
    }

    /// R² on the given data
    pub fn score(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<f64> {
        let y_pred = self.predict(x)?;
        Ok(r_squared(y, &y_pred))
    }
}

/// Ridge regression (L2-regularized least squares)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RidgeRegression {
    alpha: f64,
    coefficients: Option<Array1<f64>>,
    intercept: f64,
}

impl Default for RidgeRegression {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl RidgeRegression {
    /// Create an unfitted model with the given regularization strength
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            coefficients: None,
            intercept: 0.0,
        }
    }

    /// Fit via the regularized normal equations (X^T X + alpha I) w = X^T y
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<&mut Self> {
        check_train_shapes(x, y)?;

        let (x_c, y_c, x_mean, y_mean) = center(x, y);
        let mut xtx = x_c.t().dot(&x_c);
        for i in 0..x.ncols() {
            xtx[[i, i]] += self.alpha;
        }
        let xty = x_c.t().dot(&y_c);
        let coefficients = solve_normal_equations(&xtx, &xty)?;

        self.intercept = y_mean - coefficients.dot(&x_mean);
        self.coefficients = Some(coefficients);
        Ok(self)
    }

    /// Make predictions
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let coefficients = self
            .coefficients
            .as_ref()
            .ok_or(VintnerError::ModelNotFitted)?;
        Ok(x.dot(coefficients) + self.intercept)
    }

    /// R² on the given data
    pub fn score(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<f64> {
        let y_pred = self.predict(x)?;
        Ok(r_squared(y, &y_pred))
    }
}

/// Lasso regression (L1-regularized, fitted by coordinate descent)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LassoRegression {
    alpha: f64,
    max_iter: usize,
    tol: f64,
    coefficients: Option<Array1<f64>>,
    intercept: f64,
}

impl Default for LassoRegression {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl LassoRegression {
    /// Create an unfitted model with the given regularization strength
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            max_iter: 10_000,
            tol: 1e-6,
            coefficients: None,
            intercept: 0.0,
        }
    }

    /// Set the iteration cap for coordinate descent
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Fit by cyclic coordinate descent with an incrementally updated residual
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<&mut Self> {
        check_train_shapes(x, y)?;

        let n_samples = x.nrows();
        let n_features = x.ncols();
        let (x_c, y_c, x_mean, y_mean) = center(x, y);

        let col_norms: Vec<f64> = (0..n_features)
            .map(|j| x_c.column(j).mapv(|v| v * v).sum())
            .collect();

        let mut w: Array1<f64> = Array1::zeros(n_features);
        let lambda = self.alpha * n_samples as f64;

        for _iter in 0..self.max_iter {
            let w_old = w.clone();
            let mut r = &y_c - &x_c.dot(&w);

            for j in 0..n_features {
                if col_norms[j] < 1e-15 {
                    w[j] = 0.0;
                    continue;
                }
                // rho = x_j^T r + col_norms[j] * w[j]
                let rho = x_c.column(j).dot(&r) + col_norms[j] * w[j];
                let old_wj = w[j];
                w[j] = soft_threshold(rho, lambda) / col_norms[j];
                if (old_wj - w[j]).abs() > 0.0 {
                    r = r + &(&x_c.column(j) * (old_wj - w[j]));
                }
            }

            let diff = (&w - &w_old).mapv(|v| v.abs()).sum();
            if diff < self.tol {
                break;
            }
        }

        self.intercept = y_mean - w.dot(&x_mean);
        self.coefficients = Some(w);
        Ok(self)
    }

    /// Make predictions
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let coefficients = self
            .coefficients
            .as_ref()
            .ok_or(VintnerError::ModelNotFitted)?;
        Ok(x.dot(coefficients) + self.intercept)
    }

    /// R² on the given data
    pub fn score(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<f64> {
        let y_pred = self.predict(x)?;
        Ok(r_squared(y, &y_pred))
    }
}

/// Soft-threshold operator for the L1 proximal step
fn soft_threshold(value: f64, threshold: f64) -> f64 {
    if value > threshold {
        value - threshold
    } else if value < -threshold {
        value + threshold
    } else {
        0.0
    }
}

/// A regressor of any supported family.
///
/// Serializes as one externally tagged variant, so saved artifacts carry
/// the model family next to its fitted parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regressor {
    Linear(LinearRegression),
    Ridge(RidgeRegression),
    Lasso(LassoRegression),
}

impl Regressor {
    /// Create an unfitted regressor. `alpha` only applies to the
    /// regularized families.
    pub fn new(model_type: ModelType, alpha: f64) -> Self {
        match model_type {
            ModelType::Linear => Regressor::Linear(LinearRegression::new()),
            ModelType::Ridge => Regressor::Ridge(RidgeRegression::new(alpha)),
            ModelType::Lasso => Regressor::Lasso(LassoRegression::new(alpha)),
        }
    }

    /// Fit the underlying model
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        match self {
            Regressor::Linear(m) => m.fit(x, y).map(|_| ()),
            Regressor::Ridge(m) => m.fit(x, y).map(|_| ()),
            Regressor::Lasso(m) => m.fit(x, y).map(|_| ()),
        }
    }

    /// Make predictions with the underlying model
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        match self {
            Regressor::Linear(m) => m.predict(x),
            Regressor::Ridge(m) => m.predict(x),
            Regressor::Lasso(m) => m.predict(x),
        }
    }

    /// Which family this regressor belongs to
    pub fn kind(&self) -> ModelType {
        match self {
            Regressor::Linear(_) => ModelType::Linear,
            Regressor::Ridge(_) => ModelType::Ridge,
            Regressor::Lasso(_) => ModelType::Lasso,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_linear_regression_recovers_coefficients() {
        // y = 2*x1 + 3*x2 + 1
        let x = array![
            [1.0, 1.0],
            [2.0, 1.0],
            [1.0, 2.0],
            [2.0, 2.0],
            [3.0, 1.0],
        ];
        let y = array![6.0, 8.0, 9.0, 11.0, 10.0];

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        let coef = model.coefficients.as_ref().unwrap();
        assert!((coef[0] - 2.0).abs() < 1e-8, "coef[0] = {}", coef[0]);
        assert!((coef[1] - 3.0).abs() < 1e-8, "coef[1] = {}", coef[1]);
        assert!((model.intercept - 1.0).abs() < 1e-8);

        let r2 = model.score(&x, &y).unwrap();
        assert!(r2 > 0.999, "R² should be ~1, got {r2}");
    }

    #[test]
    fn test_predict_unfitted_fails() {
        let x = array![[1.0, 2.0]];
        let model = LinearRegression::new();
        assert!(matches!(
            model.predict(&x),
            Err(VintnerError::ModelNotFitted)
        ));
    }

    #[test]
    fn test_ridge_shrinks_coefficients() {
        let x = array![[1.0], [2.0], [3.0], [4.0], [5.0]];
        let y = array![2.1, 3.9, 6.2, 7.8, 10.0];

        let mut ols = LinearRegression::new();
        ols.fit(&x, &y).unwrap();
        let mut ridge = RidgeRegression::new(10.0);
        ridge.fit(&x, &y).unwrap();

        let w_ols = ols.coefficients.as_ref().unwrap()[0].abs();
        let w_ridge = ridge.coefficients.as_ref().unwrap()[0].abs();
        assert!(w_ridge < w_ols);
    }

    #[test]
    fn test_ridge_fits_clean_line() {
        let x = array![[1.0, 1.0], [2.0, 2.0], [3.0, 3.5], [4.0, 4.0]];
        let y = array![2.0, 4.0, 6.5, 8.0];

        let mut model = RidgeRegression::new(0.01);
        model.fit(&x, &y).unwrap();

        let r2 = model.score(&x, &y).unwrap();
        assert!(r2 > 0.95, "Ridge R² = {r2}");
    }

    #[test]
    fn test_lasso_zeroes_uninformative_feature() {
        // Column 0 explains y fully, column 1 is small noise
        let x = array![
            [1.0, 0.3],
            [2.0, -0.2],
            [3.0, 0.1],
            [4.0, -0.4],
            [5.0, 0.2],
            [6.0, -0.1],
        ];
        let y = array![2.0, 4.0, 6.0, 8.0, 10.0, 12.0];

        let mut model = LassoRegression::new(0.5);
        model.fit(&x, &y).unwrap();

        let coef = model.coefficients.as_ref().unwrap();
        assert_eq!(coef[1], 0.0, "noise coefficient should be exactly zero");
        assert!(coef[0] > 1.0);

        let r2 = model.score(&x, &y).unwrap();
        assert!(r2 > 0.95, "Lasso R² = {r2}");
    }

    #[test]
    fn test_lasso_max_iter_builder() {
        let x = array![[1.0], [2.0], [3.0], [4.0]];
        let y = array![2.0, 4.0, 6.0, 8.0];

        let mut model = LassoRegression::new(0.01).with_max_iter(50);
        model.fit(&x, &y).unwrap();

        let r2 = model.score(&x, &y).unwrap();
        assert!(r2 > 0.9, "Lasso R² = {r2}");
    }

    #[test]
    fn test_regressor_dispatch() {
        let x = array![[1.0], [2.0], [3.0], [4.0]];
        let y = array![3.0, 5.0, 7.0, 9.0];

        for model_type in [ModelType::Linear, ModelType::Ridge, ModelType::Lasso] {
            let mut regressor = Regressor::new(model_type, 0.01);
            regressor.fit(&x, &y).unwrap();

            assert_eq!(regressor.kind(), model_type);
            let preds = regressor.predict(&x).unwrap();
            assert_eq!(preds.len(), 4);
        }
    }

    #[test]
    fn test_regressor_serializes_with_family_tag() {
        let mut regressor = Regressor::new(ModelType::Ridge, 0.5);
        let x = array![[1.0], [2.0], [3.0]];
        let y = array![1.0, 2.0, 3.0];
        regressor.fit(&x, &y).unwrap();

        let value = serde_json::to_value(&regressor).unwrap();
        assert!(value.get("ridge").is_some());

        let restored: Regressor = serde_json::from_value(value).unwrap();
        assert_eq!(restored.kind(), ModelType::Ridge);
        assert_eq!(
            restored.predict(&x).unwrap(),
            regressor.predict(&x).unwrap()
        );
    }

    #[test]
    fn test_cholesky_solves_spd_system() {
        let a = array![[4.0, 2.0], [2.0, 3.0]];
        let b = array![1.0, 2.0];

        let x = solve_spd(&a, &b).unwrap();
        assert!((x[0] + 0.125).abs() < 1e-10);
        assert!((x[1] - 0.75).abs() < 1e-10);
    }

    #[test]
    fn test_singular_system_errors() {
        let xtx = Array2::zeros((2, 2));
        let xty = array![1.0, 1.0];

        let err = solve_normal_equations(&xtx, &xty).unwrap_err();
        assert!(err.to_string().contains("singular"));
    }

    #[test]
    fn test_soft_threshold() {
        assert_eq!(soft_threshold(3.0, 1.0), 2.0);
        assert_eq!(soft_threshold(-3.0, 1.0), -2.0);
        assert_eq!(soft_threshold(0.5, 1.0), 0.0);
        assert_eq!(soft_threshold(-0.5, 1.0), 0.0);
    }
}

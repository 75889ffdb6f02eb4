//! Seeded train/test splitting

use crate::error::{Result, VintnerError};
use ndarray::{Array1, Array2, Axis};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Split features and target into train and test partitions.
///
/// Row indices are shuffled with a ChaCha8 generator seeded from `seed`, so
/// the same seed always yields the same partition. The first
/// `ceil(n * test_size)` shuffled rows form the test set.
pub fn train_test_split(
    x: &Array2<f64>,
    y: &Array1<f64>,
    test_size: f64,
    seed: u64,
) -> Result<(Array2<f64>, Array2<f64>, Array1<f64>, Array1<f64>)> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(VintnerError::InvalidParameter {
            name: "test_size".to_string(),
            value: test_size.to_string(),
            reason: "must be strictly between 0 and 1".to_string(),
        });
    }
    if x.nrows() != y.len() {
        return Err(VintnerError::ShapeError {
            expected: format!("{} rows", x.nrows()),
            actual: format!("{} target values", y.len()),
        });
    }

    let n_samples = x.nrows();
    let n_test = ((n_samples as f64) * test_size).ceil() as usize;
    if n_test == 0 || n_test >= n_samples {
        return Err(VintnerError::DataError(format!(
            "cannot split {n_samples} samples with test_size {test_size}: one partition is empty"
        )));
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_idx = &indices[..n_test];
    let train_idx = &indices[n_test..];

    let x_train = x.select(Axis(0), train_idx);
    let x_test = x.select(Axis(0), test_idx);
    let y_train = y.select(Axis(0), train_idx);
    let y_test = y.select(Axis(0), test_idx);

    Ok((x_train, x_test, y_train, y_test))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn make_data(n: usize) -> (Array2<f64>, Array1<f64>) {
        let x = Array2::from_shape_fn((n, 3), |(r, c)| (r * 3 + c) as f64);
        let y = Array1::from_shape_fn(n, |i| i as f64);
        (x, y)
    }

    #[test]
    fn test_split_sizes() {
        let (x, y) = make_data(10);
        let (x_train, x_test, y_train, y_test) =
            train_test_split(&x, &y, 0.2, 42).unwrap();

        assert_eq!(x_test.nrows(), 2);
        assert_eq!(x_train.nrows(), 8);
        assert_eq!(y_test.len(), 2);
        assert_eq!(y_train.len(), 8);
    }

    #[test]
    fn test_split_ceil_rounding() {
        // 7 * 0.25 = 1.75 -> 2 test rows
        let (x, y) = make_data(7);
        let (_, x_test, _, _) = train_test_split(&x, &y, 0.25, 42).unwrap();
        assert_eq!(x_test.nrows(), 2);
    }

    #[test]
    fn test_split_deterministic() {
        let (x, y) = make_data(20);
        let (a_train, a_test, _, _) = train_test_split(&x, &y, 0.3, 7).unwrap();
        let (b_train, b_test, _, _) = train_test_split(&x, &y, 0.3, 7).unwrap();

        assert_eq!(a_train, b_train);
        assert_eq!(a_test, b_test);
    }

    #[test]
    fn test_split_seed_changes_partition() {
        let (x, y) = make_data(50);
        let (_, a_test, _, _) = train_test_split(&x, &y, 0.2, 1).unwrap();
        let (_, b_test, _, _) = train_test_split(&x, &y, 0.2, 2).unwrap();

        assert_ne!(a_test, b_test);
    }

    #[test]
    fn test_split_partitions_cover_all_rows() {
        let (x, y) = make_data(12);
        let (x_train, x_test, y_train, y_test) =
            train_test_split(&x, &y, 0.25, 42).unwrap();

        // y values are the original row indices; together they must be 0..12
        let mut seen: Vec<f64> = y_train.iter().chain(y_test.iter()).copied().collect();
        seen.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let expected: Vec<f64> = (0..12).map(|i| i as f64).collect();
        assert_eq!(seen, expected);
        assert_eq!(x_train.nrows() + x_test.nrows(), 12);
    }

    #[test]
    fn test_invalid_test_size() {
        let (x, y) = make_data(10);
        assert!(train_test_split(&x, &y, 0.0, 42).is_err());
        assert!(train_test_split(&x, &y, 1.0, 42).is_err());
        assert!(train_test_split(&x, &y, -0.5, 42).is_err());
    }

    #[test]
    fn test_mismatched_rows() {
        let (x, _) = make_data(10);
        let (_, y) = make_data(8);
        assert!(train_test_split(&x, &y, 0.2, 42).is_err());
    }
}

//! CSV dataset loading

use crate::error::{Result, VintnerError};
use ndarray::{Array1, Array2};
use polars::prelude::*;
use std::fs::File;

/// CSV loader preconfigured for the wine-quality dataset layout.
///
/// The UCI red-wine CSV uses `;` as field separator, so that is the default.
pub struct DatasetLoader {
    separator: u8,
    has_header: bool,
    infer_schema_length: Option<usize>,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetLoader {
    /// Create a loader with the wine dataset defaults
    pub fn new() -> Self {
        Self {
            separator: b';',
            has_header: true,
            infer_schema_length: Some(100),
        }
    }

    /// Set the field separator
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    /// Set whether the file starts with a header row
    pub fn with_has_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Load a CSV file into a DataFrame
    pub fn load(&self, path: &str) -> Result<DataFrame> {
        let file = File::open(path)
            .map_err(|_| VintnerError::DataError(format!("Dataset not found at: {path}")))?;

        let parse_opts = CsvParseOptions::default().with_separator(self.separator);

        CsvReadOptions::default()
            .with_has_header(self.has_header)
            .with_infer_schema_length(self.infer_schema_length)
            .with_parse_options(parse_opts)
            .into_reader_with_file_handle(file)
            .finish()
            .map_err(|e| VintnerError::DataError(e.to_string()))
    }
}

/// Split a DataFrame into a feature matrix and a target vector.
///
/// Feature column order follows the DataFrame with the target removed; the
/// returned names record that order for later prediction requests. Missing
/// feature cells become NaN so the imputer can fill them.
pub fn features_and_target(
    df: &DataFrame,
    target_column: &str,
) -> Result<(Array2<f64>, Array1<f64>, Vec<String>)> {
    let all_names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect();

    if !all_names.iter().any(|n| n == target_column) {
        return Err(VintnerError::FeatureNotFound(format!(
            "target column '{}' (available: {})",
            target_column,
            all_names.join(", ")
        )));
    }

    let feature_names: Vec<String> = all_names
        .into_iter()
        .filter(|n| n != target_column)
        .collect();

    let target_f64 = df
        .column(target_column)
        .map_err(|_| VintnerError::FeatureNotFound(target_column.to_string()))?
        .cast(&DataType::Float64)
        .map_err(|e| VintnerError::DataError(e.to_string()))?;

    let y: Array1<f64> = target_f64
        .f64()
        .map_err(|e| VintnerError::DataError(e.to_string()))?
        .into_iter()
        .map(|v| v.unwrap_or(0.0))
        .collect();

    let x = columns_to_array2(df, &feature_names)?;

    Ok((x, y, feature_names))
}

/// Extract named columns from a DataFrame into a row-major Array2<f64>.
/// Null cells map to NaN rather than a filler value; imputation decides later.
fn columns_to_array2(df: &DataFrame, col_names: &[String]) -> Result<Array2<f64>> {
    let n_rows = df.height();
    let n_cols = col_names.len();

    let col_data: Vec<Vec<f64>> = col_names
        .iter()
        .map(|col_name| {
            let column = df
                .column(col_name)
                .map_err(|_| VintnerError::FeatureNotFound(col_name.clone()))?;
            let casted = column
                .cast(&DataType::Float64)
                .map_err(|_| {
                    VintnerError::DataError(format!("column '{col_name}' is not numeric"))
                })?;
            let values: Vec<f64> = casted
                .f64()
                .map_err(|e| VintnerError::DataError(e.to_string()))?
                .into_iter()
                .map(|v| v.unwrap_or(f64::NAN))
                .collect();
            Ok(values)
        })
        .collect::<Result<Vec<Vec<f64>>>>()?;

    let col_refs: Vec<&[f64]> = col_data.iter().map(|c| c.as_slice()).collect();
    Ok(Array2::from_shape_fn((n_rows, n_cols), |(r, c)| {
        col_refs[c][r]
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_semicolon_csv() -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        writeln!(file, "acidity;sugar;quality").unwrap();
        writeln!(file, "7.4;1.9;5").unwrap();
        writeln!(file, "7.8;2.6;5").unwrap();
        writeln!(file, "11.2;1.9;6").unwrap();
        file
    }

    #[test]
    fn test_load_semicolon_csv() {
        let file = create_semicolon_csv();
        let df = DatasetLoader::new()
            .load(file.path().to_str().unwrap())
            .unwrap();

        assert_eq!(df.height(), 3);
        assert_eq!(df.width(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let err = DatasetLoader::new().load("no/such/file.csv").unwrap_err();
        assert!(err.to_string().contains("Dataset not found at: no/such/file.csv"));
    }

    #[test]
    fn test_features_and_target() {
        let file = create_semicolon_csv();
        let df = DatasetLoader::new()
            .load(file.path().to_str().unwrap())
            .unwrap();

        let (x, y, names) = features_and_target(&df, "quality").unwrap();

        assert_eq!(x.nrows(), 3);
        assert_eq!(x.ncols(), 2);
        assert_eq!(y.len(), 3);
        assert_eq!(names, vec!["acidity".to_string(), "sugar".to_string()]);
        assert!((x[[0, 0]] - 7.4).abs() < 1e-12);
        assert!((y[2] - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_target_column_lists_available() {
        let file = create_semicolon_csv();
        let df = DatasetLoader::new()
            .load(file.path().to_str().unwrap())
            .unwrap();

        let err = features_and_target(&df, "score").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("target column 'score'"));
        assert!(msg.contains("acidity"));
    }
}

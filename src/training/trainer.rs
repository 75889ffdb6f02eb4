//! End-to-end training runs

use super::config::TrainConfig;
use super::linear::Regressor;
use super::metrics::RegressionMetrics;
use crate::data::{features_and_target, train_test_split, DatasetLoader};
use crate::error::Result;
use crate::pipeline::QualityPipeline;
use crate::preprocessing::{PreprocessConfig, Preprocessor};
use chrono::{SecondsFormat, Utc};
use std::time::Instant;
use tracing::info;

/// Summary of a completed training run
#[derive(Debug, Clone)]
pub struct TrainReport {
    /// Held-out evaluation metrics
    pub metrics: RegressionMetrics,
    /// Where the pipeline artifact was written
    pub model_path: String,
    /// Where the results record was written
    pub results_path: String,
    /// Rows used for fitting
    pub n_train: usize,
    /// Rows held out for evaluation
    pub n_test: usize,
    /// Names of the features the selector kept
    pub selected_features: Vec<String>,
    /// Wall-clock duration of the run
    pub elapsed_secs: f64,
}

/// Runs the full train-evaluate-persist flow for one configuration
pub struct Trainer {
    config: TrainConfig,
}

impl Trainer {
    /// Create a trainer for the given configuration
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the run: load, split, fit, evaluate, persist.
    ///
    /// Writes `model.json` (the fitted pipeline) and `results.json` (metrics
    /// plus the experiment knobs) under the configured output directory.
    pub fn run(&self) -> Result<TrainReport> {
        let start = Instant::now();
        let cfg = &self.config;

        let df = DatasetLoader::new()
            .with_separator(cfg.separator)
            .load(&cfg.data_path)?;
        let (x, y, feature_names) = features_and_target(&df, &cfg.target_column)?;
        info!(
            "Loaded dataset from {}: {} rows, {} features",
            cfg.data_path,
            x.nrows(),
            x.ncols()
        );

        let (x_train, x_test, y_train, y_test) =
            train_test_split(&x, &y, cfg.test_size, cfg.random_state)?;
        info!(
            "Split with seed {}: {} train rows, {} test rows",
            cfg.random_state,
            x_train.nrows(),
            x_test.nrows()
        );

        let mut preprocessor = Preprocessor::new(
            PreprocessConfig::new()
                .with_scaler(cfg.use_scaler)
                .with_k_best(cfg.k_best),
        );
        let x_train_t = preprocessor.fit_transform(&x_train, &y_train)?;
        let x_test_t = preprocessor.transform(&x_test)?;

        let selected_features: Vec<String> = preprocessor
            .selected_indices()
            .map(|indices| indices.iter().map(|&i| feature_names[i].clone()).collect())
            .unwrap_or_default();
        info!("Selected features: {}", selected_features.join(", "));

        let mut regressor = Regressor::new(cfg.model_type, cfg.alpha);
        regressor.fit(&x_train_t, &y_train)?;

        let y_pred = regressor.predict(&x_test_t)?;
        let metrics = RegressionMetrics::compute(&y_test, &y_pred)?;
        info!(
            "Evaluated {} model: mse={:.6} r2={:.6}",
            cfg.model_type, metrics.mse, metrics.r2
        );

        std::fs::create_dir_all(&cfg.output_dir)?;

        let pipeline =
            QualityPipeline::from_parts(feature_names, preprocessor, regressor, cfg.clone());
        let model_path = format!("{}/model.json", cfg.output_dir);
        pipeline.save(&model_path)?;

        let results_path = format!("{}/results.json", cfg.output_dir);
        self.write_results(&results_path, &metrics)?;

        Ok(TrainReport {
            metrics,
            model_path,
            results_path,
            n_train: x_train.nrows(),
            n_test: x_test.nrows(),
            selected_features,
            elapsed_secs: start.elapsed().as_secs_f64(),
        })
    }

    fn write_results(&self, path: &str, metrics: &RegressionMetrics) -> Result<()> {
        let cfg = &self.config;
        let results = serde_json::json!({
            "mse": metrics.mse,
            "r2": metrics.r2,
            "timestamp_utc": Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            "experiment": {
                "model_type": cfg.model_type,
                "alpha": cfg.alpha,
                "test_size": cfg.test_size,
                "use_scaler": cfg.use_scaler,
                "k_best": cfg.k_best,
                "random_state": cfg.random_state,
            },
        });
        std::fs::write(path, serde_json::to_string_pretty(&results)?)?;
        Ok(())
    }
}

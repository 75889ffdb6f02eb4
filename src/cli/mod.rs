//! Command-line interface for training, serving, and one-off predictions

use clap::{Parser, Subcommand};
use colored::*;
use std::time::Instant;

use crate::pipeline::QualityPipeline;
use crate::server::{run_server, ServerConfig};
use crate::training::{ModelType, TrainConfig, Trainer};

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString {
    s.truecolor(100, 100, 100)
}
fn accent(s: &str) -> ColoredString {
    s.truecolor(120, 170, 255)
}
fn muted(s: &str) -> ColoredString {
    s.truecolor(140, 140, 140)
}
fn ok(s: &str) -> ColoredString {
    s.truecolor(100, 210, 120)
}

fn kv(key: &str, val: &str) -> String {
    format!("  {} {}", muted(key), val.white())
}

fn step_ok(msg: &str) {
    println!("  {} {}", ok("✓"), msg);
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "vintner")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Wine quality regression: training pipeline and prediction API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Train a regression pipeline on a wine-quality CSV
    Train {
        /// Input dataset (`;`-separated CSV with a header row)
        #[arg(short, long, default_value = "dataset/winequality-red.csv")]
        data: String,

        /// Target column name
        #[arg(short, long, default_value = "quality")]
        target: String,

        /// Regressor family (linear, ridge, lasso)
        #[arg(short, long, default_value = "linear")]
        model: String,

        /// Regularization strength for ridge and lasso
        #[arg(long, default_value = "1.0")]
        alpha: f64,

        /// Fraction of rows held out for evaluation
        #[arg(long, default_value = "0.2")]
        test_size: f64,

        /// Standard-scale features before selection
        #[arg(long)]
        scale: bool,

        /// Number of features kept by univariate selection
        #[arg(long, default_value = "6")]
        k_best: usize,

        /// Seed for the train/test shuffle
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Directory receiving model.json and results.json
        #[arg(short, long, default_value = "outputs")]
        output: String,
    },

    /// Serve predictions from a trained artifact over HTTP
    Serve {
        /// Host to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to bind
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to the model artifact
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Predict a quality score for one feature vector
    Predict {
        /// Path to the model artifact
        #[arg(short, long, default_value = "outputs/model.json")]
        model: String,

        /// Comma-separated feature values, in training column order
        #[arg(short, long)]
        features: String,
    },

    /// Show metadata of a trained artifact
    Info {
        /// Path to the model artifact
        #[arg(short, long, default_value = "outputs/model.json")]
        model: String,
    },
}

// ─── Commands ──────────────────────────────────────────────────────────────────

pub fn cmd_train(
    data: &str,
    target: &str,
    model: &str,
    alpha: f64,
    test_size: f64,
    scale: bool,
    k_best: usize,
    seed: u64,
    output: &str,
) -> anyhow::Result<()> {
    let model_type: ModelType = model.parse()?;
    let config = TrainConfig::new(data)
        .with_target_column(target)
        .with_model_type(model_type)
        .with_alpha(alpha)
        .with_test_size(test_size)
        .with_scaler(scale)
        .with_k_best(k_best)
        .with_random_state(seed)
        .with_output_dir(output);

    section("Training");
    println!("{}", kv("dataset", data));
    println!("{}", kv("model  ", &model_type.to_string()));
    println!("{}", kv("seed   ", &seed.to_string()));

    let report = Trainer::new(config).run()?;

    section("Results");
    println!("{}", kv("train rows", &report.n_train.to_string()));
    println!("{}", kv("test rows ", &report.n_test.to_string()));
    println!("{}", kv("features  ", &report.selected_features.join(", ")));
    println!("  {} {:.6}", muted("MSE:"), report.metrics.mse);
    println!("  {} {:.6}", muted("R2: "), report.metrics.r2);
    println!();
    step_ok(&format!("Saved model to: {}", accent(&report.model_path)));
    step_ok(&format!("Saved results to: {}", accent(&report.results_path)));
    println!("  {}", dim(&format!("{:.2}s elapsed", report.elapsed_secs)));

    Ok(())
}

pub async fn cmd_serve(
    host: Option<String>,
    port: Option<u16>,
    model: Option<String>,
) -> anyhow::Result<()> {
    let mut config = ServerConfig::default();
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(model) = model {
        config.model_path = model;
    }

    section("Serving");
    println!("{}", kv("address", &format!("{}:{}", config.host, config.port)));
    println!("{}", kv("model  ", &config.model_path));
    println!();

    run_server(config).await
}

pub fn cmd_predict(model: &str, features: &str) -> anyhow::Result<()> {
    let values = parse_features(features)?;

    let start = Instant::now();
    let pipeline = QualityPipeline::load(model)?;
    let quality = pipeline.predict_quality(&values)?;

    section("Prediction");
    println!("{}", kv("model   ", model));
    println!("{}", kv("features", &values.len().to_string()));
    println!();
    println!("  {} {}", muted("wine_quality:"), quality.to_string().white().bold());
    println!("  {}", dim(&format!("{:.0}ms", start.elapsed().as_secs_f64() * 1000.0)));

    Ok(())
}

pub fn cmd_info(model: &str) -> anyhow::Result<()> {
    let pipeline = QualityPipeline::load(model)?;

    section("Model");
    println!("{}", kv("path      ", model));
    println!("{}", kv("kind      ", &pipeline.model_kind().to_string()));
    println!("{}", kv("features  ", &pipeline.n_features().to_string()));
    println!("{}", kv("trained at", pipeline.trained_at()));
    println!("{}", kv("columns   ", &pipeline.feature_names().join(", ")));

    Ok(())
}

fn parse_features(raw: &str) -> anyhow::Result<Vec<f64>> {
    raw.split(',')
        .map(|field| {
            field
                .trim()
                .parse::<f64>()
                .map_err(|_| anyhow::anyhow!("invalid feature value: '{}'", field.trim()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_features() {
        let values = parse_features("7.4, 0.7,0.0").unwrap();
        assert_eq!(values, vec![7.4, 0.7, 0.0]);
    }

    #[test]
    fn test_parse_features_rejects_garbage() {
        let err = parse_features("7.4,abc").unwrap_err();
        assert!(err.to_string().contains("'abc'"));
    }
}

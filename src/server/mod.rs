//! HTTP serving for a trained wine-quality pipeline
//!
//! The server loads the pipeline artifact exactly once at startup and fails
//! the whole process if it is missing or unparseable. After that the model
//! is read-only, shared across handlers through an `Arc`.

mod api;
mod error;
mod handlers;
mod state;

pub use api::create_router;
pub use error::ServerError;
pub use handlers::PredictRequest;
pub use state::AppState;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use crate::pipeline::QualityPipeline;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub model_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("VINTNER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("VINTNER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            model_path: std::env::var("VINTNER_MODEL_PATH")
                .unwrap_or_else(|_| "outputs/model.json".to_string()),
        }
    }
}

/// Start the server with the given configuration.
///
/// Returns an error (and never serves a request) when the model artifact
/// cannot be loaded; there is no degraded mode.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let pipeline = QualityPipeline::load(&config.model_path)?;
    info!(
        model_path = %config.model_path,
        model_kind = %pipeline.model_kind(),
        n_features = pipeline.n_features(),
        trained_at = %pipeline.trained_at(),
        "Model artifact loaded"
    );

    let state = Arc::new(AppState::new(pipeline));
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        address = %addr,
        pid = std::process::id(),
        "Server listening and ready to accept connections"
    );

    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        info!("Shutdown signal received, stopping server gracefully");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shut down cleanly");
    Ok(())
}

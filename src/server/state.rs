//! Application state management

use crate::pipeline::QualityPipeline;
use std::sync::Arc;

/// State shared across request handlers.
///
/// The pipeline is loaded once at startup and never mutated afterwards, so
/// handlers share it through a plain `Arc` with no locking.
pub struct AppState {
    pub pipeline: Arc<QualityPipeline>,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(pipeline: QualityPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            started_at: chrono::Utc::now(),
        }
    }

    /// Whole seconds since the server finished loading the artifact
    pub fn uptime_secs(&self) -> i64 {
        chrono::Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }
}

//! REST API Server for Document Conversion
//!
//! Serves the conversion pipeline over HTTP:
//! - `GET /health` - liveness check
//! - `POST /convert?url=...&output_format=markdown|json` - synchronous conversion
//! - `POST /queue?url=...&output_format=...` - enqueue for background conversion
//! - `GET /queue/{job_id}` - queue job status
//!
//! A background worker drains the queue directory into the processed
//! directory (see [`queue`]).

mod download;
mod handlers;
pub mod queue;
mod types;

use axum::{
    routing::{get, post},
    Router,
};
use docling_api_backend::DocumentConverter;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use handlers::*;
pub use queue::QueueConfig;
pub use types::*;

/// Job map size at which completed and failed records are evicted
pub(crate) const MAX_JOB_RECORDS: usize = 1024;

/// Drop terminal records so the map stays bounded on a long-running server
pub(crate) fn evict_terminal_jobs(jobs: &mut HashMap<String, JobRecord>) {
    jobs.retain(|_, record| {
        !matches!(record.status, JobStatus::Completed | JobStatus::Failed)
    });
}

/// API server state shared across handlers and the queue worker
#[derive(Clone)]
pub struct ApiState {
    /// Document converter dispatching to the format backends
    pub converter: Arc<DocumentConverter>,
    /// Queue job records (`job_id` -> `JobRecord`)
    pub jobs: Arc<RwLock<HashMap<String, JobRecord>>>,
    /// Queue directory layout
    pub config: Arc<QueueConfig>,
}

impl ApiState {
    /// Create state with queue directories resolved from the environment
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(QueueConfig::from_env())
    }

    /// Create state with an explicit queue configuration
    #[must_use]
    pub fn with_config(config: QueueConfig) -> Self {
        Self {
            converter: Arc::new(DocumentConverter::new()),
            jobs: Arc::new(RwLock::new(HashMap::with_capacity(64))),
            config: Arc::new(config),
        }
    }

    /// Record a job, evicting terminal records once the map is at capacity
    pub async fn record_job(&self, record: JobRecord) {
        let mut jobs = self.jobs.write().await;
        if jobs.len() >= MAX_JOB_RECORDS && !jobs.contains_key(&record.job_id) {
            evict_terminal_jobs(&mut jobs);
        }
        jobs.insert(record.job_id.clone(), record);
    }
}

impl Default for ApiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the API router with all endpoints
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/convert", post(convert_document))
        .route("/queue", post(queue_submit))
        .route("/queue/{job_id}", get(queue_status))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the API server
pub async fn start_server(addr: &str, state: ApiState) -> Result<(), std::io::Error> {
    tracing::info!("Starting API server on {}", addr);

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await
}

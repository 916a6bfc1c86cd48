//! API Server Binary Entry Point

use docling_api_models::ModelRegistry;
use docling_api_server::{queue, ApiState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docling_api_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Get bind address from environment or use default
    let addr = std::env::var("DOCLING_API_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

    // Model artifacts are expected to be prefetched by download-models;
    // a gap is reported but does not block serving
    let registry = ModelRegistry::from_env();
    registry.ensure_artifacts_dir()?;
    if !registry.is_complete() {
        let missing: Vec<_> = registry
            .verify()
            .into_iter()
            .filter(|s| !s.present)
            .map(|s| s.artifact.name)
            .collect();
        tracing::warn!(
            "Model artifacts missing under {}: {missing:?} (run download-models)",
            registry.root().display()
        );
    }

    // Create API state and scaffold the queue directories
    let state = ApiState::new();
    state.config.ensure_dirs()?;

    // Start the queue worker
    queue::spawn_worker(state.clone());

    // Start server
    tracing::info!("Starting document conversion API server");
    docling_api_server::start_server(&addr, state).await?;

    Ok(())
}

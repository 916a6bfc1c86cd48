//! Model artifact download tool
//!
//! Fetches the built-in artifact registry into the artifacts root so the
//! conversion service starts with everything on disk. Intended to run as
//! an image build step, ahead of the server binary.

use clap::Parser;
use docling_api_models::ModelRegistry;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "download-models",
    about = "Download model artifacts for the docling-api service",
    version
)]
struct Args {
    /// Artifacts root directory (overrides DOCLING_MODELS_PATH)
    #[arg(long)]
    models_path: Option<PathBuf>,

    /// Only report which artifacts are present, download nothing
    #[arg(long)]
    verify: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docling_api_models=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let registry = match args.models_path {
        Some(path) => ModelRegistry::new(path),
        None => ModelRegistry::from_env(),
    };
    tracing::info!("Artifacts root: {}", registry.root().display());

    if args.verify {
        let mut missing = 0;
        for status in registry.verify() {
            let state = if status.present { "present" } else { "missing" };
            tracing::info!("{:<16} {}", status.artifact.name, state);
            if !status.present {
                missing += 1;
            }
        }
        if missing > 0 {
            anyhow::bail!("{missing} artifact(s) missing");
        }
        return Ok(());
    }

    let downloaded = registry.download_all().await?;
    tracing::info!(
        "Done: {} downloaded, {} total",
        downloaded,
        registry.artifacts().len()
    );
    Ok(())
}

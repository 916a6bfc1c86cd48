//! # docling-api-models - Model Artifact Management
//!
//! Registry and download tooling for the model artifacts the conversion
//! service keeps on disk. The artifacts root is resolved from the
//! `DOCLING_MODELS_PATH` environment variable and defaults to
//! `/app/model_artifacts`; the `download-models` binary fetches the
//! registry ahead of serving so the service never downloads at request
//! time.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use docling_api_models::ModelRegistry;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let registry = ModelRegistry::from_env();
//! registry.ensure_artifacts_dir()?;
//! registry.download_all().await?;
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming the artifacts root
pub const MODELS_PATH_ENV: &str = "DOCLING_MODELS_PATH";

/// Artifacts root used when `DOCLING_MODELS_PATH` is unset
pub const DEFAULT_MODELS_PATH: &str = "/app/model_artifacts";

/// A single model artifact: where it lives remotely and where it lands
/// under the artifacts root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelArtifact {
    /// Short human-readable name used in logs and reports
    pub name: &'static str,
    /// HTTP(S) source URL
    pub url: &'static str,
    /// Path relative to the artifacts root
    pub relative_path: &'static str,
}

impl ModelArtifact {
    /// Absolute path of this artifact under the given root
    #[must_use]
    pub fn local_path(&self, root: &Path) -> PathBuf {
        root.join(self.relative_path)
    }
}

/// Built-in artifact set
///
/// Mirrors the models the document pipeline pulls on first use: the
/// layout model, the table structure model, and the OCR detector and
/// recognizer.
const ARTIFACTS: &[ModelArtifact] = &[
    ModelArtifact {
        name: "layout",
        url: "https://huggingface.co/ds4sd/docling-models/resolve/main/model_artifacts/layout/model.safetensors",
        relative_path: "layout/model.safetensors",
    },
    ModelArtifact {
        name: "layout-config",
        url: "https://huggingface.co/ds4sd/docling-models/resolve/main/model_artifacts/layout/config.json",
        relative_path: "layout/config.json",
    },
    ModelArtifact {
        name: "tableformer",
        url: "https://huggingface.co/ds4sd/docling-models/resolve/main/model_artifacts/tableformer/fast/tableformer_fast.safetensors",
        relative_path: "tableformer/fast/tableformer_fast.safetensors",
    },
    ModelArtifact {
        name: "ocr-detector",
        url: "https://github.com/JaidedAI/EasyOCR/releases/download/pre-v1.1.6/craft_mlt_25k.zip",
        relative_path: "ocr/craft_mlt_25k.zip",
    },
    ModelArtifact {
        name: "ocr-recognizer",
        url: "https://github.com/JaidedAI/EasyOCR/releases/download/v1.3/english_g2.zip",
        relative_path: "ocr/english_g2.zip",
    },
];

/// Presence report for one artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactStatus {
    pub artifact: ModelArtifact,
    pub present: bool,
}

/// The artifact registry bound to an artifacts root directory
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    root: PathBuf,
}

impl ModelRegistry {
    /// Create a registry rooted at the given directory
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a registry rooted at [`models_path`]
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(models_path())
    }

    /// The artifacts root directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All artifacts the registry manages
    #[must_use]
    pub fn artifacts(&self) -> &'static [ModelArtifact] {
        ARTIFACTS
    }

    /// Create the artifacts directory tree if missing
    ///
    /// # Errors
    /// Returns an error if a directory cannot be created.
    pub fn ensure_artifacts_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root).with_context(|| {
            format!("Failed to create artifacts root: {}", self.root.display())
        })?;
        for artifact in ARTIFACTS {
            if let Some(parent) = artifact.local_path(&self.root).parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create artifact directory: {}", parent.display())
                })?;
            }
        }
        Ok(())
    }

    /// Report which artifacts are present on disk
    #[must_use]
    pub fn verify(&self) -> Vec<ArtifactStatus> {
        ARTIFACTS
            .iter()
            .map(|artifact| ArtifactStatus {
                artifact: *artifact,
                present: artifact.local_path(&self.root).is_file(),
            })
            .collect()
    }

    /// True when every artifact is present
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.verify().iter().all(|s| s.present)
    }

    /// Download every missing artifact
    ///
    /// Artifacts already on disk are skipped. Each download is written to
    /// a `.partial` sibling and renamed into place, so an interrupted run
    /// never leaves a truncated artifact behind.
    ///
    /// # Errors
    /// Returns an error on the first artifact that cannot be fetched or
    /// written.
    pub async fn download_all(&self) -> Result<usize> {
        self.ensure_artifacts_dir()?;

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(600))
            .build()
            .context("Failed to create HTTP client")?;

        let mut downloaded = 0;
        for artifact in ARTIFACTS {
            let target = artifact.local_path(&self.root);
            if target.is_file() {
                debug!("Artifact '{}' already present, skipping", artifact.name);
                continue;
            }

            info!("Downloading artifact '{}' from {}", artifact.name, artifact.url);
            let response = client
                .get(artifact.url)
                .send()
                .await
                .with_context(|| format!("Failed to request artifact '{}'", artifact.name))?;

            if !response.status().is_success() {
                anyhow::bail!(
                    "Artifact '{}' download failed with status {}",
                    artifact.name,
                    response.status()
                );
            }

            let bytes = response
                .bytes()
                .await
                .with_context(|| format!("Failed to read artifact '{}' body", artifact.name))?;

            let partial = target.with_extension("partial");
            tokio::fs::write(&partial, &bytes).await.with_context(|| {
                format!("Failed to write artifact to {}", partial.display())
            })?;
            tokio::fs::rename(&partial, &target).await.with_context(|| {
                format!("Failed to move artifact into place: {}", target.display())
            })?;

            info!(
                "Artifact '{}' stored at {} ({} bytes)",
                artifact.name,
                target.display(),
                bytes.len()
            );
            downloaded += 1;
        }

        if downloaded == 0 {
            info!("All {} artifacts already present", ARTIFACTS.len());
        }
        Ok(downloaded)
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Resolve the artifacts root from `DOCLING_MODELS_PATH`
///
/// Falls back to `/app/model_artifacts` when the variable is unset. An
/// empty value is treated as unset.
#[must_use]
pub fn models_path() -> PathBuf {
    match std::env::var(MODELS_PATH_ENV) {
        Ok(value) if !value.trim().is_empty() => PathBuf::from(value),
        Ok(_) => {
            warn!("{MODELS_PATH_ENV} is set but empty, using default");
            PathBuf::from(DEFAULT_MODELS_PATH)
        }
        Err(_) => PathBuf::from(DEFAULT_MODELS_PATH),
    }
}

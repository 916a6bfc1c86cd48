//! Filesystem document queue
//!
//! Files land in the queue directory (via `POST /queue` or dropped in by
//! hand), a background worker converts them, and the output is written to
//! the processed directory. Queue files submitted through the API carry a
//! `{job_id}__{name}` prefix so the worker can report status back through
//! the job map; files without a prefix are processed under their stem.

use crate::types::{JobRecord, JobStatus};
use crate::ApiState;
use anyhow::{Context, Result};
use docling_api_core::{JsonSerializer, OutputFormat};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Environment variable naming the queue directory
pub const QUEUE_DIR_ENV: &str = "DOCLING_QUEUE_DIR";

/// Environment variable naming the processed-output directory
pub const PROCESSED_DIR_ENV: &str = "DOCLING_PROCESSED_DIR";

const DEFAULT_QUEUE_DIR: &str = "document_queue";
const DEFAULT_PROCESSED_DIR: &str = "document_processed";
const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(2);

/// Separator between the job id prefix and the original file name
const JOB_ID_SEPARATOR: &str = "__";

/// Queue directory layout and worker cadence
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Directory scanned for pending documents
    pub queue_dir: PathBuf,
    /// Directory receiving converted output
    pub processed_dir: PathBuf,
    /// Delay between queue scans
    pub scan_interval: Duration,
}

impl QueueConfig {
    /// Resolve directories from the environment, with the standard defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            queue_dir: env_dir(QUEUE_DIR_ENV, DEFAULT_QUEUE_DIR),
            processed_dir: env_dir(PROCESSED_DIR_ENV, DEFAULT_PROCESSED_DIR),
            scan_interval: DEFAULT_SCAN_INTERVAL,
        }
    }

    /// Explicit directories (used by tests and embedders)
    #[must_use]
    pub fn new(queue_dir: impl Into<PathBuf>, processed_dir: impl Into<PathBuf>) -> Self {
        Self {
            queue_dir: queue_dir.into(),
            processed_dir: processed_dir.into(),
            scan_interval: DEFAULT_SCAN_INTERVAL,
        }
    }

    /// Override the scan interval
    #[must_use]
    pub fn with_scan_interval(mut self, interval: Duration) -> Self {
        self.scan_interval = interval;
        self
    }

    /// Create both directories if missing
    ///
    /// # Errors
    /// Returns an error if a directory cannot be created.
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.queue_dir).with_context(|| {
            format!("Failed to create queue directory: {}", self.queue_dir.display())
        })?;
        std::fs::create_dir_all(&self.processed_dir).with_context(|| {
            format!(
                "Failed to create processed directory: {}",
                self.processed_dir.display()
            )
        })?;
        Ok(())
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_dir(var: &str, default: &str) -> PathBuf {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => PathBuf::from(value),
        _ => PathBuf::from(default),
    }
}

/// File name used when a job is written into the queue directory
#[must_use]
pub fn queued_file_name(job_id: &str, original_name: &str) -> String {
    format!("{job_id}{JOB_ID_SEPARATOR}{original_name}")
}

/// Split a queue file name into its job id and original name
///
/// Files without the separator were dropped into the directory by hand;
/// their stem doubles as the job id.
fn split_job_id(file_name: &str) -> (String, String) {
    match file_name.split_once(JOB_ID_SEPARATOR) {
        Some((job_id, original)) if !job_id.is_empty() && !original.is_empty() => {
            (job_id.to_string(), original.to_string())
        }
        _ => {
            let stem = Path::new(file_name)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(file_name);
            (stem.to_string(), file_name.to_string())
        }
    }
}

/// Spawn the background worker scanning the queue directory
pub fn spawn_worker(state: ApiState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let interval = state.config.scan_interval;
        info!(
            "Queue worker started: {} -> {} (every {:?})",
            state.config.queue_dir.display(),
            state.config.processed_dir.display(),
            interval
        );
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            if let Err(e) = process_queue(&state).await {
                error!("Queue scan failed: {e:#}");
            }
        }
    })
}

/// Process every file currently in the queue directory
///
/// Returns the number of files handled. Conversion failures mark the job
/// failed and remove the source; they do not abort the scan.
///
/// # Errors
/// Returns an error only when the queue directory itself cannot be read.
pub async fn process_queue(state: &ApiState) -> Result<usize> {
    let mut entries = tokio::fs::read_dir(&state.config.queue_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to read queue directory: {}",
                state.config.queue_dir.display()
            )
        })?;

    let mut handled = 0;
    while let Some(entry) = entries.next_entry().await.context("Failed to read queue entry")? {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().is_some_and(|ext| ext == "partial") {
            continue;
        }
        process_entry(state, &path).await;
        handled += 1;
    }
    Ok(handled)
}

async fn process_entry(state: &ApiState, path: &Path) {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let (job_id, original_name) = split_job_id(&file_name);
    debug!("Processing queued document: {file_name}");

    // Register manual drops so their status is queryable too
    let output_format = {
        let mut jobs = state.jobs.write().await;
        if jobs.len() >= crate::MAX_JOB_RECORDS && !jobs.contains_key(&job_id) {
            crate::evict_terminal_jobs(&mut jobs);
        }
        let record = jobs
            .entry(job_id.clone())
            .or_insert_with(|| JobRecord::queued(job_id.clone(), OutputFormat::default()));
        record.status = JobStatus::Processing;
        record.output_format
    };

    let converter = *state.converter;
    let input = path.to_path_buf();
    let conversion =
        tokio::task::spawn_blocking(move || converter.convert(&input)).await;

    let outcome = match conversion {
        Ok(Ok(result)) => {
            write_output(state, &original_name, output_format, &result.document).await
        }
        Ok(Err(e)) => Err(anyhow::Error::new(e).context("Conversion failed")),
        Err(e) => Err(anyhow::Error::new(e).context("Conversion task panicked")),
    };

    // The source leaves the queue whether or not it converted, so a bad
    // document cannot wedge the worker in a retry loop.
    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!("Failed to remove queue file {}: {e}", path.display());
    }

    let mut jobs = state.jobs.write().await;
    if let Some(record) = jobs.get_mut(&job_id) {
        match outcome {
            Ok(output_path) => {
                info!("Job {job_id} completed: {}", output_path.display());
                record.status = JobStatus::Completed;
                record.output_path = Some(output_path);
            }
            Err(e) => {
                error!("Job {job_id} failed: {e:#}");
                record.status = JobStatus::Failed;
                record.error = Some(format!("{e:#}"));
            }
        }
    }
}

/// Write converted output into the processed directory
///
/// Output is staged as `.partial` and renamed into place, so a crash
/// mid-write never leaves a truncated result behind.
async fn write_output(
    state: &ApiState,
    original_name: &str,
    output_format: OutputFormat,
    document: &docling_api_core::Document,
) -> Result<PathBuf> {
    let stem = Path::new(original_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(original_name);

    let (extension, content) = match output_format {
        OutputFormat::Markdown => ("md", document.markdown.clone()),
        OutputFormat::Json => (
            "json",
            JsonSerializer::new()
                .serialize_document(document)
                .context("Failed to serialize document")?,
        ),
    };

    let output_path = state.config.processed_dir.join(format!("{stem}.{extension}"));
    let partial = state
        .config
        .processed_dir
        .join(format!("{stem}.{extension}.partial"));

    tokio::fs::write(&partial, content.as_bytes())
        .await
        .with_context(|| format!("Failed to write output: {}", partial.display()))?;
    tokio::fs::rename(&partial, &output_path)
        .await
        .with_context(|| format!("Failed to move output into place: {}", output_path.display()))?;

    Ok(output_path)
}

//! HTTP request handlers for API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use docling_api_core::OutputFormat;
use std::path::PathBuf;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    download::download_from_url,
    queue::queued_file_name,
    types::{
        ConvertQuery, ConvertResponse, ErrorResponse, HealthResponse, JobRecord, JobStatus,
        QueueResponse,
    },
    ApiState,
};

type ApiError = (StatusCode, Json<ErrorResponse>);

// All conversion failures map to 500 with an `{"error": ...}` body
fn conversion_error(message: impl Into<String>) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(message)),
    )
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Convert a document and return its content
///
/// `url` may be an `http(s)://` URL (downloaded to a temporary file) or a
/// local file path. Markdown output returns the markdown string as
/// `content`; JSON output returns the full document object.
pub async fn convert_document(
    State(state): State<ApiState>,
    Query(query): Query<ConvertQuery>,
) -> Result<Json<ConvertResponse>, ApiError> {
    info!(
        "Convert request: url={}, output_format={:?}",
        query.url, query.output_format
    );

    // Keep the downloaded temp file alive until conversion finishes
    let (input_path, _downloaded_file) = resolve_source(&query.url).await?;

    let converter = *state.converter;
    let path = input_path.clone();
    let result = tokio::task::spawn_blocking(move || converter.convert(&path))
        .await
        .map_err(|e| {
            error!("Conversion task panicked: {e}");
            conversion_error("Conversion task failed")
        })?
        .map_err(|e| {
            error!("Conversion failed for {}: {e}", input_path.display());
            conversion_error(e.to_string())
        })?;

    let content = match query.output_format {
        OutputFormat::Markdown => serde_json::Value::String(result.document.markdown),
        OutputFormat::Json => serde_json::to_value(&result.document).map_err(|e| {
            error!("Failed to serialize document: {e}");
            conversion_error(e.to_string())
        })?,
    };

    Ok(Json(ConvertResponse { content }))
}

/// Submit a document to the conversion queue
///
/// The source is copied into the queue directory and converted by the
/// background worker; the response carries the job id to poll.
pub async fn queue_submit(
    State(state): State<ApiState>,
    Query(query): Query<ConvertQuery>,
) -> Result<impl IntoResponse, ApiError> {
    info!(
        "Queue request: url={}, output_format={:?}",
        query.url, query.output_format
    );

    let (input_path, _downloaded_file) = resolve_source(&query.url).await?;

    let original_name = input_path
        .file_name()
        .and_then(|n| n.to_str())
        .map(ToString::to_string)
        .ok_or_else(|| conversion_error(format!("Invalid source path: {}", query.url)))?;

    let job_id = Uuid::new_v4().to_string();
    let queued_name = queued_file_name(&job_id, &original_name);
    let queued_path = state.config.queue_dir.join(&queued_name);

    // Staged as `.partial` so a worker scan never picks up a half-copied
    // document; the worker skips that extension.
    let staging_path = state.config.queue_dir.join(format!("{queued_name}.partial"));
    tokio::fs::copy(&input_path, &staging_path)
        .await
        .map_err(|e| {
            error!("Failed to enqueue {}: {e}", input_path.display());
            conversion_error(format!("Failed to enqueue document: {e}"))
        })?;
    tokio::fs::rename(&staging_path, &queued_path)
        .await
        .map_err(|e| {
            error!("Failed to enqueue {}: {e}", input_path.display());
            conversion_error(format!("Failed to enqueue document: {e}"))
        })?;

    state
        .record_job(JobRecord::queued(job_id.clone(), query.output_format))
        .await;
    info!("Job {job_id} queued: {}", queued_path.display());

    Ok((
        StatusCode::ACCEPTED,
        Json(QueueResponse {
            job_id,
            status: JobStatus::Queued,
        }),
    ))
}

/// Get queue job status
pub async fn queue_status(
    State(state): State<ApiState>,
    Path(job_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let jobs = state.jobs.read().await;
    jobs.get(&job_id).map_or_else(
        || {
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(format!("Job not found: {job_id}"))),
            ))
        },
        |record| Ok(Json(record.to_response())),
    )
}

/// Resolve a source string into a local path
///
/// URLs are downloaded to a temporary file; anything else is treated as a
/// local path that must exist.
async fn resolve_source(
    url: &str,
) -> Result<(PathBuf, Option<crate::download::DownloadedFile>), ApiError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        let downloaded = download_from_url(url).await.map_err(|e| {
            error!("Failed to download from URL {url}: {e:#}");
            conversion_error(format!("Failed to download document: {e:#}"))
        })?;
        let path = downloaded.path().to_path_buf();
        Ok((path, Some(downloaded)))
    } else {
        let path = PathBuf::from(url);
        if !path.is_file() {
            return Err(conversion_error(format!(
                "Input file does not exist: {}",
                path.display()
            )));
        }
        Ok((path, None))
    }
}

//! API request and response types

use docling_api_core::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Query parameters for `/convert` and `/queue`
///
/// `url` accepts an `http(s)://` URL or a local file path;
/// `output_format` defaults to markdown.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertQuery {
    /// Document source (URL or local path)
    pub url: String,
    /// Requested output representation
    #[serde(default, deserialize_with = "output_format_from_query")]
    pub output_format: OutputFormat,
}

/// Accepts the case variants `FromStr` accepts ("JSON", "Markdown", "md"),
/// not just the lowercase serde names.
fn output_format_from_query<'de, D>(deserializer: D) -> Result<OutputFormat, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

/// Successful conversion response
///
/// `content` is the markdown string for markdown output and the full
/// document object for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertResponse {
    pub content: serde_json::Value,
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
}

/// Queue job status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Waiting in the queue directory
    Queued,
    /// Picked up by the worker
    Processing,
    /// Output written to the processed directory
    Completed,
    /// Conversion failed
    Failed,
}

/// Response to a queue submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueResponse {
    /// Job identifier
    pub job_id: String,
    /// Job status at submission time
    pub status: JobStatus,
}

/// Job status response for `GET /queue/{job_id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatusResponse {
    /// Job identifier
    pub job_id: String,
    /// Current status
    pub status: JobStatus,
    /// Output file in the processed directory (once completed)
    #[serde(default)]
    pub output_path: Option<String>,
    /// Error message (if failed)
    #[serde(default)]
    pub error: Option<String>,
}

/// In-memory record of a queued job
#[derive(Debug, Clone)]
pub struct JobRecord {
    pub job_id: String,
    pub status: JobStatus,
    pub output_format: OutputFormat,
    pub output_path: Option<PathBuf>,
    pub error: Option<String>,
}

impl JobRecord {
    /// A freshly submitted job
    #[must_use]
    pub fn queued(job_id: String, output_format: OutputFormat) -> Self {
        Self {
            job_id,
            status: JobStatus::Queued,
            output_format,
            output_path: None,
            error: None,
        }
    }

    /// Project the record into its API response shape
    #[must_use]
    pub fn to_response(&self) -> JobStatusResponse {
        JobStatusResponse {
            job_id: self.job_id.clone(),
            status: self.status,
            output_path: self
                .output_path
                .as_ref()
                .map(|p| p.display().to_string()),
            error: self.error.clone(),
        }
    }
}

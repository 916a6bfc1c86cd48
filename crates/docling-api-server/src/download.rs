//! Document download module for URL sources
//!
//! Remote documents are fetched into temporary files that keep their
//! inferred extension, so format detection works on the downloaded copy.
//! The file is cleaned up when the `DownloadedFile` is dropped.

use anyhow::{Context, Result};
use reqwest::Client as HttpClient;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// A downloaded file that is removed when dropped
#[derive(Debug)]
pub struct DownloadedFile {
    /// Path to the downloaded file
    path: PathBuf,
    /// Temporary file handle (keeps file alive until dropped)
    _temp_file: NamedTempFile,
}

impl DownloadedFile {
    fn from_temp_file(temp_file: NamedTempFile) -> Self {
        let path = temp_file.path().to_path_buf();
        Self {
            path,
            _temp_file: temp_file,
        }
    }

    /// Get the path to the downloaded file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AsRef<Path> for DownloadedFile {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Download a document from an HTTP/HTTPS URL
///
/// The temporary file carries an extension inferred from the URL path or
/// the `content-type` header so the converter can detect its format.
///
/// # Errors
/// Returns an error if:
/// - The URL scheme is not http or https
/// - The HTTP request fails or returns a non-success status
/// - The response cannot be written to disk
pub async fn download_from_url(url: &str) -> Result<DownloadedFile> {
    info!("Downloading document from URL: {}", url);

    if !url.starts_with("http://") && !url.starts_with("https://") {
        anyhow::bail!("Invalid URL scheme. Only http:// and https:// are supported");
    }

    let client = HttpClient::builder()
        .timeout(std::time::Duration::from_secs(120))
        .build()
        .context("Failed to create HTTP client")?;

    let response = client
        .get(url)
        .send()
        .await
        .context("Failed to send HTTP request")?;

    if !response.status().is_success() {
        anyhow::bail!("HTTP request failed with status: {}", response.status());
    }

    // Infer file extension from URL or content-type
    let extension = infer_extension_from_url(url)
        .or_else(|| {
            response
                .headers()
                .get("content-type")
                .and_then(|ct| ct.to_str().ok())
                .and_then(infer_extension_from_content_type)
        })
        .unwrap_or("html");

    let temp_file = tempfile::Builder::new()
        .suffix(&format!(".{extension}"))
        .tempfile()
        .context("Failed to create temporary file")?;

    let temp_path = temp_file.path().to_path_buf();
    debug!("Writing to temporary file: {}", temp_path.display());

    let mut file = File::create(&temp_path)
        .await
        .context("Failed to open temporary file for writing")?;

    let bytes = response
        .bytes()
        .await
        .context("Failed to read response body")?;

    file.write_all(&bytes)
        .await
        .context("Failed to write response to file")?;
    file.flush().await.context("Failed to flush file")?;

    info!(
        "Downloaded {} bytes to {}",
        bytes.len(),
        temp_path.display()
    );

    Ok(DownloadedFile::from_temp_file(temp_file))
}

/// Infer file extension from URL path
fn infer_extension_from_url(url: &str) -> Option<&str> {
    let path = url.split('?').next()?;
    let filename = path.split('/').next_back()?;

    if !filename.contains('.') {
        return None;
    }

    let extension = filename.split('.').next_back()?;

    // Only alphanumeric, max 8 chars ("asciidoc" is the longest we take)
    if extension.len() <= 8 && extension.chars().all(char::is_alphanumeric) {
        Some(extension)
    } else {
        None
    }
}

/// Infer file extension from content-type header
fn infer_extension_from_content_type(content_type: &str) -> Option<&str> {
    let mime_type = content_type.split(';').next()?.trim();

    match mime_type {
        "text/html" | "application/xhtml+xml" => Some("html"),
        "text/markdown" | "text/x-markdown" => Some("md"),
        "text/asciidoc" | "text/x-asciidoc" => Some("adoc"),
        "text/csv" | "application/csv" => Some("csv"),
        "text/plain" => Some("txt"),
        _ => {
            warn!("Unknown content-type: {}", mime_type);
            None
        }
    }
}

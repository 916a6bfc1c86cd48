//! Error types for document conversion operations.
//!
//! This module defines the error types that can occur during document
//! conversion and provides utilities for error handling.

use thiserror::Error;

/// Error types that can occur during document conversion.
///
/// Covers IO errors, format detection failures, backend parsing errors,
/// and remote fetch failures.
///
/// # Examples
///
/// ```rust,ignore
/// // Note: DocumentConverter is in docling-api-backend crate
/// use docling_api_backend::DocumentConverter;
/// use docling_api_core::DoclingError;
///
/// let converter = DocumentConverter::new();
///
/// match converter.convert("document.html") {
///     Ok(result) => println!("Success: {} chars", result.document.metadata.num_characters),
///     Err(DoclingError::IoError(e)) => eprintln!("File error: {}", e),
///     Err(DoclingError::FormatError(msg)) => eprintln!("Unsupported format: {}", msg),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum DoclingError {
    /// General conversion error.
    ///
    /// Catch-all for conversion failures that don't fit other categories.
    #[error("Conversion error: {0}")]
    ConversionError(String),

    /// File I/O error.
    ///
    /// Reading input files or writing output files failed, such as file not
    /// found, permission denied, or disk full.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Format detection or unsupported format error.
    ///
    /// The file format cannot be detected from the extension, or the format
    /// is not supported by any registered backend.
    #[error("Format detection error: {0}")]
    FormatError(String),

    /// Backend-specific parse error.
    #[error("Backend error: {0}")]
    BackendError(String),

    /// Remote document fetch error.
    ///
    /// Downloading a document from a URL failed (network error, non-success
    /// status, or write failure).
    #[error("Fetch error: {0}")]
    FetchError(#[from] anyhow::Error),
}

/// Type alias for [`Result<T, DoclingError>`].
///
/// # Examples
///
/// ```rust,ignore
/// use docling_api_core::Result;
///
/// fn convert_document(path: &str) -> Result<String> {
///     let converter = docling_api_backend::DocumentConverter::new();
///     let result = converter.convert(path)?;
///     Ok(result.document.markdown)
/// }
/// ```
pub type Result<T> = std::result::Result<T, DoclingError>;

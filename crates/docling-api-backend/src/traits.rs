//! Core trait definitions for document backends

use docling_api_core::{Document, DoclingError, InputFormat};
use std::path::Path;

/// Options for backend processing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendOptions {
    /// Treat the first table row as a header row (CSV and pipe tables)
    pub first_row_is_header: bool,

    /// Render hyperlinks as `[text](url)`; when disabled only the link text
    /// is kept
    pub keep_hyperlinks: bool,

    /// Maximum number of content items to emit (None = no limit)
    ///
    /// A guard against pathological inputs; items past the limit are dropped.
    pub max_items: Option<usize>,
}

impl BackendOptions {
    /// Set whether the first table row is treated as a header
    #[inline]
    #[must_use = "returns options with header setting configured"]
    pub const fn with_first_row_header(mut self, enable: bool) -> Self {
        self.first_row_is_header = enable;
        self
    }

    /// Set whether hyperlinks are rendered in markdown form
    #[inline]
    #[must_use = "returns options with hyperlink setting configured"]
    pub const fn with_hyperlinks(mut self, enable: bool) -> Self {
        self.keep_hyperlinks = enable;
        self
    }

    /// Set the maximum number of content items to emit
    #[inline]
    #[must_use = "returns options with item limit configured"]
    pub const fn with_max_items(mut self, max_items: Option<usize>) -> Self {
        self.max_items = max_items;
        self
    }
}

impl Default for BackendOptions {
    #[inline]
    fn default() -> Self {
        Self {
            first_row_is_header: true,
            keep_hyperlinks: true,
            max_items: None,
        }
    }
}

/// Main trait for document backends
///
/// Each backend (HTML, Markdown, etc.) implements this trait to provide
/// document parsing and conversion functionality.
pub trait DocumentBackend: Send + Sync {
    /// Get the format this backend handles
    fn format(&self) -> InputFormat;

    /// Parse document from bytes
    ///
    /// # Errors
    /// Returns an error if parsing fails.
    fn parse_bytes(&self, data: &[u8], options: &BackendOptions) -> Result<Document, DoclingError>;

    /// Parse document from file path
    ///
    /// # Errors
    /// Returns an error if file reading or parsing fails.
    fn parse_file<P: AsRef<Path>>(
        &self,
        path: P,
        options: &BackendOptions,
    ) -> Result<Document, DoclingError> {
        let data = std::fs::read(path.as_ref()).map_err(DoclingError::IoError)?;
        self.parse_bytes(&data, options)
    }

    /// Check if this backend can handle the given format
    fn can_handle(&self, format: InputFormat) -> bool {
        self.format() == format
    }
}

/// Decode input bytes as UTF-8, tolerating invalid sequences.
///
/// All implemented backends consume text formats; lossy decoding matches the
/// service contract of never failing on stray bytes in otherwise-valid input.
#[must_use = "returns the decoded text"]
pub(crate) fn decode_text(data: &[u8]) -> String {
    String::from_utf8_lossy(data).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_options_default() {
        let opts = BackendOptions::default();
        assert!(opts.first_row_is_header);
        assert!(opts.keep_hyperlinks);
        assert!(opts.max_items.is_none());
    }

    #[test]
    fn test_backend_options_builders() {
        let opts = BackendOptions::default()
            .with_first_row_header(false)
            .with_hyperlinks(false)
            .with_max_items(Some(10));
        assert!(!opts.first_row_is_header);
        assert!(!opts.keep_hyperlinks);
        assert_eq!(opts.max_items, Some(10));
    }

    #[test]
    fn test_decode_text_lossy() {
        assert_eq!(decode_text(b"hello"), "hello");
        // Invalid UTF-8 becomes replacement characters instead of an error
        let decoded = decode_text(&[0x68, 0xFF, 0x69]);
        assert!(decoded.starts_with('h'));
        assert!(decoded.ends_with('i'));
    }
}

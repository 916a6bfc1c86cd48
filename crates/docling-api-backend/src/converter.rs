//! Rust-native document converter
//!
//! Detects the input format from the file extension, dispatches to the
//! matching backend, and returns the converted document with timing.

use crate::asciidoc::AsciidocBackend;
use crate::csv::CsvBackend;
use crate::html::HtmlBackend;
use crate::markdown::MarkdownBackend;
use crate::text::TextBackend;
use crate::traits::{BackendOptions, DocumentBackend};
use docling_api_core::{ConversionResult, DoclingError, InputFormat};
use std::path::Path;
use std::time::Instant;

/// Document converter dispatching to the format backends
///
/// Supported formats: HTML, Markdown, `AsciiDoc`, CSV, plain text.
///
/// # Examples
///
/// ```rust,no_run
/// use docling_api_backend::DocumentConverter;
///
/// let converter = DocumentConverter::new();
/// let result = converter.convert("page.html")?;
/// println!("{}", result.document.markdown);
/// # Ok::<(), docling_api_core::DoclingError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentConverter {
    options: BackendOptions,
    html: HtmlBackend,
    markdown: MarkdownBackend,
    asciidoc: AsciidocBackend,
    csv: CsvBackend,
    text: TextBackend,
}

impl DocumentConverter {
    /// Create a converter with default options
    #[inline]
    #[must_use = "creating a converter that is not used is a waste of resources"]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with specific backend options
    #[inline]
    #[must_use = "creating a converter that is not used is a waste of resources"]
    pub const fn with_options(options: BackendOptions) -> Self {
        Self {
            options,
            html: HtmlBackend::new(),
            markdown: MarkdownBackend::new(),
            asciidoc: AsciidocBackend::new(),
            csv: CsvBackend::new(),
            text: TextBackend::new(),
        }
    }

    /// Formats this converter can handle
    #[must_use = "returns the supported input formats"]
    pub const fn supported_formats() -> &'static [InputFormat] {
        InputFormat::all()
    }

    /// Convert a document file, detecting the format from its extension
    ///
    /// # Errors
    /// Returns `FormatError` for unknown extensions, `IoError` if the file
    /// cannot be read, or a backend error if parsing fails.
    pub fn convert<P: AsRef<Path>>(&self, path: P) -> Result<ConversionResult, DoclingError> {
        let path = path.as_ref();
        let format = InputFormat::from_path(path).ok_or_else(|| {
            DoclingError::FormatError(format!(
                "Cannot detect format of '{}' (supported: html, md, adoc, csv, txt)",
                path.display()
            ))
        })?;
        self.convert_with_format(path, format)
    }

    /// Convert a document file as a specific format
    ///
    /// # Errors
    /// Returns `IoError` if the file cannot be read or a backend error if
    /// parsing fails.
    pub fn convert_with_format<P: AsRef<Path>>(
        &self,
        path: P,
        format: InputFormat,
    ) -> Result<ConversionResult, DoclingError> {
        let data = std::fs::read(path.as_ref()).map_err(DoclingError::IoError)?;
        self.convert_bytes(&data, format)
    }

    /// Convert in-memory document bytes as a specific format
    ///
    /// # Errors
    /// Returns a backend error if parsing fails.
    pub fn convert_bytes(
        &self,
        data: &[u8],
        format: InputFormat,
    ) -> Result<ConversionResult, DoclingError> {
        let start = Instant::now();

        let mut document = match format {
            InputFormat::Html => self.html.parse_bytes(data, &self.options)?,
            InputFormat::Md => self.markdown.parse_bytes(data, &self.options)?,
            InputFormat::Asciidoc => self.asciidoc.parse_bytes(data, &self.options)?,
            InputFormat::Csv => self.csv.parse_bytes(data, &self.options)?,
            InputFormat::Text => self.text.parse_bytes(data, &self.options)?,
        };
        document.metadata.converted_at = Some(chrono::Utc::now());

        let elapsed = start.elapsed();
        log::debug!(
            "converted {} input ({} bytes) in {:?}",
            format,
            data.len(),
            elapsed
        );

        Ok(ConversionResult::new(document, elapsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_convert_bytes_html() {
        let converter = DocumentConverter::new();
        let result = converter
            .convert_bytes(b"<h1>Hi</h1>", InputFormat::Html)
            .unwrap();
        assert_eq!(result.document.markdown, "# Hi\n");
        assert_eq!(result.document.format, InputFormat::Html);
        assert!(result.document.metadata.converted_at.is_some());
    }

    #[test]
    fn test_convert_detects_format_from_extension() {
        let mut file = tempfile::Builder::new().suffix(".md").tempfile().unwrap();
        file.write_all(b"# Heading\n").unwrap();

        let converter = DocumentConverter::new();
        let result = converter.convert(file.path()).unwrap();
        assert_eq!(result.document.format, InputFormat::Md);
        assert_eq!(result.document.markdown, "# Heading\n");
    }

    #[test]
    fn test_convert_unknown_extension_fails() {
        let converter = DocumentConverter::new();
        match converter.convert("document.xyz") {
            Err(DoclingError::FormatError(msg)) => assert!(msg.contains("document.xyz")),
            other => panic!("expected FormatError, got {other:?}"),
        }
    }

    #[test]
    fn test_convert_missing_file_is_io_error() {
        let converter = DocumentConverter::new();
        match converter.convert("/nonexistent/file.html") {
            Err(DoclingError::IoError(e)) => {
                assert_eq!(e.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected IoError, got {other:?}"),
        }
    }

    #[test]
    fn test_convert_with_explicit_format_overrides_extension() {
        let mut file = tempfile::Builder::new().suffix(".dat").tempfile().unwrap();
        file.write_all(b"a,b\n1,2\n").unwrap();

        let converter = DocumentConverter::new();
        let result = converter
            .convert_with_format(file.path(), InputFormat::Csv)
            .unwrap();
        assert!(result.document.markdown.starts_with("| a | b |"));
    }

    #[test]
    fn test_options_propagate_to_backends() {
        let converter =
            DocumentConverter::with_options(BackendOptions::default().with_hyperlinks(false));
        let result = converter
            .convert_bytes(
                br#"<p><a href="https://example.com">docs</a></p>"#,
                InputFormat::Html,
            )
            .unwrap();
        assert_eq!(result.document.markdown, "docs\n");
    }

    #[test]
    fn test_supported_formats_complete() {
        assert_eq!(DocumentConverter::supported_formats().len(), 5);
    }
}

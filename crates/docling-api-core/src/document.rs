//! Core document types
//!
//! This module defines the main `Document` type and associated metadata.

use crate::content::DocItem;
use crate::format::InputFormat;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Core document structure containing converted content and metadata.
///
/// Represents a converted document with markdown output, structured content,
/// and associated metadata. This is the primary result type from document
/// conversion.
///
/// # Examples
///
/// ```rust
/// use docling_api_core::{Document, InputFormat};
///
/// let doc = Document::from_markdown(
///     "# Hello World\n\nThis is a test.".to_string(),
///     InputFormat::Md,
/// );
///
/// assert_eq!(doc.metadata.num_characters, 30);
/// assert_eq!(doc.format, InputFormat::Md);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Markdown representation of the document
    pub markdown: String,

    /// Input format of the original document
    pub format: InputFormat,

    /// Document metadata
    pub metadata: DocumentMetadata,

    /// Structured content items (optional - for structured extraction)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<DocItem>>,
}

/// Document metadata containing information about the source document.
///
/// All fields except `num_characters` are optional as not all formats
/// provide metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DocumentMetadata {
    /// Total character count of the markdown output
    #[serde(default)]
    pub num_characters: usize,

    /// Number of pages (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_pages: Option<usize>,

    /// Document title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Language (ISO 639-1 code)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Conversion timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converted_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Document {
    /// Creates a simple document from markdown text.
    ///
    /// Useful for testing or when a `Document` is needed from existing
    /// markdown without conversion.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use docling_api_core::{Document, InputFormat};
    ///
    /// let doc = Document::from_markdown("# Title\n\nSome content.".to_string(), InputFormat::Md);
    /// assert_eq!(doc.to_markdown(), "# Title\n\nSome content.");
    /// assert_eq!(doc.metadata.num_characters, 22);
    /// ```
    #[inline]
    #[must_use = "creates a document from markdown text"]
    pub fn from_markdown(markdown: String, format: InputFormat) -> Self {
        let num_characters = markdown.chars().count();
        Self {
            markdown,
            format,
            metadata: DocumentMetadata {
                num_characters,
                ..DocumentMetadata::default()
            },
            items: None,
        }
    }

    /// Returns the markdown representation of the document.
    #[inline]
    #[must_use = "returns the markdown representation"]
    pub fn to_markdown(&self) -> &str {
        &self.markdown
    }

    /// Checks if the document has structured content items.
    #[inline]
    #[must_use = "returns whether the document has structured content"]
    pub fn has_structured_content(&self) -> bool {
        self.items.as_ref().is_some_and(|items| !items.is_empty())
    }

    /// Returns the structured content items if available.
    #[inline]
    #[must_use = "returns the structured content items if available"]
    pub fn items(&self) -> Option<&[DocItem]> {
        self.items.as_deref()
    }
}

/// Result of a document conversion, pairing the document with timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// The converted document
    pub document: Document,
    /// Wall-clock time the conversion took
    #[serde(with = "duration_millis")]
    pub elapsed: Duration,
}

impl ConversionResult {
    /// Create a conversion result
    #[inline]
    #[must_use = "creates a conversion result"]
    pub const fn new(document: Document, elapsed: Duration) -> Self {
        Self { document, elapsed }
    }
}

/// Serialize `Duration` as integer milliseconds for stable JSON output.
mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let millis = u64::deserialize(d)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::DocItem;

    #[test]
    fn test_from_markdown_counts_characters() {
        let doc = Document::from_markdown("hello".to_string(), InputFormat::Text);
        assert_eq!(doc.metadata.num_characters, 5);
        assert_eq!(doc.format, InputFormat::Text);
    }

    #[test]
    fn test_from_markdown_counts_unicode_chars_not_bytes() {
        // 4 chars, 12 bytes
        let doc = Document::from_markdown("日本語だ".to_string(), InputFormat::Text);
        assert_eq!(doc.metadata.num_characters, 4);
    }

    #[test]
    fn test_has_structured_content() {
        let mut doc = Document::from_markdown("# T".to_string(), InputFormat::Md);
        assert!(!doc.has_structured_content());

        doc.items = Some(vec![]);
        assert!(!doc.has_structured_content());

        doc.items = Some(vec![DocItem::Title {
            text: "T".to_string(),
        }]);
        assert!(doc.has_structured_content());
        assert_eq!(doc.items().unwrap().len(), 1);
    }

    #[test]
    fn test_document_json_round_trip() {
        let mut doc = Document::from_markdown("# Hello".to_string(), InputFormat::Html);
        doc.metadata.title = Some("Hello".to_string());

        let json = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_conversion_result_duration_serde() {
        let doc = Document::from_markdown("x".to_string(), InputFormat::Text);
        let result = ConversionResult::new(doc, Duration::from_millis(123));

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"elapsed\":123"));

        let back: ConversionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.elapsed, Duration::from_millis(123));
    }
}

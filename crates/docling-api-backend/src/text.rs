//! Plain Text Backend - Parse plain text to paragraph items
//!
//! Blank lines separate paragraphs; everything else passes through
//! untouched. This is the fallback for `.txt` inputs.

use crate::traits::{decode_text, BackendOptions, DocumentBackend};
use docling_api_core::{DocItem, Document, DoclingError, InputFormat, MarkdownSerializer};

/// Plain Text Document Backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TextBackend;

impl TextBackend {
    /// Create a new plain text backend instance
    #[inline]
    #[must_use = "creates a backend instance that should be used for parsing"]
    pub const fn new() -> Self {
        Self
    }

    fn split_paragraphs(source: &str, options: &BackendOptions) -> Vec<DocItem> {
        let mut items = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for line in source.lines().chain(std::iter::once("")) {
            if line.trim().is_empty() {
                if !current.is_empty() {
                    items.push(DocItem::Paragraph {
                        text: current.join(" "),
                    });
                    current.clear();
                    if let Some(max) = options.max_items {
                        if items.len() >= max {
                            break;
                        }
                    }
                }
            } else {
                current.push(line.trim());
            }
        }

        items
    }
}

impl DocumentBackend for TextBackend {
    fn format(&self) -> InputFormat {
        InputFormat::Text
    }

    fn parse_bytes(&self, data: &[u8], options: &BackendOptions) -> Result<Document, DoclingError> {
        let source = decode_text(data);
        let items = Self::split_paragraphs(&source, options);
        let markdown = MarkdownSerializer::new().serialize(&items);

        let mut doc = Document::from_markdown(markdown, InputFormat::Text);
        doc.items = Some(items);
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Document {
        TextBackend::new()
            .parse_bytes(text.as_bytes(), &BackendOptions::default())
            .unwrap()
    }

    #[test]
    fn test_single_paragraph() {
        let doc = parse("hello world\n");
        assert_eq!(doc.markdown, "hello world\n");
    }

    #[test]
    fn test_multiline_paragraph_joined() {
        let doc = parse("line one\nline two\n");
        assert_eq!(doc.markdown, "line one line two\n");
    }

    #[test]
    fn test_blank_lines_split_paragraphs() {
        let doc = parse("first\n\n\nsecond\n");
        assert_eq!(doc.markdown, "first\n\nsecond\n");
        assert_eq!(doc.items().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_input() {
        let doc = parse("");
        assert_eq!(doc.markdown, "");
        assert!(!doc.has_structured_content());
    }

    #[test]
    fn test_max_items_limit() {
        let options = BackendOptions::default().with_max_items(Some(1));
        let doc = TextBackend::new()
            .parse_bytes(b"a\n\nb\n", &options)
            .unwrap();
        assert_eq!(doc.items().unwrap().len(), 1);
    }
}

//! Input and output format types for document conversion
//!
//! This module defines the `InputFormat` enum for the document formats the
//! service can parse, and the `OutputFormat` enum selecting the response
//! representation (`markdown` or `json`).

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Input document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InputFormat {
    /// HTML document
    #[serde(rename = "HTML")]
    Html,
    /// Markdown document
    #[serde(rename = "MD")]
    Md,
    /// `AsciiDoc` document
    #[serde(rename = "ASCIIDOC")]
    Asciidoc,
    /// CSV file
    #[serde(rename = "CSV")]
    Csv,
    /// Plain text
    #[serde(rename = "TXT")]
    Text,
}

impl InputFormat {
    /// Detect format from file extension
    #[inline]
    #[must_use = "detects format from file extension"]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "html" | "htm" | "xhtml" => Some(Self::Html),
            "md" | "markdown" => Some(Self::Md),
            "asciidoc" | "adoc" => Some(Self::Asciidoc),
            "csv" => Some(Self::Csv),
            "txt" | "text" => Some(Self::Text),
            _ => None,
        }
    }

    /// Detect format from a file path's extension
    #[inline]
    #[must_use = "detects format from file path"]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// All supported input formats
    #[must_use = "returns the list of supported formats"]
    pub const fn all() -> &'static [Self] {
        &[Self::Html, Self::Md, Self::Asciidoc, Self::Csv, Self::Text]
    }

    /// Canonical lowercase name for display and logging
    #[must_use = "returns the canonical format name"]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Md => "markdown",
            Self::Asciidoc => "asciidoc",
            Self::Csv => "csv",
            Self::Text => "text",
        }
    }
}

impl std::fmt::Display for InputFormat {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Output representation requested by the caller
///
/// Parsed from the `output_format` query parameter. Markdown is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown output (default)
    #[default]
    Markdown,
    /// Full document structure as JSON
    Json,
}

impl std::fmt::Display for OutputFormat {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Markdown => write!(f, "markdown"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    /// Parse output format from string (case-insensitive)
    ///
    /// Accepts: "markdown", "md" | "json"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            _ => Err(format!(
                "Unknown output format '{s}'. Valid options: markdown, json"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_from_extension_known() {
        assert_eq!(InputFormat::from_extension("html"), Some(InputFormat::Html));
        assert_eq!(InputFormat::from_extension("htm"), Some(InputFormat::Html));
        assert_eq!(InputFormat::from_extension("md"), Some(InputFormat::Md));
        assert_eq!(InputFormat::from_extension("markdown"), Some(InputFormat::Md));
        assert_eq!(
            InputFormat::from_extension("adoc"),
            Some(InputFormat::Asciidoc)
        );
        assert_eq!(InputFormat::from_extension("csv"), Some(InputFormat::Csv));
        assert_eq!(InputFormat::from_extension("txt"), Some(InputFormat::Text));
    }

    #[test]
    fn test_from_extension_case_insensitive() {
        assert_eq!(InputFormat::from_extension("HTML"), Some(InputFormat::Html));
        assert_eq!(InputFormat::from_extension("Md"), Some(InputFormat::Md));
        assert_eq!(InputFormat::from_extension("CSV"), Some(InputFormat::Csv));
    }

    #[test]
    fn test_from_extension_unknown() {
        assert_eq!(InputFormat::from_extension("xyz"), None);
        assert_eq!(InputFormat::from_extension(""), None);
        assert_eq!(InputFormat::from_extension("pdf"), None);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            InputFormat::from_path("docs/report.html"),
            Some(InputFormat::Html)
        );
        assert_eq!(
            InputFormat::from_path("/tmp/notes.MD"),
            Some(InputFormat::Md)
        );
        assert_eq!(InputFormat::from_path("no_extension"), None);
        assert_eq!(InputFormat::from_path("archive.tar.csv"), Some(InputFormat::Csv));
    }

    #[test]
    fn test_serde_uppercase_names() {
        let json = serde_json::to_string(&InputFormat::Html).unwrap();
        assert_eq!(json, "\"HTML\"");
        let json = serde_json::to_string(&InputFormat::Md).unwrap();
        assert_eq!(json, "\"MD\"");
        let back: InputFormat = serde_json::from_str("\"ASCIIDOC\"").unwrap();
        assert_eq!(back, InputFormat::Asciidoc);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(InputFormat::Html.to_string(), "html");
        assert_eq!(InputFormat::Asciidoc.to_string(), "asciidoc");
    }

    #[test]
    fn test_output_format_default_is_markdown() {
        assert_eq!(OutputFormat::default(), OutputFormat::Markdown);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(
            OutputFormat::from_str("markdown").unwrap(),
            OutputFormat::Markdown
        );
        assert_eq!(OutputFormat::from_str("MD").unwrap(), OutputFormat::Markdown);
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_str("yaml").is_err());
    }

    #[test]
    fn test_output_format_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&OutputFormat::Markdown).unwrap(),
            "\"markdown\""
        );
        assert_eq!(
            serde_json::to_string(&OutputFormat::Json).unwrap(),
            "\"json\""
        );
        let back: OutputFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(back, OutputFormat::Json);
    }

    #[test]
    fn test_all_formats_have_distinct_names() {
        let names: Vec<_> = InputFormat::all().iter().map(InputFormat::name).collect();
        let mut deduped = names.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(names.len(), deduped.len());
    }
}

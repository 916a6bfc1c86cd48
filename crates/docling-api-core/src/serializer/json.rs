//! JSON serialization for `Document`
//!
//! `Document` already implements `Serialize`, so this is a convenience
//! wrapper with formatting options.

use crate::document::Document;
use serde_json::{to_string, to_string_pretty};

/// Options for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JsonOptions {
    /// Pretty-print with indentation (default: true)
    pub pretty: bool,
}

impl Default for JsonOptions {
    #[inline]
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// JSON serializer for `Document`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct JsonSerializer {
    options: JsonOptions,
}

impl JsonSerializer {
    /// Create a new JSON serializer with default options (pretty-printed)
    #[inline]
    #[must_use = "creates serializer with default options"]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new JSON serializer with custom options
    #[inline]
    #[must_use = "creates serializer with custom options"]
    pub const fn with_options(options: JsonOptions) -> Self {
        Self { options }
    }

    /// Serialize a `Document` to JSON
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn serialize_document(&self, doc: &Document) -> Result<String, serde_json::Error> {
        if self.options.pretty {
            to_string_pretty(doc)
        } else {
            to_string(doc)
        }
    }

    /// Serialize a `Document` to compact JSON (no pretty-printing)
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn serialize_compact(doc: &Document) -> Result<String, serde_json::Error> {
        to_string(doc)
    }
}

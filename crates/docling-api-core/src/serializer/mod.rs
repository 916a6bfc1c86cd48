//! Output format serializers
//!
//! Serializers turn structured content items into the output formats the
//! service exposes: Markdown and JSON.

pub mod json;
pub mod markdown;

pub use json::{JsonOptions, JsonSerializer};
pub use markdown::{MarkdownOptions, MarkdownSerializer};

//! # docling-api-core - Document Conversion Types
//!
//! Core types for the docling-api document conversion service: the document
//! model, structured content items, input/output format detection, error
//! types, and the Markdown/JSON serializers.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! // Note: DocumentConverter is in the docling-api-backend crate
//! use docling_api_backend::DocumentConverter;
//! use docling_api_core::Result;
//!
//! fn main() -> Result<()> {
//!     let converter = DocumentConverter::new();
//!     let result = converter.convert("document.html")?;
//!
//!     println!("Markdown output:\n{}", result.document.markdown);
//!     Ok(())
//! }
//! ```
//!
//! ## Supported Formats
//!
//! | Category | Formats |
//! |----------|---------|
//! | **Web & Markup** | HTML, Markdown, `AsciiDoc` |
//! | **Data** | CSV |
//! | **Plain text** | TXT |
//!
//! ## Module Organization
//!
//! - [`document`] - Core document types and metadata
//! - [`content`] - Structured content representation
//! - [`serializer`] - Output format serializers (Markdown, JSON)
//! - [`mod@format`] - Input format detection and output format selection
//! - [`error`] - Error types and handling
//!
//! ## Error Handling
//!
//! All conversion operations return a [`Result<T, DoclingError>`](error::DoclingError).

pub mod content;
pub mod document;
pub mod error;
pub mod format;
pub mod serializer;

// Re-exports for convenience
pub use content::*;
pub use document::*;
pub use error::*;
pub use format::*;
pub use serializer::*;

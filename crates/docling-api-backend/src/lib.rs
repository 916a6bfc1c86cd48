//! # docling-api-backend - Document Parsing Backends
//!
//! Format backends and the dispatching `DocumentConverter` for the
//! docling-api service.
//!
//! ## Architecture
//!
//! ```text
//! input bytes/path
//!        │
//!        ▼
//! DocumentConverter ── format detection (extension)
//!        │
//!        ├─ HtmlBackend      (scraper)
//!        ├─ MarkdownBackend  (pulldown-cmark)
//!        ├─ AsciidocBackend  (line parser)
//!        ├─ CsvBackend       (csv + delimiter sniffing)
//!        └─ TextBackend
//!        │
//!        ▼
//! Vec<DocItem> ── MarkdownSerializer ──► Document
//! ```
//!
//! Each backend implements [`DocumentBackend`] and produces structured
//! `DocItem`s; the converter serializes them to markdown and attaches
//! metadata and timing.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docling_api_backend::DocumentConverter;
//!
//! let converter = DocumentConverter::new();
//! let result = converter.convert("notes.adoc")?;
//! println!("{}", result.document.markdown);
//! # Ok::<(), docling_api_core::DoclingError>(())
//! ```

pub mod asciidoc;
pub mod converter;
pub mod csv;
pub mod html;
pub mod markdown;
pub mod text;
pub mod traits;

pub use asciidoc::AsciidocBackend;
pub use converter::DocumentConverter;
pub use csv::CsvBackend;
pub use html::HtmlBackend;
pub use markdown::MarkdownBackend;
pub use text::TextBackend;
pub use traits::{BackendOptions, DocumentBackend};

// Re-export the core result types callers almost always need
pub use docling_api_core::{ConversionResult, DoclingError, Document, InputFormat, OutputFormat};

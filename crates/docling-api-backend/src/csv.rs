//! CSV Backend - Parse CSV files to a table item
//!
//! Supports dialect detection (comma, semicolon, tab, pipe, colon
//! delimiters) by counting candidate delimiters on the first line. The first
//! row is treated as the header unless options say otherwise. Ragged rows
//! are tolerated and padded to the widest row.

use crate::traits::{decode_text, BackendOptions, DocumentBackend};
use docling_api_core::{DocItem, Document, DoclingError, InputFormat, MarkdownSerializer, TableData};

/// Candidate delimiters, checked in this order
const DELIMITERS: &[char] = &[',', ';', '\t', '|', ':'];

/// CSV Document Backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CsvBackend;

impl CsvBackend {
    /// Create a new CSV backend instance
    #[inline]
    #[must_use = "creates a backend instance that should be used for parsing"]
    pub const fn new() -> Self {
        Self
    }

    /// Detect the delimiter by counting candidates on the first line
    ///
    /// The most frequent candidate wins; a tie or absence of any candidate
    /// falls back to comma.
    #[must_use = "returns the detected delimiter"]
    fn detect_delimiter(content: &str) -> char {
        let first_line = content.lines().next().unwrap_or_default();

        let mut best_delimiter = ',';
        let mut max_count = 0;
        for &delim in DELIMITERS {
            let count = first_line.matches(delim).count();
            if count > max_count {
                max_count = count;
                best_delimiter = delim;
            }
        }
        best_delimiter
    }

    fn parse_rows(content: &str, delimiter: char) -> Result<Vec<Vec<String>>, DoclingError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter as u8)
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record
                .map_err(|e| DoclingError::BackendError(format!("CSV parse error: {e}")))?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(rows)
    }
}

impl DocumentBackend for CsvBackend {
    fn format(&self) -> InputFormat {
        InputFormat::Csv
    }

    fn parse_bytes(&self, data: &[u8], options: &BackendOptions) -> Result<Document, DoclingError> {
        let content = decode_text(data);

        // Empty input converts to an empty document, not an error
        if content.trim().is_empty() {
            let mut doc = Document::from_markdown(String::new(), InputFormat::Csv);
            doc.items = Some(vec![]);
            return Ok(doc);
        }

        let delimiter = Self::detect_delimiter(&content);
        log::debug!("csv: detected delimiter {delimiter:?}");

        let mut rows = Self::parse_rows(&content, delimiter)?;
        if !options.first_row_is_header && !rows.is_empty() {
            // Synthesize a header so the markdown table stays well-formed
            let width = rows.iter().map(Vec::len).max().unwrap_or(0);
            let header = (1..=width).map(|i| format!("col{i}")).collect();
            rows.insert(0, header);
        }

        let items = vec![DocItem::Table {
            data: TableData::from_rows(&rows),
        }];
        let markdown = MarkdownSerializer::new().serialize(&items);

        let mut doc = Document::from_markdown(markdown, InputFormat::Csv);
        doc.items = Some(items);
        Ok(doc)
    }
}

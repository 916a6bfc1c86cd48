//! Content item types for structured document representation
//!
//! This module defines the content items that backends produce while walking
//! a source document. The markdown serializer turns the item list into the
//! final markdown output, and the JSON output serializes items directly.

use serde::{Deserialize, Serialize};

/// A single cell in a table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell text content
    pub text: String,
    /// Zero-based row index
    pub row: usize,
    /// Zero-based column index
    pub col: usize,
    /// Whether this cell is part of the header row
    #[serde(default)]
    pub is_header: bool,
}

impl TableCell {
    /// Create a new table cell
    #[inline]
    #[must_use = "creates a new table cell"]
    pub fn new(text: impl Into<String>, row: usize, col: usize) -> Self {
        Self {
            text: text.into(),
            row,
            col,
            is_header: row == 0,
        }
    }
}

/// Table structure with a dense cell grid
///
/// Rows may be ragged in the source; `from_rows` pads short rows with empty
/// cells so the grid is dense. Every cell carries its own row/col
/// coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableData {
    /// Number of rows (including the header row)
    pub num_rows: usize,
    /// Number of columns (widest row wins)
    pub num_cols: usize,
    /// All cells in row-major order
    pub cells: Vec<TableCell>,
}

impl TableData {
    /// Build table data from rows of strings, padding ragged rows
    #[must_use = "builds table data from string rows"]
    pub fn from_rows(rows: &[Vec<String>]) -> Self {
        let num_rows = rows.len();
        let num_cols = rows.iter().map(Vec::len).max().unwrap_or(0);

        let mut cells = Vec::with_capacity(num_rows * num_cols);
        for (row_idx, row) in rows.iter().enumerate() {
            for (col_idx, text) in row.iter().enumerate() {
                cells.push(TableCell::new(text.clone(), row_idx, col_idx));
            }
            for col_idx in row.len()..num_cols {
                cells.push(TableCell::new(String::new(), row_idx, col_idx));
            }
        }

        Self {
            num_rows,
            num_cols,
            cells,
        }
    }

    /// Reconstruct the table as rows of cell texts
    #[must_use = "returns the table as rows of cell texts"]
    pub fn rows(&self) -> Vec<Vec<&str>> {
        let mut rows = vec![vec![""; self.num_cols]; self.num_rows];
        for cell in &self.cells {
            if cell.row < self.num_rows && cell.col < self.num_cols {
                rows[cell.row][cell.col] = cell.text.as_str();
            }
        }
        rows
    }
}

/// A structured content item produced by a backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "label", rename_all = "snake_case")]
pub enum DocItem {
    /// Document title
    Title {
        /// Title text
        text: String,
    },
    /// Section header with level 1-6
    SectionHeader {
        /// Header text
        text: String,
        /// Heading level (1 = top-level)
        level: usize,
    },
    /// Regular paragraph text
    Paragraph {
        /// Paragraph text
        text: String,
    },
    /// List item with nesting depth
    ListItem {
        /// Item text
        text: String,
        /// Nesting depth (0 = top-level)
        depth: usize,
        /// Whether the containing list is ordered
        ordered: bool,
        /// 1-based position within an ordered list
        index: usize,
    },
    /// Code block
    Code {
        /// Code text
        text: String,
        /// Language hint from the source, if any
        #[serde(skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
    /// Table
    Table {
        /// Table cell data
        data: TableData,
    },
}

impl DocItem {
    /// Plain text content of the item (table cells joined by spaces)
    #[must_use = "returns the plain text of the item"]
    pub fn text(&self) -> String {
        match self {
            Self::Title { text }
            | Self::SectionHeader { text, .. }
            | Self::Paragraph { text }
            | Self::ListItem { text, .. }
            | Self::Code { text, .. } => text.clone(),
            Self::Table { data } => data
                .cells
                .iter()
                .map(|c| c.text.as_str())
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_data_from_rows() {
        let rows = vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["1".to_string(), "2".to_string()],
        ];
        let data = TableData::from_rows(&rows);
        assert_eq!(data.num_rows, 2);
        assert_eq!(data.num_cols, 2);
        assert_eq!(data.cells.len(), 4);
        assert!(data.cells[0].is_header);
        assert!(!data.cells[2].is_header);
    }

    #[test]
    fn test_table_data_pads_ragged_rows() {
        let rows = vec![
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec!["1".to_string()],
        ];
        let data = TableData::from_rows(&rows);
        assert_eq!(data.num_cols, 3);
        assert_eq!(data.cells.len(), 6);

        let reconstructed = data.rows();
        assert_eq!(reconstructed[1], vec!["1", "", ""]);
    }

    #[test]
    fn test_table_data_empty() {
        let data = TableData::from_rows(&[]);
        assert_eq!(data.num_rows, 0);
        assert_eq!(data.num_cols, 0);
        assert!(data.cells.is_empty());
    }

    #[test]
    fn test_doc_item_text() {
        let item = DocItem::SectionHeader {
            text: "Overview".to_string(),
            level: 2,
        };
        assert_eq!(item.text(), "Overview");

        let table = DocItem::Table {
            data: TableData::from_rows(&[vec!["x".to_string(), "y".to_string()]]),
        };
        assert_eq!(table.text(), "x y");
    }

    #[test]
    fn test_doc_item_serde_tagging() {
        let item = DocItem::Code {
            text: "fn main() {}".to_string(),
            language: Some("rust".to_string()),
        };
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"label\":\"code\""));
        assert!(json.contains("rust"));

        let back: DocItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}

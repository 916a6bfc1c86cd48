//! Markdown serialization for structured content items
//!
//! Turns a `DocItem` list into markdown: ATX headings, nested lists, fenced
//! code blocks, and pipe tables with a header separator row.

use crate::content::{DocItem, TableData};

/// Options for markdown serialization
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MarkdownOptions {
    /// Spaces per list nesting level (default: 2)
    pub indent: usize,
    /// Escape pipe characters inside table cells (default: true)
    pub escape_pipes: bool,
    /// Blank line between top-level items (default: true)
    pub blank_line_between_items: bool,
}

impl Default for MarkdownOptions {
    #[inline]
    fn default() -> Self {
        Self {
            indent: 2,
            escape_pipes: true,
            blank_line_between_items: true,
        }
    }
}

/// Markdown serializer for `DocItem` lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MarkdownSerializer {
    options: MarkdownOptions,
}

impl MarkdownSerializer {
    /// Create a serializer with default options
    #[inline]
    #[must_use = "creates serializer with default options"]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a serializer with custom options
    #[inline]
    #[must_use = "creates serializer with custom options"]
    pub const fn with_options(options: MarkdownOptions) -> Self {
        Self { options }
    }

    /// Serialize content items to a markdown string
    #[must_use = "returns the serialized markdown"]
    pub fn serialize(&self, items: &[DocItem]) -> String {
        let mut blocks: Vec<String> = Vec::with_capacity(items.len());
        let mut list_run: Vec<String> = Vec::new();

        for item in items {
            // Consecutive list items form one block so the list stays tight
            if let DocItem::ListItem {
                text,
                depth,
                ordered,
                index,
            } = item
            {
                let pad = " ".repeat(depth * self.options.indent);
                let marker = if *ordered {
                    format!("{index}.")
                } else {
                    "-".to_string()
                };
                list_run.push(format!("{pad}{marker} {text}"));
                continue;
            }

            if !list_run.is_empty() {
                blocks.push(list_run.join("\n"));
                list_run.clear();
            }

            match item {
                DocItem::Title { text } => blocks.push(format!("# {text}")),
                DocItem::SectionHeader { text, level } => {
                    let level = (*level).clamp(1, 6);
                    blocks.push(format!("{} {text}", "#".repeat(level)));
                }
                DocItem::Paragraph { text } => blocks.push(text.clone()),
                DocItem::Code { text, language } => {
                    let lang = language.as_deref().unwrap_or("");
                    blocks.push(format!("```{lang}\n{}\n```", text.trim_end_matches('\n')));
                }
                DocItem::Table { data } => blocks.push(self.serialize_table(data)),
                DocItem::ListItem { .. } => unreachable!("handled above"),
            }
        }

        if !list_run.is_empty() {
            blocks.push(list_run.join("\n"));
        }

        let sep = if self.options.blank_line_between_items {
            "\n\n"
        } else {
            "\n"
        };
        let mut out = blocks.join(sep);
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }

    fn serialize_table(&self, data: &TableData) -> String {
        if data.num_rows == 0 || data.num_cols == 0 {
            return String::new();
        }

        let rows = data.rows();
        let mut lines = Vec::with_capacity(data.num_rows + 1);

        for (row_idx, row) in rows.iter().enumerate() {
            let cells: Vec<String> = row.iter().map(|c| self.escape_cell(c)).collect();
            lines.push(format!("| {} |", cells.join(" | ")));

            if row_idx == 0 {
                let dashes = vec!["---"; data.num_cols];
                lines.push(format!("| {} |", dashes.join(" | ")));
            }
        }

        lines.join("\n")
    }

    fn escape_cell(&self, text: &str) -> String {
        // Newlines never survive inside a pipe-table cell
        let flat = text.replace('\n', " ");
        if self.options.escape_pipes {
            flat.replace('|', "\\|")
        } else {
            flat
        }
    }
}

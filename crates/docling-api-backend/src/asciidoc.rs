//! AsciiDoc Backend - Parse `AsciiDoc` documents to structured content items
//!
//! Line-oriented parser covering the constructs the conversion service
//! exposes:
//!
//! - `= Title`, `== Section` ... → `Title` / `SectionHeader`
//! - `* item`, `** nested` → unordered `ListItem`s
//! - `. item`, `.. nested` → ordered `ListItem`s
//! - `----` listing blocks (with an optional `[source,lang]` attribute line)
//! - `|===` tables with one row per line
//! - contiguous plain lines → `Paragraph`
//!
//! Line comments (`//`) and attribute entries (`:name: value`) are dropped.

use crate::traits::{decode_text, BackendOptions, DocumentBackend};
use docling_api_core::{DocItem, Document, DoclingError, InputFormat, MarkdownSerializer, TableData};
use regex::Regex;

/// `AsciiDoc` Document Backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AsciidocBackend;

struct LineClassifier {
    source_attr: Regex,
}

impl LineClassifier {
    fn new() -> Self {
        Self {
            // [source] or [source,rust]
            source_attr: Regex::new(r"^\[source(?:\s*,\s*([A-Za-z0-9_+-]+))?\]\s*$")
                .unwrap_or_else(|e| unreachable!("static regex is valid: {e}")),
        }
    }
}

impl AsciidocBackend {
    /// Create a new `AsciiDoc` backend instance
    #[inline]
    #[must_use = "creates a backend instance that should be used for parsing"]
    pub const fn new() -> Self {
        Self
    }

    fn parse_asciidoc(source: &str, options: &BackendOptions) -> Vec<DocItem> {
        let classifier = LineClassifier::new();
        let mut items: Vec<DocItem> = Vec::new();
        let mut paragraph: Vec<String> = Vec::new();
        let mut ordered_counters: Vec<usize> = Vec::new();

        let mut pending_language: Option<String> = None;
        let mut in_code_block = false;
        let mut code_lines: Vec<String> = Vec::new();
        let mut in_table = false;
        let mut table_rows: Vec<Vec<String>> = Vec::new();

        let flush_paragraph = |paragraph: &mut Vec<String>, items: &mut Vec<DocItem>| {
            if !paragraph.is_empty() {
                items.push(DocItem::Paragraph {
                    text: paragraph.join(" "),
                });
                paragraph.clear();
            }
        };

        for line in source.lines() {
            if let Some(max) = options.max_items {
                if items.len() >= max {
                    break;
                }
            }

            // Listing block delimiter toggles code collection
            if line.trim_end() == "----" {
                if in_code_block {
                    in_code_block = false;
                    items.push(DocItem::Code {
                        text: code_lines.join("\n"),
                        language: pending_language.take(),
                    });
                    code_lines.clear();
                } else {
                    flush_paragraph(&mut paragraph, &mut items);
                    in_code_block = true;
                }
                continue;
            }
            if in_code_block {
                code_lines.push(line.to_string());
                continue;
            }

            // Table block delimiter
            if line.trim_end() == "|===" {
                if in_table {
                    in_table = false;
                    if !table_rows.is_empty() {
                        items.push(DocItem::Table {
                            data: TableData::from_rows(&table_rows),
                        });
                        table_rows.clear();
                    }
                } else {
                    flush_paragraph(&mut paragraph, &mut items);
                    in_table = true;
                }
                continue;
            }
            if in_table {
                if let Some(rest) = line.strip_prefix('|') {
                    let row: Vec<String> =
                        rest.split('|').map(|c| c.trim().to_string()).collect();
                    if !row.iter().all(String::is_empty) {
                        table_rows.push(row);
                    }
                }
                continue;
            }

            let trimmed = line.trim_end();

            // Source attribute applies to the next listing block
            if let Some(caps) = classifier.source_attr.captures(trimmed) {
                pending_language = caps.get(1).map(|m| m.as_str().to_string());
                continue;
            }

            // Comments and attribute entries
            if trimmed.starts_with("//")
                || (trimmed.starts_with(':') && trimmed[1..].contains(':'))
            {
                continue;
            }

            if trimmed.is_empty() {
                flush_paragraph(&mut paragraph, &mut items);
                ordered_counters.clear();
                continue;
            }

            // Section titles: `= `, `== `, ...
            if let Some((level, text)) = marker_prefix(trimmed, '=') {
                flush_paragraph(&mut paragraph, &mut items);
                ordered_counters.clear();
                if level == 1 {
                    items.push(DocItem::Title {
                        text: text.to_string(),
                    });
                } else {
                    items.push(DocItem::SectionHeader {
                        text: text.to_string(),
                        level,
                    });
                }
                continue;
            }

            // Unordered list: `* `, `** `, ...
            if let Some((level, text)) = marker_prefix(trimmed, '*') {
                flush_paragraph(&mut paragraph, &mut items);
                items.push(DocItem::ListItem {
                    text: text.to_string(),
                    depth: level - 1,
                    ordered: false,
                    index: 1,
                });
                continue;
            }

            // Ordered list: `. `, `.. `, ...
            if let Some((level, text)) = marker_prefix(trimmed, '.') {
                flush_paragraph(&mut paragraph, &mut items);
                if ordered_counters.len() < level {
                    ordered_counters.resize(level, 0);
                }
                ordered_counters.truncate(level);
                ordered_counters[level - 1] += 1;
                items.push(DocItem::ListItem {
                    text: text.to_string(),
                    depth: level - 1,
                    ordered: true,
                    index: ordered_counters[level - 1],
                });
                continue;
            }

            paragraph.push(trimmed.to_string());
        }

        flush_paragraph(&mut paragraph, &mut items);
        if in_code_block && !code_lines.is_empty() {
            // Unterminated listing block keeps its content
            items.push(DocItem::Code {
                text: code_lines.join("\n"),
                language: pending_language,
            });
        }

        items
    }

    fn document_title(items: &[DocItem]) -> Option<String> {
        items.iter().find_map(|item| match item {
            DocItem::Title { text } => Some(text.clone()),
            _ => None,
        })
    }
}

/// Match a repeated-marker prefix (`== text`, `** text`, `.. text`)
///
/// Returns the marker count and the remaining text. The marker run must be
/// followed by a space to count as structure, so `...ellipsis` stays text.
fn marker_prefix(line: &str, marker: char) -> Option<(usize, &str)> {
    let count = line.chars().take_while(|&c| c == marker).count();
    if count == 0 {
        return None;
    }
    let rest = &line[count..];
    let text = rest.strip_prefix(' ')?.trim();
    if text.is_empty() {
        return None;
    }
    Some((count, text))
}

impl DocumentBackend for AsciidocBackend {
    fn format(&self) -> InputFormat {
        InputFormat::Asciidoc
    }

    fn parse_bytes(&self, data: &[u8], options: &BackendOptions) -> Result<Document, DoclingError> {
        let source = decode_text(data);
        let items = Self::parse_asciidoc(&source, options);
        let markdown = MarkdownSerializer::new().serialize(&items);

        let mut doc = Document::from_markdown(markdown, InputFormat::Asciidoc);
        doc.metadata.title = Self::document_title(&items);
        doc.items = Some(items);
        Ok(doc)
    }
}

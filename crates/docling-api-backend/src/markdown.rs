//! Markdown Backend - Parse Markdown documents to structured content items
//!
//! Uses the `pulldown-cmark` event-based parser. Headings become
//! `SectionHeader`s, list items keep their nesting depth and ordered-list
//! numbering, fenced code blocks keep their language hint, and GFM pipe
//! tables become `Table` items.
//!
//! Parsing markdown that is then re-serialized to markdown is not a no-op:
//! the output is normalized (consistent markers, collapsed whitespace),
//! which is exactly what the JSON output path needs to agree with.

use crate::traits::{decode_text, BackendOptions, DocumentBackend};
use docling_api_core::{DocItem, Document, DoclingError, InputFormat, MarkdownSerializer, TableData};
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

/// Markdown Document Backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MarkdownBackend;

/// Parser state for the event walk
#[derive(Debug, Default)]
struct ParseState {
    items: Vec<DocItem>,

    // Inline text accumulation
    text_buffer: String,

    // Heading state
    heading_level: Option<usize>,

    // List nesting: (is_ordered, next_item_number) per open list
    list_stack: Vec<(bool, usize)>,

    // Code block state
    in_code_block: bool,
    code_buffer: String,
    code_language: Option<String>,

    // Table state
    in_table: bool,
    table_rows: Vec<Vec<String>>,
    table_row: Vec<String>,

    // Destinations of currently-open links (None when hyperlinks are off)
    link_stack: Vec<Option<String>>,
}

impl ParseState {
    fn take_text(&mut self) -> String {
        let text = self.text_buffer.trim().to_string();
        self.text_buffer.clear();
        text
    }

    /// Emit any pending list-item text at the current nesting depth
    fn flush_list_item(&mut self) {
        let text = self.take_text();
        if text.is_empty() {
            return;
        }
        let Some(depth) = self.list_stack.len().checked_sub(1) else {
            return;
        };
        let (ordered, ref mut next) = self.list_stack[depth];
        let index = *next;
        *next += 1;
        self.items.push(DocItem::ListItem {
            text,
            depth,
            ordered,
            index,
        });
    }
}

impl MarkdownBackend {
    /// Create a new Markdown backend instance
    #[inline]
    #[must_use = "creates a backend instance that should be used for parsing"]
    pub const fn new() -> Self {
        Self
    }

    fn parse_markdown(source: &str, options: &BackendOptions) -> Vec<DocItem> {
        let mut md_options = Options::empty();
        md_options.insert(Options::ENABLE_TABLES);
        md_options.insert(Options::ENABLE_STRIKETHROUGH);

        let parser = Parser::new_ext(source, md_options);
        let mut state = ParseState::default();

        for event in parser {
            match event {
                Event::Start(tag) => Self::handle_start(tag, &mut state, options),
                Event::End(tag) => Self::handle_end(tag, &mut state),
                Event::Text(text) => {
                    if state.in_code_block {
                        state.code_buffer.push_str(&text);
                    } else {
                        state.text_buffer.push_str(&text);
                    }
                }
                Event::Code(code) => {
                    state.text_buffer.push('`');
                    state.text_buffer.push_str(&code);
                    state.text_buffer.push('`');
                }
                Event::SoftBreak | Event::HardBreak => state.text_buffer.push(' '),
                // Raw HTML and other event kinds carry no block structure here
                _ => {}
            }

            if let Some(max) = options.max_items {
                if state.items.len() >= max {
                    break;
                }
            }
        }

        state.items
    }

    fn handle_start(tag: Tag<'_>, state: &mut ParseState, options: &BackendOptions) {
        match tag {
            Tag::Heading { level, .. } => {
                state.text_buffer.clear();
                state.heading_level = Some(level as usize);
            }
            Tag::List(start) => {
                // A nested list closes the pending parent item text first
                if !state.list_stack.is_empty() {
                    state.flush_list_item();
                }
                let ordered = start.is_some();
                let first = usize::try_from(start.unwrap_or(1)).unwrap_or(1);
                state.list_stack.push((ordered, first));
            }
            Tag::Item => state.text_buffer.clear(),
            Tag::CodeBlock(kind) => {
                state.in_code_block = true;
                state.code_buffer.clear();
                state.code_language = match kind {
                    CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                    _ => None,
                };
            }
            Tag::Table(_) => {
                state.in_table = true;
                state.table_rows.clear();
            }
            Tag::TableRow | Tag::TableHead => state.table_row.clear(),
            Tag::TableCell => state.text_buffer.clear(),
            Tag::Link { dest_url, .. } => {
                if options.keep_hyperlinks {
                    state.text_buffer.push('[');
                    state.link_stack.push(Some(dest_url.to_string()));
                } else {
                    state.link_stack.push(None);
                }
            }
            _ => {}
        }
    }

    fn handle_end(tag: TagEnd, state: &mut ParseState) {
        match tag {
            TagEnd::Heading(_) => {
                let text = state.take_text();
                if let Some(level) = state.heading_level.take() {
                    if !text.is_empty() {
                        state.items.push(DocItem::SectionHeader { text, level });
                    }
                }
            }
            TagEnd::Paragraph => {
                if state.list_stack.is_empty() && !state.in_table {
                    let text = state.take_text();
                    if !text.is_empty() {
                        state.items.push(DocItem::Paragraph { text });
                    }
                }
                // Inside a list item the paragraph text flushes at item end
            }
            TagEnd::Item => state.flush_list_item(),
            TagEnd::List(_) => {
                state.list_stack.pop();
            }
            TagEnd::CodeBlock => {
                state.in_code_block = false;
                let text = state.code_buffer.trim_end_matches('\n').to_string();
                if !text.is_empty() {
                    state.items.push(DocItem::Code {
                        text,
                        language: state.code_language.take(),
                    });
                }
                state.code_buffer.clear();
            }
            TagEnd::TableCell => {
                let text = state.take_text();
                state.table_row.push(text);
            }
            TagEnd::TableHead | TagEnd::TableRow => {
                if !state.table_row.is_empty() {
                    state.table_rows.push(std::mem::take(&mut state.table_row));
                }
            }
            TagEnd::Table => {
                state.in_table = false;
                if !state.table_rows.is_empty() {
                    let rows = std::mem::take(&mut state.table_rows);
                    state.items.push(DocItem::Table {
                        data: TableData::from_rows(&rows),
                    });
                }
            }
            TagEnd::Link => {
                if let Some(Some(url)) = state.link_stack.pop() {
                    state.text_buffer.push_str("](");
                    state.text_buffer.push_str(&url);
                    state.text_buffer.push(')');
                }
            }
            _ => {}
        }
    }

    /// First H1 text, used as the document title
    fn first_h1(items: &[DocItem]) -> Option<String> {
        items.iter().find_map(|item| match item {
            DocItem::SectionHeader { text, level: 1 } => Some(text.clone()),
            _ => None,
        })
    }
}

impl DocumentBackend for MarkdownBackend {
    fn format(&self) -> InputFormat {
        InputFormat::Md
    }

    fn parse_bytes(&self, data: &[u8], options: &BackendOptions) -> Result<Document, DoclingError> {
        let source = decode_text(data);
        let items = Self::parse_markdown(&source, options);
        let markdown = MarkdownSerializer::new().serialize(&items);

        let mut doc = Document::from_markdown(markdown, InputFormat::Md);
        doc.metadata.title = Self::first_h1(&items);
        doc.items = Some(items);
        Ok(doc)
    }
}

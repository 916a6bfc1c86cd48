//! HTML Backend - Parse HTML documents to structured content items
//!
//! Walks the DOM produced by `scraper` and maps block-level elements to
//! `DocItem`s:
//!
//! - `<h1>`..`<h6>` → `SectionHeader`
//! - `<p>` → `Paragraph`
//! - `<ul>`/`<ol>`/`<li>` → `ListItem` with nesting depth
//! - `<pre>` → `Code` (language sniffed from `class="language-*"`)
//! - `<table>` → `Table` with cell grid
//!
//! `<script>`, `<style>`, and `<noscript>` content is dropped. Inline
//! whitespace is collapsed the way browsers render it.

use crate::traits::{decode_text, BackendOptions, DocumentBackend};
use docling_api_core::{DocItem, Document, DoclingError, InputFormat, MarkdownSerializer, TableData};
use scraper::{ElementRef, Html};

/// Elements whose subtree never contributes content
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "svg"];

/// HTML Document Backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HtmlBackend;

/// Walker state shared across the recursive DOM traversal
struct WalkState<'o> {
    items: Vec<DocItem>,
    list_depth: usize,
    options: &'o BackendOptions,
}

impl WalkState<'_> {
    fn push(&mut self, item: DocItem) {
        if let Some(max) = self.options.max_items {
            if self.items.len() >= max {
                return;
            }
        }
        self.items.push(item);
    }
}

impl HtmlBackend {
    /// Create a new HTML backend instance
    #[inline]
    #[must_use = "creates a backend instance that should be used for parsing"]
    pub const fn new() -> Self {
        Self
    }

    /// Extract content items from an HTML fragment or document
    fn extract_items(html: &Html, options: &BackendOptions) -> Vec<DocItem> {
        let mut state = WalkState {
            items: Vec::new(),
            list_depth: 0,
            options,
        };
        Self::walk(html.root_element(), &mut state);
        state.items
    }

    fn walk(element: ElementRef<'_>, state: &mut WalkState<'_>) {
        let name = element.value().name();

        if SKIPPED_ELEMENTS.contains(&name) {
            return;
        }

        match name {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = name.as_bytes()[1] as usize - b'0' as usize;
                let text = Self::collect_text(element, state.options);
                if !text.is_empty() {
                    state.push(DocItem::SectionHeader { text, level });
                }
            }
            "p" | "blockquote" | "figcaption" => {
                let text = Self::collect_text(element, state.options);
                if !text.is_empty() {
                    state.push(DocItem::Paragraph { text });
                }
            }
            "ul" | "ol" => Self::walk_list(element, name == "ol", state),
            "pre" => {
                let text = Self::raw_text(element);
                if !text.trim().is_empty() {
                    state.push(DocItem::Code {
                        text: text.trim_matches('\n').to_string(),
                        language: Self::code_language(element),
                    });
                }
            }
            "table" => {
                let rows = Self::collect_table_rows(element, state.options);
                if !rows.is_empty() {
                    state.push(DocItem::Table {
                        data: TableData::from_rows(&rows),
                    });
                }
            }
            _ => {
                for child in element.children() {
                    if let Some(child_el) = ElementRef::wrap(child) {
                        Self::walk(child_el, state);
                    }
                }
            }
        }
    }

    fn walk_list(list: ElementRef<'_>, ordered: bool, state: &mut WalkState<'_>) {
        let mut index = 0;
        for child in list.children() {
            let Some(child_el) = ElementRef::wrap(child) else {
                continue;
            };
            if child_el.value().name() != "li" {
                continue;
            }
            index += 1;

            let text = Self::collect_item_text(child_el, state.options);
            if !text.is_empty() {
                state.push(DocItem::ListItem {
                    text,
                    depth: state.list_depth,
                    ordered,
                    index,
                });
            }

            // Nested lists become deeper items under this one
            state.list_depth += 1;
            for grandchild in child_el.children() {
                if let Some(el) = ElementRef::wrap(grandchild) {
                    let name = el.value().name();
                    if name == "ul" || name == "ol" {
                        Self::walk_list(el, name == "ol", state);
                    }
                }
            }
            state.list_depth -= 1;
        }
    }

    /// Inline text of an element, whitespace-collapsed, links rendered
    fn collect_text(element: ElementRef<'_>, options: &BackendOptions) -> String {
        let mut out = String::new();
        Self::collect_text_into(element, options, true, &mut out);
        normalize_whitespace(&out)
    }

    /// Like `collect_text` but excluding nested `<ul>`/`<ol>` subtrees,
    /// which are emitted as their own list items
    fn collect_item_text(element: ElementRef<'_>, options: &BackendOptions) -> String {
        let mut out = String::new();
        Self::collect_text_into(element, options, false, &mut out);
        normalize_whitespace(&out)
    }

    fn collect_text_into(
        element: ElementRef<'_>,
        options: &BackendOptions,
        descend_lists: bool,
        out: &mut String,
    ) {
        let name = element.value().name();
        if SKIPPED_ELEMENTS.contains(&name) {
            return;
        }
        if !descend_lists && (name == "ul" || name == "ol") {
            return;
        }

        if name == "a" && options.keep_hyperlinks {
            if let Some(href) = element.value().attr("href") {
                let inner = {
                    let mut buf = String::new();
                    for child in element.children() {
                        if let Some(text) = child.value().as_text() {
                            buf.push_str(text);
                        } else if let Some(el) = ElementRef::wrap(child) {
                            Self::collect_text_into(el, options, descend_lists, &mut buf);
                        }
                    }
                    normalize_whitespace(&buf)
                };
                if !inner.is_empty() {
                    out.push_str(&format!("[{inner}]({href})"));
                }
                return;
            }
        }

        if name == "br" {
            out.push(' ');
            return;
        }

        for child in element.children() {
            if let Some(text) = child.value().as_text() {
                out.push_str(text);
            } else if let Some(el) = ElementRef::wrap(child) {
                Self::collect_text_into(el, options, descend_lists, out);
            }
        }
    }

    /// Verbatim text content (for `<pre>` blocks)
    fn raw_text(element: ElementRef<'_>) -> String {
        element.text().collect::<String>()
    }

    /// Language hint from `<code class="language-rust">` inside a `<pre>`
    fn code_language(pre: ElementRef<'_>) -> Option<String> {
        for child in pre.children() {
            if let Some(el) = ElementRef::wrap(child) {
                if el.value().name() == "code" {
                    if let Some(class) = el.value().attr("class") {
                        for token in class.split_whitespace() {
                            if let Some(lang) = token.strip_prefix("language-") {
                                return Some(lang.to_string());
                            }
                        }
                    }
                }
            }
        }
        None
    }

    fn collect_table_rows(table: ElementRef<'_>, options: &BackendOptions) -> Vec<Vec<String>> {
        let mut rows = Vec::new();
        Self::collect_tr(table, options, &mut rows);
        rows
    }

    fn collect_tr(element: ElementRef<'_>, options: &BackendOptions, rows: &mut Vec<Vec<String>>) {
        for child in element.children() {
            let Some(el) = ElementRef::wrap(child) else {
                continue;
            };
            match el.value().name() {
                "tr" => {
                    let mut row = Vec::new();
                    for cell in el.children() {
                        if let Some(cell_el) = ElementRef::wrap(cell) {
                            let cell_name = cell_el.value().name();
                            if cell_name == "td" || cell_name == "th" {
                                row.push(Self::collect_text(cell_el, options));
                            }
                        }
                    }
                    if !row.is_empty() {
                        rows.push(row);
                    }
                }
                "thead" | "tbody" | "tfoot" => Self::collect_tr(el, options, rows),
                _ => {}
            }
        }
    }

    /// Document title from the `<title>` element, if present and non-empty
    fn document_title(html: &Html) -> Option<String> {
        fn find_title(element: ElementRef<'_>) -> Option<String> {
            if element.value().name() == "title" {
                let text = normalize_whitespace(&element.text().collect::<String>());
                return (!text.is_empty()).then_some(text);
            }
            for child in element.children() {
                if let Some(el) = ElementRef::wrap(child) {
                    if let Some(title) = find_title(el) {
                        return Some(title);
                    }
                }
            }
            None
        }
        find_title(html.root_element())
    }
}

/// Collapse whitespace runs to single spaces and trim
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl DocumentBackend for HtmlBackend {
    fn format(&self) -> InputFormat {
        InputFormat::Html
    }

    fn parse_bytes(&self, data: &[u8], options: &BackendOptions) -> Result<Document, DoclingError> {
        let source = decode_text(data);
        let html = Html::parse_document(&source);

        let items = Self::extract_items(&html, options);
        let markdown = MarkdownSerializer::new().serialize(&items);

        let mut doc = Document::from_markdown(markdown, InputFormat::Html);
        doc.metadata.title = Self::document_title(&html);
        doc.items = Some(items);
        Ok(doc)
    }
}

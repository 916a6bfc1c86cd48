//! End-to-end conversion tests across backends
//!
//! Inline fixtures are converted through `DocumentConverter` and the
//! resulting markdown and structured content are checked together.

use docling_api_backend::{BackendOptions, DocumentConverter, InputFormat};
use docling_api_core::DocItem;
use std::io::Write;

#[test]
fn html_document_full_structure() {
    let html = r#"
<html>
  <head><title>Quarterly Report</title></head>
  <body>
    <h1>Quarterly Report</h1>
    <p>Summary of <a href="https://example.com/q3">Q3</a> results.</p>
    <h2>Numbers</h2>
    <table>
      <tr><th>Region</th><th>Revenue</th></tr>
      <tr><td>EMEA</td><td>10</td></tr>
      <tr><td>APAC</td><td>12</td></tr>
    </table>
    <h2>Next steps</h2>
    <ul>
      <li>hire</li>
      <li>ship
        <ul><li>faster</li></ul>
      </li>
    </ul>
  </body>
</html>"#;

    let result = DocumentConverter::new()
        .convert_bytes(html.as_bytes(), InputFormat::Html)
        .unwrap();
    let doc = &result.document;

    assert_eq!(doc.metadata.title.as_deref(), Some("Quarterly Report"));
    assert!(doc.markdown.starts_with("# Quarterly Report\n"));
    assert!(doc
        .markdown
        .contains("Summary of [Q3](https://example.com/q3) results."));
    assert!(doc.markdown.contains("| Region | Revenue |"));
    assert!(doc.markdown.contains("| --- | --- |"));
    assert!(doc.markdown.contains("- ship\n  - faster"));

    let items = doc.items().unwrap();
    assert!(items
        .iter()
        .any(|i| matches!(i, DocItem::Table { data } if data.num_rows == 3)));
}

#[test]
fn markdown_document_normalizes() {
    let md = "# Title\n\nSome *text* with [a link](https://example.com).\n\n\
              + item one\n+ item two\n";
    let result = DocumentConverter::new()
        .convert_bytes(md.as_bytes(), InputFormat::Md)
        .unwrap();

    // `+` list markers normalize to `-`
    assert!(result.document.markdown.contains("- item one\n- item two"));
    assert!(result
        .document
        .markdown
        .contains("[a link](https://example.com)"));
    assert_eq!(result.document.metadata.title.as_deref(), Some("Title"));
}

#[test]
fn asciidoc_document_structure() {
    let adoc = "= Manual\n\n== Install\n\nRun the installer.\n\n\
                [source,sh]\n----\nmake install\n----\n";
    let result = DocumentConverter::new()
        .convert_bytes(adoc.as_bytes(), InputFormat::Asciidoc)
        .unwrap();

    assert_eq!(
        result.document.markdown,
        "# Manual\n\n## Install\n\nRun the installer.\n\n```sh\nmake install\n```\n"
    );
}

#[test]
fn csv_semicolon_dialect_detected() {
    let csv = "city;population\nBerlin;3700000\nParis;2100000\n";
    let result = DocumentConverter::new()
        .convert_bytes(csv.as_bytes(), InputFormat::Csv)
        .unwrap();

    assert_eq!(
        result.document.markdown,
        "| city | population |\n| --- | --- |\n| Berlin | 3700000 |\n| Paris | 2100000 |\n"
    );
}

#[test]
fn conversion_from_file_paths() {
    let dir = tempfile::tempdir().unwrap();
    let converter = DocumentConverter::new();

    let cases: &[(&str, &[u8], InputFormat)] = &[
        ("page.html", b"<p>html</p>", InputFormat::Html),
        ("notes.md", b"markdown", InputFormat::Md),
        ("doc.adoc", b"asciidoc", InputFormat::Asciidoc),
        ("data.csv", b"a,b\n1,2\n", InputFormat::Csv),
        ("plain.txt", b"text", InputFormat::Text),
    ];

    for (name, bytes, format) in cases {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(bytes).unwrap();

        let result = converter.convert(&path).unwrap();
        assert_eq!(result.document.format, *format, "format for {name}");
        assert!(
            !result.document.markdown.is_empty(),
            "non-empty output for {name}"
        );
    }
}

#[test]
fn structured_items_agree_with_markdown() {
    let result = DocumentConverter::new()
        .convert_bytes(b"<h2>Section</h2><p>Body</p>", InputFormat::Html)
        .unwrap();

    let items = result.document.items().unwrap();
    assert_eq!(
        items,
        &[
            DocItem::SectionHeader {
                text: "Section".to_string(),
                level: 2
            },
            DocItem::Paragraph {
                text: "Body".to_string()
            },
        ]
    );
    assert_eq!(result.document.markdown, "## Section\n\nBody\n");
}

#[test]
fn max_items_option_applies_across_backends() {
    let converter = DocumentConverter::with_options(BackendOptions::default().with_max_items(Some(1)));

    let html = converter
        .convert_bytes(b"<p>a</p><p>b</p>", InputFormat::Html)
        .unwrap();
    assert_eq!(html.document.items().unwrap().len(), 1);

    let text = converter
        .convert_bytes(b"a\n\nb\n", InputFormat::Text)
        .unwrap();
    assert_eq!(text.document.items().unwrap().len(), 1);
}

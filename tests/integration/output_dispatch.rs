//! Integration tests for the output dispatcher across formats.

use rdcli::output::{
    output, render_output, ColumnConfig, ColumnStyle, OutputFormat, OutputOptions, Style,
};
use serde_json::{json, Value};

fn bookmarks() -> Value {
    json!([
        {
            "_id": 1,
            "title": "Rust Book",
            "link": "https://doc.rust-lang.org/book/",
            "tags": ["rust", "docs"],
            "note": null
        },
        {
            "_id": 2,
            "title": "Tokio",
            "link": "https://tokio.rs",
            "tags": [],
            "note": "async\nruntime"
        }
    ])
}

fn columns() -> Vec<ColumnConfig> {
    vec![
        ColumnConfig::new("title", "Title").prominent().style(ColumnStyle::Bold),
        ColumnConfig::new("link", "Link").prominent(),
        ColumnConfig::new("tags", "Tags"),
        ColumnConfig::new("note", "Note"),
    ]
}

fn render(format: OutputFormat) -> String {
    render_output(&bookmarks(), &columns(), &OutputOptions::new(format)).unwrap()
}

#[test]
fn test_tsv_escapes_and_joins() {
    assert_eq!(
        render(OutputFormat::Tsv),
        "Title\tLink\tTags\tNote\n\
         Rust Book\thttps://doc.rust-lang.org/book/\trust,docs\t\n\
         Tokio\thttps://tokio.rs\t\tasync\\nruntime"
    );
}

#[test]
fn test_json_is_pretty_and_complete() {
    let rendered = render(OutputFormat::Json);
    let parsed: Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(parsed, bookmarks());
    assert!(rendered.contains("\n  {"));
}

#[test]
fn test_table_contains_every_cell() {
    let rendered = render(OutputFormat::Table);
    for expected in ["Title", "Link", "Tags", "Note", "Rust Book", "rust, docs", "https://tokio.rs"] {
        assert!(rendered.contains(expected), "missing {:?} in\n{}", expected, rendered);
    }
    assert!(!rendered.contains('\u{1b}'));
}

#[test]
fn test_plain_cards() {
    let rendered = render(OutputFormat::Plain);
    let separator = format!("\n\n{}\n\n", "─".repeat(40));
    let cards: Vec<&str> = rendered.split(separator.as_str()).collect();
    assert_eq!(cards.len(), 2);
    assert!(cards[0].starts_with("Rust Book\nhttps://doc.rust-lang.org/book/\n\n"));
    assert!(cards[0].contains("rust, docs"));
    assert!(cards[1].contains("async"));
    assert!(!rendered.contains('\u{1b}'));
}

#[test]
fn test_empty_input_per_format() {
    let empty = json!([]);
    let options = |format| OutputOptions::new(format);
    assert_eq!(render_output(&empty, &columns(), &options(OutputFormat::Json)).unwrap(), "[]");
    assert_eq!(
        render_output(&empty, &columns(), &options(OutputFormat::Tsv)).unwrap(),
        "Title\tLink\tTags\tNote"
    );
    assert_eq!(
        render_output(&empty, &columns(), &options(OutputFormat::Plain)).unwrap(),
        "No results"
    );
}

#[test]
fn test_colored_plain_emits_escapes() {
    let options = OutputOptions::new(OutputFormat::Plain).with_style(Style::new(true));
    let rendered = render_output(&bookmarks(), &columns(), &options).unwrap();
    assert!(rendered.contains('\u{1b}'));
}

#[test]
fn test_output_writes_once_with_trailing_newline() {
    let mut buf = Vec::new();
    output(&mut buf, &bookmarks(), &columns(), &OutputOptions::new(OutputFormat::Tsv)).unwrap();
    let written = String::from_utf8(buf).unwrap();
    assert!(written.ends_with("runtime\n"));
    assert!(!written.ends_with("\n\n"));
}

#[test]
fn test_quiet_prefers_underscore_id() {
    let data = json!([{"_id": "abc", "id": 5}, {"id": 6}, {"title": "no id"}]);
    let rendered =
        render_output(&data, &columns(), &OutputOptions::new(OutputFormat::Table).quiet(true))
            .unwrap();
    assert_eq!(rendered, "abc\n6");
}

//! Integration tests for collection trees: building, rendering, and dispatch.

use rdcli::output::{output_tree, render_tree_output, OutputFormat, OutputOptions};
use rdcli::tree::{build_tree, flatten_tree_to_data, TreeItem};
use serde_json::json;

fn roots() -> Vec<TreeItem> {
    vec![
        TreeItem::new(1, "work", 2),
        TreeItem::new(2, "Archive", 0),
        TreeItem::new(3, "Work", 1),
    ]
}

fn children() -> Vec<TreeItem> {
    vec![
        TreeItem::new(10, "Rust", 5).with_parent(1),
        TreeItem::new(11, "async", 1).with_parent(10),
        TreeItem::new(12, "Orphan", 1).with_parent(404),
    ]
}

#[test]
fn test_case_insensitive_sort_with_stable_tiebreak() {
    let forest = build_tree(&roots(), &children());
    let titles: Vec<(&str, i64)> = forest
        .iter()
        .map(|n| (n.item.title.as_str(), n.item.id))
        .collect();
    assert_eq!(
        titles,
        vec![("Archive", 2), ("Orphan", 12), ("Work", 3), ("work", 1)]
    );
}

#[test]
fn test_same_input_same_output() {
    let first = build_tree(&roots(), &children());
    let mut shuffled_children = children();
    shuffled_children.reverse();
    let mut shuffled_roots = roots();
    shuffled_roots.rotate_left(1);
    let second = build_tree(&shuffled_roots, &shuffled_children);
    assert_eq!(first, second);
}

#[test]
fn test_flattened_rows_track_depth() {
    let rows = flatten_tree_to_data(&build_tree(&roots(), &children()));
    let depths: Vec<(i64, usize)> = rows.iter().map(|r| (r.id, r.depth)).collect();
    assert_eq!(
        depths,
        vec![(2, 0), (12, 0), (3, 0), (1, 0), (10, 1), (11, 2)]
    );
}

#[test]
fn test_json_tree_output_is_flat() {
    let forest = build_tree(&roots(), &children());
    let rendered = render_tree_output(&forest, &OutputOptions::new(OutputFormat::Json)).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 6);
    assert_eq!(
        parsed[5],
        json!({"title": "async", "id": 11, "count": 1, "parentId": 10, "depth": 2})
    );
}

#[test]
fn test_terminal_connectors() {
    let forest = build_tree(&roots(), &children());
    let rendered = render_tree_output(&forest, &OutputOptions::new(OutputFormat::Plain)).unwrap();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(
        lines,
        vec![
            "├── 📁 Archive (0 items)",
            "├── 📁 Orphan (1 item)",
            "├── 📁 Work (1 item)",
            "└── 📁 work (2 items)",
            "    └── 📁 Rust (5 items)",
            "        └── 📁 async (1 item)",
        ]
    );
}

#[test]
fn test_table_tree_contains_art() {
    let forest = build_tree(&roots(), &children());
    let rendered = render_tree_output(&forest, &OutputOptions::new(OutputFormat::Table)).unwrap();
    assert!(rendered.contains("└── 📁 work"));
    assert!(rendered.contains("Count"));
}

#[test]
fn test_quiet_tree_lists_ids_depth_first() {
    let forest = build_tree(&roots(), &children());
    let mut buf = Vec::new();
    output_tree(&mut buf, &forest, &OutputOptions::new(OutputFormat::Plain).quiet(true)).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "2\n12\n3\n1\n10\n11\n");
}

#[test]
fn test_cycle_does_not_hang() {
    let items = vec![
        TreeItem::new(1, "A", 0).with_parent(2),
        TreeItem::new(2, "B", 0).with_parent(1),
    ];
    let forest = build_tree(&[], &items);
    let rows = flatten_tree_to_data(&forest);
    let mut ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    ids.sort();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_empty_forest() {
    let rendered = render_tree_output(&[], &OutputOptions::new(OutputFormat::Plain)).unwrap();
    assert_eq!(rendered, "No results");
    let rendered = render_tree_output(&[], &OutputOptions::new(OutputFormat::Json)).unwrap();
    assert_eq!(rendered, "[]");
}

//! Flattened tree rows for machine formats (json, tsv, quiet).

use crate::output::columns::ColumnConfig;
use crate::tree::TreeNode;
use serde::Serialize;

/// One node in depth-first, title-sorted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatTreeRow {
    pub title: String,
    pub id: i64,
    pub count: u64,
    pub parent_id: Option<i64>,
    /// 0-based nesting level
    pub depth: usize,
}

pub fn flatten_tree_to_data(forest: &[TreeNode]) -> Vec<FlatTreeRow> {
    let mut rows = Vec::new();
    let mut pending: Vec<(&TreeNode, usize)> = forest.iter().rev().map(|node| (node, 0)).collect();
    while let Some((node, depth)) = pending.pop() {
        rows.push(FlatTreeRow {
            title: node.item.title.clone(),
            id: node.item.id,
            count: node.item.count,
            parent_id: node.item.parent_id,
            depth,
        });
        pending.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
    }
    rows
}

/// Columns for the tsv rendering of flattened rows.
pub fn flat_tree_columns() -> Vec<ColumnConfig> {
    vec![
        ColumnConfig::new("title", "title"),
        ColumnConfig::new("id", "id"),
        ColumnConfig::new("count", "count"),
        ColumnConfig::new("parentId", "parentId"),
        ColumnConfig::new("depth", "depth"),
    ]
}

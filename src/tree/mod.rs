//! Collection Tree
//!
//! Builds a forest from the flat root and child collection lists returned by the
//! API, and renders it as connector art, a table, or flattened rows.

pub mod builder;
pub mod flatten;
pub mod render;

use crate::output::value::get_nested_value;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use builder::{build_tree, collation_key};
pub use flatten::{flatten_tree_to_data, FlatTreeRow};
pub use render::{format_item_count, render_tree_table, render_tree_terminal, DEFAULT_FOLDER_ICON};

/// One collection as the tree sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeItem {
    pub id: i64,
    pub title: String,
    pub count: u64,
    /// Parent reference; may point at an id that is not in the input set
    pub parent_id: Option<i64>,
}

impl TreeItem {
    pub fn new(id: i64, title: impl Into<String>, count: u64) -> Self {
        Self {
            id,
            title: title.into(),
            count,
            parent_id: None,
        }
    }

    pub fn with_parent(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Read a collection record: `_id` (or `id`), `title`, `count`, and
    /// `parent.$id` (or `parentId`). Returns `None` without a numeric id.
    pub fn from_record(record: &Value) -> Option<Self> {
        let id = get_nested_value(record, "_id")
            .or_else(|| get_nested_value(record, "id"))
            .and_then(Value::as_i64)?;
        let title = get_nested_value(record, "title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let count = get_nested_value(record, "count")
            .and_then(Value::as_u64)
            .unwrap_or(0);
        let parent_id = get_nested_value(record, "parent.$id")
            .or_else(|| get_nested_value(record, "parentId"))
            .and_then(Value::as_i64);
        Some(Self {
            id,
            title,
            count,
            parent_id,
        })
    }
}

/// A tree item and its title-sorted children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub item: TreeItem,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn leaf(item: TreeItem) -> Self {
        Self {
            item,
            children: Vec::new(),
        }
    }
}

// Deep chains would overflow the stack with the default recursive drop.
impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

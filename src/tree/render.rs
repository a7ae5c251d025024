//! Connector-art rendering for collection forests.

use crate::output::plain::NO_RESULTS;
use crate::output::style::Style;
use crate::output::table::{header_cell, new_table};
use crate::tree::TreeNode;
use comfy_table::Cell;

pub const DEFAULT_FOLDER_ICON: &str = "📁";

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// `1 item`, `N items`.
pub fn format_item_count(count: u64) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{} items", count)
    }
}

/// Depth-first walk handing each node its connector prefix (e.g. `│   └── `).
fn walk<F>(nodes: &[TreeNode], visit: &mut F)
where
    F: FnMut(&TreeNode, &str),
{
    let mut pending: Vec<(&TreeNode, String, bool)> = Vec::new();
    push_siblings(&mut pending, nodes, "");
    while let Some((node, prefix, last)) = pending.pop() {
        let branch = format!("{}{}", prefix, if last { LAST_BRANCH } else { BRANCH });
        visit(node, &branch);
        let child_prefix = format!("{}{}", prefix, if last { SPACE } else { PIPE });
        push_siblings(&mut pending, &node.children, &child_prefix);
    }
}

/// Push in reverse so the first sibling pops first.
fn push_siblings<'a>(pending: &mut Vec<(&'a TreeNode, String, bool)>, nodes: &'a [TreeNode], prefix: &str) {
    let count = nodes.len();
    for (index, node) in nodes.iter().enumerate().rev() {
        pending.push((node, prefix.to_string(), index + 1 == count));
    }
}

/// One line per node: `├── 📁 Title (3 items)`.
pub fn render_tree_terminal(forest: &[TreeNode], icon: Option<&str>, style: Style) -> String {
    if forest.is_empty() {
        return style.dim(NO_RESULTS);
    }
    let icon = icon.unwrap_or(DEFAULT_FOLDER_ICON);
    let mut lines = Vec::new();
    walk(forest, &mut |node, branch| {
        lines.push(format!(
            "{}{} {} {}",
            style.dim(branch),
            icon,
            node.item.title,
            style.dim(&format!("({})", format_item_count(node.item.count)))
        ));
    });
    lines.join("\n")
}

/// Three-column table (name, id, count) with the connector art in the name cell.
pub fn render_tree_table(forest: &[TreeNode], icon: Option<&str>, style: Style) -> String {
    let icon = icon.unwrap_or(DEFAULT_FOLDER_ICON);
    let mut table = new_table(style);
    table.set_header(vec![header_cell("Name"), header_cell("ID"), header_cell("Count")]);
    walk(forest, &mut |node, branch| {
        table.add_row(vec![
            Cell::new(format!("{}{} {}", branch, icon, node.item.title)),
            Cell::new(node.item.id),
            Cell::new(format_item_count(node.item.count)),
        ]);
    });
    table.to_string()
}

//! Forest builder for collection hierarchies

use crate::tree::{TreeItem, TreeNode};
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument, warn};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Build a forest from root and child collection lists.
///
/// Items are deduplicated by id (later occurrences win). An item whose parent
/// is not in the input set becomes a root. Items caught in a parent cycle are
/// promoted to roots in ascending id order, so every item appears exactly once.
/// Siblings are sorted by [`collation_key`] at every level. Assembly uses an
/// explicit stack, so nesting depth is not limited by the call stack.
#[instrument(skip_all, fields(roots = root_items.len(), children = child_items.len()))]
pub fn build_tree(root_items: &[TreeItem], child_items: &[TreeItem]) -> Vec<TreeNode> {
    let mut items: HashMap<i64, TreeItem> = HashMap::new();
    for item in root_items.iter().chain(child_items) {
        items.insert(item.id, item.clone());
    }

    let mut children_of: HashMap<i64, Vec<i64>> = HashMap::new();
    let mut root_ids: Vec<i64> = Vec::new();
    for item in items.values() {
        match item.parent_id.filter(|parent| items.contains_key(parent)) {
            Some(parent) => children_of.entry(parent).or_default().push(item.id),
            None => root_ids.push(item.id),
        }
    }

    let mut visited: HashSet<i64> = HashSet::with_capacity(items.len());
    let mut forest: Vec<TreeNode> = root_ids
        .iter()
        .filter_map(|id| assemble(*id, &items, &children_of, &mut visited))
        .collect();

    // Whatever is left is only reachable through a parent cycle.
    let mut stranded: Vec<i64> = items
        .keys()
        .filter(|id| !visited.contains(id))
        .copied()
        .collect();
    stranded.sort_unstable();
    for id in stranded {
        if visited.contains(&id) {
            continue;
        }
        warn!(id, "Parent chain forms a cycle, promoting collection to root");
        if let Some(node) = assemble(id, &items, &children_of, &mut visited) {
            forest.push(node);
        }
    }

    sort_siblings(&mut forest);
    debug!(items = items.len(), roots = forest.len(), "Built collection tree");
    forest
}

/// Build the subtree under `root` from ids not yet visited.
fn assemble(
    root: i64,
    items: &HashMap<i64, TreeItem>,
    children_of: &HashMap<i64, Vec<i64>>,
    visited: &mut HashSet<i64>,
) -> Option<TreeNode> {
    if !items.contains_key(&root) || !visited.insert(root) {
        return None;
    }

    // Preorder: every id lands in `order` after its parent.
    let mut order = Vec::new();
    let mut pending = vec![root];
    while let Some(id) = pending.pop() {
        order.push(id);
        for child in children_of.get(&id).into_iter().flatten() {
            if visited.insert(*child) {
                pending.push(*child);
            }
        }
    }

    // Reverse preorder finishes every child before its parent.
    let mut built: HashMap<i64, TreeNode> = HashMap::with_capacity(order.len());
    for id in order.iter().rev() {
        let item = items.get(id)?.clone();
        let mut children: Vec<TreeNode> = children_of
            .get(id)
            .into_iter()
            .flatten()
            .filter_map(|child| built.remove(child))
            .collect();
        sort_siblings(&mut children);
        built.insert(*id, TreeNode { item, children });
    }
    built.remove(&root)
}

/// Locale-style sort key: canonical decomposition with combining marks
/// dropped, then lowercased, so `Éclair` files under `e`.
pub fn collation_key(title: &str) -> String {
    title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Folded title, then exact title, then id, so equal keys still sort
/// deterministically. Only the given list is sorted.
fn sort_siblings(nodes: &mut [TreeNode]) {
    nodes.sort_by_cached_key(|node| {
        (
            collation_key(&node.item.title),
            node.item.title.clone(),
            node.item.id,
        )
    });
}

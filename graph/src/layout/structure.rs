use crate::core::{NodeId, NodeStore};
use serde::Serialize;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A branch tip
    Branch,
    /// An unlabeled branch point or root
    Commit,
}

/// A node in the condensed tree: only branch points, roots and labeled tips
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeEntry {
    /// Branch name, or short commit ID for unlabeled nodes
    pub label: String,
    pub commit: String,
    pub kind: EntryKind,
    /// Unlabeled single-child commits folded into this entry
    pub skipped: usize,
    pub children: Vec<TreeEntry>,
    #[serde(skip)]
    pub node: NodeId,
}

/// Follow single-child, unlabeled links down to the next node worth showing
pub fn collapse(store: &NodeStore, start: NodeId) -> (NodeId, usize) {
    let mut node = start;
    let mut skipped = 0;
    while !store.get(node).is_significant() {
        node = store.get(node).children()[0];
        skipped += 1;
    }
    (node, skipped)
}

/// Condensed nested-list view of everything below `start`.
///
/// Built breadth-first into a flat list and then folded into a tree, so
/// deeply nested branching does not recurse.
pub fn export_tree(store: &NodeStore, start: NodeId) -> TreeEntry {
    let mut root = entry_for(store, start);
    // Flat list of descendants; `None` as parent means the root
    let mut entries: Vec<(TreeEntry, Option<usize>)> = Vec::new();
    let mut queue: VecDeque<(NodeId, Option<usize>)> = store
        .get(root.node)
        .children()
        .iter()
        .map(|&child| (child, None))
        .collect();

    while let Some((first, parent)) = queue.pop_front() {
        let entry = entry_for(store, first);
        let idx = entries.len();
        queue.extend(
            store
                .get(entry.node)
                .children()
                .iter()
                .map(|&child| (child, Some(idx))),
        );
        entries.push((entry, parent));
    }

    // Children always sit after their parent, so folding from the back sees
    // every child before its parent. They arrive last-first.
    while let Some((mut entry, parent)) = entries.pop() {
        entry.children.reverse();
        match parent {
            Some(parent) => entries[parent].0.children.push(entry),
            None => root.children.push(entry),
        }
    }
    root.children.reverse();
    root
}

fn entry_for(store: &NodeStore, first: NodeId) -> TreeEntry {
    let (id, skipped) = collapse(store, first);
    let node = store.get(id);
    TreeEntry {
        label: node.display_name().to_string(),
        commit: node.id().to_string(),
        kind: if node.is_labeled() {
            EntryKind::Branch
        } else {
            EntryKind::Commit
        },
        skipped,
        children: Vec::new(),
        node: id,
    }
}

impl TreeEntry {
    /// Number of entries in this subtree, including this one
    pub fn entry_count(&self) -> usize {
        1 + self.children.iter().map(TreeEntry::entry_count).sum::<usize>()
    }

    /// Labels of all branch entries, depth-first
    pub fn branch_labels(&self) -> Vec<&str> {
        let mut labels = Vec::new();
        let mut stack = vec![self];
        while let Some(entry) = stack.pop() {
            if entry.kind == EntryKind::Branch {
                labels.push(entry.label.as_str());
            }
            stack.extend(entry.children.iter().rev());
        }
        labels
    }
}

use super::error::{GraphError, Result};
use super::node::{Node, NodeId};
use crate::source::Commit;
use std::collections::HashMap;

/// Outcome of linking a child to its first parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    /// The parent was new; keep walking from it
    Linked(NodeId),
    /// The parent was already known; the walk has met earlier history
    Converged(NodeId),
}

impl Link {
    pub fn node(self) -> NodeId {
        match self {
            Link::Linked(id) | Link::Converged(id) => id,
        }
    }
}

/// Position in the store to roll back to if a walk fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreMark(usize);

/// Deduplicating registry of commit nodes, keyed by commit ID
#[derive(Debug, Clone, Default)]
pub struct NodeStore {
    nodes: Vec<Node>,
    index: HashMap<String, NodeId>,
    pub(crate) root: Option<NodeId>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Find the node for a commit ID
    pub fn lookup(&self, commit_id: &str) -> Option<NodeId> {
        self.index.get(commit_id).copied()
    }

    pub fn contains(&self, commit_id: &str) -> bool {
        self.index.contains_key(commit_id)
    }

    /// The unique parentless node, recorded once depths are computed
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// All nodes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(idx, node)| (NodeId(idx), node))
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Return the existing node for this commit or register a new, unlinked one
    pub fn add_if_absent(&mut self, commit: Commit) -> NodeId {
        match self.lookup(&commit.id) {
            Some(id) => id,
            None => self.push(commit),
        }
    }

    /// Register a brand-new node, failing if the commit is already present
    pub fn insert(&mut self, commit: Commit) -> Result<NodeId> {
        if self.contains(&commit.id) {
            return Err(GraphError::DuplicateCommit(commit.id));
        }
        Ok(self.push(commit))
    }

    fn push(&mut self, commit: Commit) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.index.insert(commit.id.clone(), id);
        self.nodes.push(Node::new(commit));
        id
    }

    /// Attach `child` to the commit `parent_id`.
    ///
    /// If the parent is already registered the child is wired to it and
    /// [`Link::Converged`] is returned without calling `fetch`. Otherwise the
    /// parent commit is fetched, registered, wired both ways, and returned as
    /// [`Link::Linked`]. `child` must not have a parent yet.
    pub fn link_as_parent<F>(&mut self, child: NodeId, parent_id: &str, fetch: F) -> Result<Link>
    where
        F: FnOnce(&str) -> Result<Commit>,
    {
        debug_assert!(self.get(child).parent.is_none(), "child already has a parent");

        if let Some(parent) = self.lookup(parent_id) {
            self.wire(child, parent);
            return Ok(Link::Converged(parent));
        }

        let commit = fetch(parent_id)?;
        let parent = self.insert(commit)?;
        self.wire(child, parent);
        Ok(Link::Linked(parent))
    }

    fn wire(&mut self, child: NodeId, parent: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Attach a branch name, returning the label it replaced
    pub fn set_label(&mut self, id: NodeId, label: impl Into<String>) -> Option<String> {
        self.nodes[id.0].label.replace(label.into())
    }

    pub fn mark(&self) -> StoreMark {
        StoreMark(self.nodes.len())
    }

    /// Drop every node registered after `mark` along with links into them
    pub fn rollback(&mut self, mark: StoreMark) {
        if mark.0 >= self.nodes.len() {
            return;
        }
        for node in self.nodes.drain(mark.0..) {
            self.index.remove(&node.commit.id);
        }
        for node in &mut self.nodes {
            if node.parent.is_some_and(|p| p.0 >= mark.0) {
                node.parent = None;
            }
            node.children.retain(|c| c.0 < mark.0);
        }
        if self.root.is_some_and(|r| r.0 >= mark.0) {
            self.root = None;
        }
    }

    /// Labeled nodes in insertion order
    pub fn labeled(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.iter().filter(|(_, node)| node.is_labeled())
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            total_commits: self.nodes.len(),
            branch_tips: self.nodes.iter().filter(|n| n.is_labeled()).count(),
            branch_points: self.nodes.iter().filter(|n| n.children.len() > 1).count(),
            leaves: self.nodes.iter().filter(|n| n.children.is_empty()).count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    pub total_commits: usize,
    pub branch_tips: usize,
    pub branch_points: usize,
    pub leaves: usize,
}

use crate::source::Commit;
use smallvec::SmallVec;

/// Index of a node inside a [`NodeStore`](super::NodeStore)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// A commit positioned in the reconstructed first-parent tree
#[derive(Debug, Clone)]
pub struct Node {
    /// Commit metadata from the backend
    pub commit: Commit,
    /// Branch name, set only on branch tips
    pub(crate) label: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: SmallVec<[NodeId; 2]>,
    pub(crate) depth: Option<usize>,
}

impl Node {
    pub(crate) fn new(commit: Commit) -> Self {
        Self {
            commit,
            label: None,
            parent: None,
            children: SmallVec::new(),
            depth: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.commit.id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn is_labeled(&self) -> bool {
        self.label.is_some()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Distance from the root; `None` until depths have been computed
    pub fn depth(&self) -> Option<usize> {
        self.depth
    }

    /// Branch name for tips, short commit ID otherwise
    pub fn display_name(&self) -> &str {
        match &self.label {
            Some(label) => label,
            None => self.commit.short_id(),
        }
    }

    /// A node worth showing: a labeled tip or anything but a single-child link
    pub fn is_significant(&self) -> bool {
        self.label.is_some() || self.children.len() != 1
    }
}

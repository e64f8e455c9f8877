//! First-parent branch tree reconstruction and rendering.
//!
//! Branch tips are walked back along first parents into a deduplicated
//! [`NodeStore`]. Once depths are computed the tree can be laid out as
//! aligned text rows, condensed into a nested list, or summarised per branch
//! as the set of files changed since the branch diverged.

pub mod source;
pub mod core;
pub mod git_backend;
pub mod layout;
pub mod render;
pub mod export;
pub mod query;

#[cfg(test)]
pub(crate) mod testing;

pub use source::{Commit, CommitSource, SourceError};
pub use crate::core::{
    compute_depths, display_root, BuildReport, GraphBuilder, GraphError, Link, Node, NodeId,
    NodeStore, SkippedBranch, StoreStats,
};
pub use git_backend::GitWalker;
pub use layout::{export_tree, EntryKind, Row, RowLayout, TreeEntry};
pub use render::{AsciiRenderer, RenderConfig};
pub use export::{branch_changes, changes_since, BranchChanges};
pub use query::{common_ancestor, path_between};

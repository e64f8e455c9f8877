use crate::core::{GraphError, NodeId, NodeStore, Result};
use crate::source::CommitSource;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;

/// Files touched on a branch since it split from its divergence point
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchChanges {
    pub branch: String,
    pub tip: String,
    pub tip_time: DateTime<Utc>,
    /// Display name of the divergence point; `None` when the tip is the root
    pub origin: Option<String>,
    pub origin_commit: Option<String>,
    pub origin_time: Option<DateTime<Utc>>,
    /// Commits between origin (exclusive) and tip (inclusive)
    pub commit_count: usize,
    pub files: BTreeSet<String>,
    #[serde(skip)]
    pub node: NodeId,
    #[serde(skip)]
    pub origin_node: Option<NodeId>,
}

/// Union of files changed from `node` back to its divergence point.
///
/// Walks up from the parent through unlabeled, single-child ancestors and
/// stops at the first one that branches, carries a label, or is the root.
/// Straight-line history collapses into one summary.
pub fn changes_since<S>(store: &NodeStore, node: NodeId, source: &S) -> Result<BranchChanges>
where
    S: CommitSource + ?Sized,
{
    let tip = store.get(node);
    let wrap = |source| GraphError::Source {
        branch: tip.display_name().to_string(),
        source,
    };

    let mut files: BTreeSet<String> = source.changed_files(tip.id()).map_err(wrap)?.into_iter().collect();
    let mut commit_count = 1;
    let mut origin = tip.parent();

    while let Some(id) = origin {
        let ancestor = store.get(id);
        let Some(parent) = ancestor.parent() else {
            break;
        };
        if ancestor.is_significant() {
            break;
        }
        files.extend(source.changed_files(ancestor.id()).map_err(wrap)?);
        commit_count += 1;
        origin = Some(parent);
    }

    let origin_node = origin.map(|id| store.get(id));
    Ok(BranchChanges {
        branch: tip.display_name().to_string(),
        tip: tip.id().to_string(),
        tip_time: tip.commit.timestamp,
        origin: origin_node.map(|n| n.display_name().to_string()),
        origin_commit: origin_node.map(|n| n.id().to_string()),
        origin_time: origin_node.map(|n| n.commit.timestamp),
        commit_count,
        files,
        node,
        origin_node: origin,
    })
}

/// Change summaries for every labeled node below `start`, in preorder.
///
/// A backend failure for one branch does not stop the others.
pub fn branch_changes<S>(store: &NodeStore, start: NodeId, source: &S) -> Vec<Result<BranchChanges>>
where
    S: CommitSource + ?Sized,
{
    let mut summaries = Vec::new();
    let mut stack = vec![start];
    while let Some(id) = stack.pop() {
        let node = store.get(id);
        if node.is_labeled() {
            summaries.push(changes_since(store, id, source));
        }
        stack.extend(node.children().iter().rev());
    }
    summaries
}

use crate::core::{NodeId, NodeStore};

/// Nearest node that is an ancestor of (or equal to) both `a` and `b`.
///
/// Needs depths; the deeper side steps up until both are level, then both
/// step together until they meet. Returns `None` if depths are missing or
/// the two nodes share no history.
pub fn common_ancestor(store: &NodeStore, a: NodeId, b: NodeId) -> Option<NodeId> {
    let (mut a, mut b) = (a, b);
    let mut depth_a = store.get(a).depth()?;
    let mut depth_b = store.get(b).depth()?;

    while depth_a > depth_b {
        a = store.get(a).parent()?;
        depth_a -= 1;
    }
    while depth_b > depth_a {
        b = store.get(b).parent()?;
        depth_b -= 1;
    }
    while a != b {
        a = store.get(a).parent()?;
        b = store.get(b).parent()?;
    }
    Some(a)
}

/// Nodes after `ancestor` up to and including `tip`, oldest first.
///
/// Empty when `tip` is `ancestor`; `None` when `ancestor` is not on the
/// path from `tip` to the root.
pub fn path_between(store: &NodeStore, ancestor: NodeId, tip: NodeId) -> Option<Vec<NodeId>> {
    let mut path = Vec::new();
    let mut current = tip;
    while current != ancestor {
        path.push(current);
        current = store.get(current).parent()?;
    }
    path.reverse();
    Some(path)
}

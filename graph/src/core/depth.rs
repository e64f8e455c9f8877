use super::error::{GraphError, Result};
use super::node::NodeId;
use super::store::NodeStore;

/// Assign every node its distance from the root and record the root.
///
/// Walks each uncomputed node up to the first ancestor with a known depth
/// (or the root) using an explicit stack, then fills depths on the way back
/// down. Long first-parent chains cost heap, not call stack.
pub fn compute_depths(store: &mut NodeStore) -> Result<NodeId> {
    if store.is_empty() {
        return Err(GraphError::EmptyGraph);
    }

    let mut pending: Vec<NodeId> = Vec::new();
    for start in store.ids().collect::<Vec<_>>() {
        if store.get(start).depth().is_some() {
            continue;
        }

        let mut current = start;
        let mut base = loop {
            let node = store.get(current);
            if let Some(depth) = node.depth() {
                break depth;
            }
            match node.parent() {
                Some(parent) => {
                    pending.push(current);
                    if pending.len() > store.len() {
                        return Err(GraphError::Cycle(node.id().to_string()));
                    }
                    current = parent;
                }
                None => {
                    record_root(store, current)?;
                    store.get_mut(current).depth = Some(0);
                    break 0;
                }
            }
        };

        while let Some(id) = pending.pop() {
            base += 1;
            store.get_mut(id).depth = Some(base);
        }
    }

    store.root.ok_or(GraphError::EmptyGraph)
}

fn record_root(store: &mut NodeStore, candidate: NodeId) -> Result<()> {
    match store.root {
        Some(existing) if existing != candidate => Err(GraphError::MultipleRoots {
            first: store.get(existing).id().to_string(),
            second: store.get(candidate).id().to_string(),
        }),
        _ => {
            store.root = Some(candidate);
            Ok(())
        }
    }
}

/// The first node below the root that does not have exactly one child.
///
/// The straight run of history before anything diverges is skipped.
pub fn display_root(store: &NodeStore, root: NodeId) -> NodeId {
    let mut lca = root;
    while let [only] = store.get(lca).children() {
        lca = *only;
    }
    lca
}

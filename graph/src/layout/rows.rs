use crate::core::{NodeId, NodeStore};

/// A column in a layout row; `None` holds the place of a finished branch
pub type Slot = Option<NodeId>;

/// How a slot of the next row hangs off the row above it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joint {
    /// Directly below its parent's column
    Under,
    /// Pushed right by branching to its left
    Shifted,
    /// Placeholder for a branch that ended
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectorEntry {
    pub joint: Joint,
    /// An earlier sibling from the same parent sits to the left
    pub sibling_before: bool,
    /// A later sibling from the same parent follows to the right
    pub sibling_after: bool,
}

/// Artwork linking a row to the one below it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connector {
    pub entries: Vec<ConnectorEntry>,
    /// Extra columns opened by branching in this row
    pub spread: usize,
}

/// One level of the breadth-first layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub slots: Vec<Slot>,
    /// Present when some node in this row branched
    pub connector: Option<Connector>,
}

/// Drop trailing placeholders; an all-`None` row becomes empty
pub fn trim_trailing(slots: &mut Vec<Slot>) {
    while matches!(slots.last(), Some(None)) {
        slots.pop();
    }
}

/// Next level of the layout plus the connector describing how it attaches
pub fn next_row(store: &NodeStore, slots: &[Slot]) -> (Vec<Slot>, Connector) {
    let mut next = Vec::with_capacity(slots.len());
    let mut entries = Vec::with_capacity(slots.len());
    let mut spread = 0;

    for slot in slots {
        let children = slot.map(|id| store.get(id).children()).unwrap_or_default();
        if children.is_empty() {
            next.push(None);
            entries.push(ConnectorEntry {
                joint: Joint::Closed,
                sibling_before: false,
                sibling_after: false,
            });
            continue;
        }

        let last = children.len() - 1;
        for (idx, &child) in children.iter().enumerate() {
            next.push(Some(child));
            entries.push(ConnectorEntry {
                joint: if spread == 0 && idx == 0 {
                    Joint::Under
                } else {
                    Joint::Shifted
                },
                sibling_before: idx > 0,
                sibling_after: idx < last,
            });
        }
        spread += last;
    }

    (next, Connector { entries, spread })
}

/// Breadth-first, level-by-level layout of the tree below `start`
pub struct RowLayout<'a> {
    store: &'a NodeStore,
    current: Vec<Slot>,
}

impl<'a> RowLayout<'a> {
    pub fn new(store: &'a NodeStore, start: NodeId) -> Self {
        Self {
            store,
            current: vec![Some(start)],
        }
    }
}

impl Iterator for RowLayout<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        if self.current.is_empty() {
            return None;
        }

        let (mut next, mut connector) = next_row(self.store, &self.current);
        trim_trailing(&mut next);
        connector.entries.truncate(next.len());

        let slots = std::mem::replace(&mut self.current, next);
        Some(Row {
            slots,
            connector: (connector.spread > 0).then_some(connector),
        })
    }
}

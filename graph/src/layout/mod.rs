pub mod rows;
pub mod structure;

pub use rows::{next_row, trim_trailing, Connector, ConnectorEntry, Joint, Row, RowLayout, Slot};
pub use structure::{collapse, export_tree, EntryKind, TreeEntry};

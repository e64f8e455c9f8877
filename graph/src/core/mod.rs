pub mod node;
pub mod store;
pub mod error;
pub mod builder;
pub mod depth;

pub use node::{Node, NodeId};
pub use store::{Link, NodeStore, StoreMark, StoreStats};
pub use error::{GraphError, Result};
pub use builder::{BuildReport, GraphBuilder, SkippedBranch};
pub use depth::{compute_depths, display_root};

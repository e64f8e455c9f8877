pub mod changes;

pub use changes::{branch_changes, changes_since, BranchChanges};

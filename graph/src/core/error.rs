use crate::source::SourceError;
use thiserror::Error;

pub type Result<T, E = GraphError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum GraphError {
    /// A requested branch name did not resolve. Reported and skipped.
    #[error("{0} is not a known branch")]
    UnknownBranch(String),

    /// The backend failed while walking a branch. Reported and skipped.
    #[error("failed to walk branch {branch}: {source}")]
    Source {
        branch: String,
        #[source]
        source: SourceError,
    },

    /// A commit was inserted as new twice; the builder is broken
    #[error("commit {0} is already in the node store")]
    DuplicateCommit(String),

    /// The supplied branches do not share a common history
    #[error("more than one root: {first} and {second} have no parent")]
    MultipleRoots { first: String, second: String },

    #[error("parent links form a cycle through {0}")]
    Cycle(String),

    #[error("no branches were included in the graph")]
    EmptyGraph,
}

impl GraphError {
    /// Whether the run can carry on with the remaining branches
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GraphError::UnknownBranch(_) | GraphError::Source { .. })
    }
}

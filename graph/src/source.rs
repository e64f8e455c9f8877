use chrono::{DateTime, Utc};
use thiserror::Error;

/// A commit as reported by the version-control backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Unique commit ID (hex SHA)
    pub id: String,
    /// Parent commit IDs, first parent first
    pub parents: Vec<String>,
    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
    /// Author name
    pub author: String,
    /// First line of the commit message
    pub summary: String,
}

impl Commit {
    pub fn new(
        id: String,
        parents: Vec<String>,
        timestamp: DateTime<Utc>,
        author: String,
        summary: String,
    ) -> Self {
        Self {
            id,
            parents,
            timestamp,
            author,
            summary,
        }
    }

    /// Abbreviated commit ID used as a display label
    pub fn short_id(&self) -> &str {
        let end = self
            .id
            .char_indices()
            .nth(8)
            .map(|(idx, _)| idx)
            .unwrap_or(self.id.len());
        &self.id[..end]
    }

    /// First listed parent, if any
    pub fn first_parent(&self) -> Option<&str> {
        self.parents.first().map(String::as_str)
    }

    /// Check if this is a root commit (no parents)
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{0} is not a known branch")]
    UnknownBranch(String),
    #[error("commit {0} not found")]
    MissingCommit(String),
    #[error("backend error: {0}")]
    Backend(String),
}

impl From<git2::Error> for SourceError {
    fn from(err: git2::Error) -> Self {
        SourceError::Backend(err.message().to_string())
    }
}

/// Read access to branches and commits of a repository.
///
/// The graph engine only ever talks to history through this trait, so it can
/// be driven by a real repository or by an in-memory fixture.
pub trait CommitSource {
    /// Names of all local branches, plus remote-tracking branches when asked
    fn branch_names(&self, include_remote: bool) -> Result<Vec<String>, SourceError>;

    /// Resolve a branch name to its tip commit
    fn resolve_branch(&self, name: &str) -> Result<Commit, SourceError>;

    /// Look up a commit by ID
    fn commit(&self, id: &str) -> Result<Commit, SourceError>;

    /// Paths touched by a commit relative to its first parent
    fn changed_files(&self, id: &str) -> Result<Vec<String>, SourceError>;
}

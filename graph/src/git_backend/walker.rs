use crate::source::{Commit, CommitSource, SourceError};
use chrono::{TimeZone, Utc};
use git2::{BranchType, ErrorCode, Oid, Repository};
use std::path::Path;
use tracing::debug;

/// [`CommitSource`] backed by a git repository on disk
pub struct GitWalker {
    repo: Repository,
}

impl GitWalker {
    /// Open the repository containing `path`, searching upward through parent directories
    pub fn discover(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let repo = Repository::discover(path.as_ref())?;
        if repo.is_bare() {
            return Err(SourceError::Backend(format!(
                "{} is a bare repository",
                repo.path().display()
            )));
        }
        debug!("Opened repository at {}", repo.path().display());
        Ok(Self { repo })
    }

    /// Top of the working tree
    pub fn workdir(&self) -> &Path {
        self.repo.workdir().unwrap_or_else(|| self.repo.path())
    }

    fn find_commit(&self, id: &str) -> Result<git2::Commit<'_>, SourceError> {
        let oid = Oid::from_str(id).map_err(|_| SourceError::MissingCommit(id.to_string()))?;
        self.repo.find_commit(oid).map_err(|err| match err.code() {
            ErrorCode::NotFound => SourceError::MissingCommit(id.to_string()),
            _ => err.into(),
        })
    }

    /// Convert a git2::Commit to a backend-neutral Commit
    fn convert(commit: &git2::Commit) -> Result<Commit, SourceError> {
        let id = commit.id().to_string();
        let parents: Vec<String> = commit.parent_ids().map(|oid| oid.to_string()).collect();

        let timestamp = Utc
            .timestamp_opt(commit.time().seconds(), 0)
            .single()
            .ok_or_else(|| SourceError::Backend(format!("invalid timestamp on commit {id}")))?;

        let author = commit.author().name().unwrap_or("Unknown").to_string();
        let summary = commit.summary().unwrap_or("").to_string();

        Ok(Commit::new(id, parents, timestamp, author, summary))
    }
}

impl CommitSource for GitWalker {
    fn branch_names(&self, include_remote: bool) -> Result<Vec<String>, SourceError> {
        let filter = if include_remote {
            None
        } else {
            Some(BranchType::Local)
        };

        let mut names = Vec::new();
        for branch in self.repo.branches(filter)? {
            let (branch, _) = branch?;
            // origin/HEAD is a symbolic alias of another remote branch
            if branch.get().symbolic_target().is_some() {
                continue;
            }
            if let Some(name) = branch.name()? {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    fn resolve_branch(&self, name: &str) -> Result<Commit, SourceError> {
        let branch = self
            .repo
            .find_branch(name, BranchType::Local)
            .or_else(|_| self.repo.find_branch(name, BranchType::Remote))
            .map_err(|err| match err.code() {
                ErrorCode::NotFound => SourceError::UnknownBranch(name.to_string()),
                _ => err.into(),
            })?;
        let commit = branch.get().peel_to_commit()?;
        Self::convert(&commit)
    }

    fn commit(&self, id: &str) -> Result<Commit, SourceError> {
        Self::convert(&self.find_commit(id)?)
    }

    fn changed_files(&self, id: &str) -> Result<Vec<String>, SourceError> {
        let commit = self.find_commit(id)?;
        let tree = commit.tree()?;
        let parent_tree = if commit.parent_count() > 0 {
            Some(commit.parent(0)?.tree()?)
        } else {
            None
        };

        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?;
        let files = diff
            .deltas()
            .filter_map(|delta| delta.new_file().path().or_else(|| delta.old_file().path()))
            .map(|path| path.to_string_lossy().into_owned())
            .collect();
        Ok(files)
    }
}

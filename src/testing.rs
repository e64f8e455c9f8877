//! Fixed in-memory history for command tests.

use chrono::{TimeZone, Utc};
use graph::{Commit, CommitSource, SourceError};
use std::collections::HashMap;

/// Every commit touches `<id>.txt` and shares one author; timestamps default
/// to 2023-11-15 12:00 UTC
pub struct FixedSource {
    commits: HashMap<String, Commit>,
    branches: Vec<(String, String)>,
}

impl FixedSource {
    pub fn new(history: &[(&str, Option<&str>)], branches: &[(&str, &str)]) -> Self {
        let commits = history
            .iter()
            .map(|(id, parent)| {
                let commit = Commit::new(
                    id.to_string(),
                    parent.iter().map(|p| p.to_string()).collect(),
                    Utc.timestamp_opt(1_700_049_600, 0).single().unwrap(),
                    "A Very Long Author Name".to_string(),
                    format!("work on {id}"),
                );
                (id.to_string(), commit)
            })
            .collect();
        let branches = branches
            .iter()
            .map(|(name, tip)| (name.to_string(), tip.to_string()))
            .collect();
        Self { commits, branches }
    }

    /// Move one commit to another point in time
    pub fn at(mut self, id: &str, seconds: i64) -> Self {
        if let Some(commit) = self.commits.get_mut(id) {
            commit.timestamp = Utc.timestamp_opt(seconds, 0).single().unwrap();
        }
        self
    }
}

impl CommitSource for FixedSource {
    fn branch_names(&self, _include_remote: bool) -> Result<Vec<String>, SourceError> {
        Ok(self.branches.iter().map(|(name, _)| name.clone()).collect())
    }

    fn resolve_branch(&self, name: &str) -> Result<Commit, SourceError> {
        let (_, tip) = self
            .branches
            .iter()
            .find(|(branch, _)| branch == name)
            .ok_or_else(|| SourceError::UnknownBranch(name.to_string()))?;
        self.commit(tip)
    }

    fn commit(&self, id: &str) -> Result<Commit, SourceError> {
        self.commits
            .get(id)
            .cloned()
            .ok_or_else(|| SourceError::MissingCommit(id.to_string()))
    }

    fn changed_files(&self, id: &str) -> Result<Vec<String>, SourceError> {
        Ok(vec![format!("{id}.txt")])
    }
}

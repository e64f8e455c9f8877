//! In-memory history fixtures for engine tests.

use crate::source::{Commit, CommitSource, SourceError};
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;

pub fn epoch(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0).single().unwrap()
}

pub fn commit(id: &str, parents: &[&str]) -> Commit {
    commit_at(id, parents, 0)
}

pub fn commit_at(id: &str, parents: &[&str], seconds: i64) -> Commit {
    Commit::new(
        id.to_string(),
        parents.iter().map(|p| p.to_string()).collect(),
        epoch(seconds),
        "Tester".to_string(),
        format!("commit {id}"),
    )
}

#[derive(Debug, Default)]
pub struct MemorySource {
    commits: HashMap<String, Commit>,
    files: HashMap<String, Vec<String>>,
    branches: Vec<(String, String)>,
    remotes: Vec<(String, String)>,
    broken: Vec<String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commit with a timestamp equal to its insertion order
    pub fn commit(mut self, id: &str, parents: &[&str]) -> Self {
        let seconds = self.commits.len() as i64;
        self.commits.insert(id.to_string(), commit_at(id, parents, seconds));
        self
    }

    pub fn commit_at(mut self, id: &str, parents: &[&str], seconds: i64) -> Self {
        self.commits.insert(id.to_string(), commit_at(id, parents, seconds));
        self
    }

    pub fn files(mut self, id: &str, files: &[&str]) -> Self {
        self.files
            .insert(id.to_string(), files.iter().map(|f| f.to_string()).collect());
        self
    }

    pub fn branch(mut self, name: &str, tip: &str) -> Self {
        self.branches.push((name.to_string(), tip.to_string()));
        self
    }

    pub fn remote(mut self, name: &str, tip: &str) -> Self {
        self.remotes.push((name.to_string(), tip.to_string()));
        self
    }

    /// Make lookups of this commit fail as a backend error
    pub fn broken(mut self, id: &str) -> Self {
        self.broken.push(id.to_string());
        self
    }

    /// A linear history `c0 <- c1 <- ... <- c{len-1}`
    pub fn linear(len: usize) -> Self {
        let mut source = Self::new();
        for i in 0..len {
            let id = format!("c{i}");
            let parent = format!("c{}", i.wrapping_sub(1));
            let parents: Vec<&str> = if i == 0 { vec![] } else { vec![parent.as_str()] };
            source = source.commit(&id, &parents);
        }
        source
    }
}

impl CommitSource for MemorySource {
    fn branch_names(&self, include_remote: bool) -> Result<Vec<String>, SourceError> {
        let mut names: Vec<String> = self.branches.iter().map(|(n, _)| n.clone()).collect();
        if include_remote {
            names.extend(self.remotes.iter().map(|(n, _)| n.clone()));
        }
        Ok(names)
    }

    fn resolve_branch(&self, name: &str) -> Result<Commit, SourceError> {
        let tip = self
            .branches
            .iter()
            .chain(self.remotes.iter())
            .find(|(n, _)| n == name)
            .map(|(_, tip)| tip)
            .ok_or_else(|| SourceError::UnknownBranch(name.to_string()))?;
        self.commit(tip)
    }

    fn commit(&self, id: &str) -> Result<Commit, SourceError> {
        if self.broken.iter().any(|b| b == id) {
            return Err(SourceError::Backend(format!("object {id} is corrupt")));
        }
        self.commits
            .get(id)
            .cloned()
            .ok_or_else(|| SourceError::MissingCommit(id.to_string()))
    }

    fn changed_files(&self, id: &str) -> Result<Vec<String>, SourceError> {
        if !self.commits.contains_key(id) {
            return Err(SourceError::MissingCommit(id.to_string()));
        }
        Ok(self.files.get(id).cloned().unwrap_or_default())
    }
}

use super::error::{GraphError, Result};
use super::node::NodeId;
use super::store::{Link, NodeStore};
use crate::source::{Commit, CommitSource, SourceError};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// A branch left out because its tip is older than the cutoff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedBranch {
    pub name: String,
    pub tip_time: DateTime<Utc>,
}

/// What happened to each requested branch
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Branches walked into the store, in processing order
    pub included: Vec<String>,
    pub skipped: Vec<SkippedBranch>,
    /// Non-fatal per-branch errors
    pub failures: Vec<GraphError>,
}

/// Builder for the first-parent tree of a set of branches
pub struct GraphBuilder<'a, S: CommitSource + ?Sized> {
    source: &'a S,
    cutoff: Option<DateTime<Utc>>,
    include_remote: bool,
}

impl<'a, S: CommitSource + ?Sized> GraphBuilder<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            cutoff: None,
            include_remote: false,
        }
    }

    /// Skip branches whose tip commit is older than this
    pub fn cutoff(mut self, cutoff: Option<DateTime<Utc>>) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Include remote-tracking branches when no names are given
    pub fn include_remote(mut self, include: bool) -> Self {
        self.include_remote = include;
        self
    }

    /// Walk every named branch (all branches if `names` is empty) into a new store.
    ///
    /// Unknown branches and backend failures are recorded in the report and the
    /// remaining branches are still processed. Only invariant violations abort.
    pub fn build(&self, names: &[String]) -> Result<(NodeStore, BuildReport)> {
        let names = if names.is_empty() {
            self.source
                .branch_names(self.include_remote)
                .map_err(|source| GraphError::Source {
                    branch: "*".to_string(),
                    source,
                })?
        } else {
            names.to_vec()
        };
        debug!("Building graph from {} branches", names.len());

        let mut store = NodeStore::new();
        let mut report = BuildReport::default();

        for name in &names {
            let tip = match self.source.resolve_branch(name) {
                Ok(tip) => tip,
                Err(SourceError::UnknownBranch(_)) => {
                    debug!("{} not a known branch", name);
                    report.failures.push(GraphError::UnknownBranch(name.clone()));
                    continue;
                }
                Err(source) => {
                    debug!("Could not resolve {}: {}", name, source);
                    report.failures.push(GraphError::Source {
                        branch: name.clone(),
                        source,
                    });
                    continue;
                }
            };

            if self.cutoff.is_some_and(|cutoff| tip.timestamp < cutoff) {
                debug!("Skipping {}, tip is from {}", name, tip.timestamp);
                report.skipped.push(SkippedBranch {
                    name: name.clone(),
                    tip_time: tip.timestamp,
                });
                continue;
            }

            let mark = store.mark();
            match self.walk_branch(&mut store, tip, name) {
                Ok(tip_id) => {
                    if let Some(previous) = store.set_label(tip_id, name.as_str()) {
                        if previous != *name {
                            debug!("{} points at the same commit as {}, relabeling", name, previous);
                        }
                    }
                    info!("Including {}", name);
                    report.included.push(name.clone());
                }
                Err(err) if err.is_recoverable() => {
                    debug!("Dropping {}: {}", name, err);
                    store.rollback(mark);
                    report.failures.push(err);
                }
                Err(err) => return Err(err),
            }
        }

        debug!("Built graph: {:?}", store.stats());
        Ok((store, report))
    }

    /// Follow first parents from `tip` until reaching known history or a root
    fn walk_branch(&self, store: &mut NodeStore, tip: Commit, branch: &str) -> Result<NodeId> {
        let tip_id = store.add_if_absent(tip);
        if store.get(tip_id).parent().is_some() {
            debug!("  {} is already linked", branch);
            return Ok(tip_id);
        }

        let mut current = tip_id;
        while let Some(parent_id) = store.get(current).commit.first_parent().map(str::to_owned) {
            let fetch = |id: &str| {
                self.source.commit(id).map_err(|source| GraphError::Source {
                    branch: branch.to_string(),
                    source,
                })
            };
            match store.link_as_parent(current, &parent_id, fetch)? {
                Link::Linked(parent) => current = parent,
                Link::Converged(parent) => {
                    debug!(
                        "  {} converges at {}",
                        branch,
                        store.get(parent).commit.short_id()
                    );
                    break;
                }
            }
        }

        Ok(tip_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemorySource;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn main_and_feature() -> MemorySource {
        MemorySource::new()
            .commit("root", &[])
            .commit("a", &["root"])
            .commit("b", &["a"])
            .commit("c", &["a"])
            .branch("main", "b")
            .branch("feature", "c")
    }

    #[test]
    fn test_two_branches_share_ancestor() {
        let source = main_and_feature();
        let (store, report) = GraphBuilder::new(&source)
            .build(&names(&["main", "feature"]))
            .unwrap();

        assert_eq!(store.len(), 4);
        assert_eq!(report.included, names(&["main", "feature"]));
        assert!(report.failures.is_empty());

        let root = store.lookup("root").unwrap();
        let a = store.lookup("a").unwrap();
        let b = store.lookup("b").unwrap();
        let c = store.lookup("c").unwrap();
        assert_eq!(store.get(root).children(), &[a]);
        assert_eq!(store.get(a).children(), &[b, c]);
        assert_eq!(store.get(b).label(), Some("main"));
        assert_eq!(store.get(c).label(), Some("feature"));
        assert_eq!(store.get(a).label(), None);
    }

    #[test]
    fn test_empty_names_uses_all_branches() {
        let source = main_and_feature().remote("origin/main", "b");

        let (_, report) = GraphBuilder::new(&source).build(&[]).unwrap();
        assert_eq!(report.included, names(&["main", "feature"]));

        let (_, report) = GraphBuilder::new(&source)
            .include_remote(true)
            .build(&[])
            .unwrap();
        assert_eq!(report.included, names(&["main", "feature", "origin/main"]));
    }

    #[test]
    fn test_unknown_branch_is_reported_and_skipped() {
        let source = main_and_feature();
        let (store, report) = GraphBuilder::new(&source)
            .build(&names(&["main", "nope", "feature"]))
            .unwrap();

        assert_eq!(report.included, names(&["main", "feature"]));
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(&report.failures[0], GraphError::UnknownBranch(n) if n == "nope"));
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_tip_already_seen_as_ancestor() {
        // feature is a descendant of main, processed first
        let source = MemorySource::new()
            .commit("root", &[])
            .commit("a", &["root"])
            .commit("b", &["a"])
            .branch("main", "a")
            .branch("feature", "b");

        let (store, report) = GraphBuilder::new(&source)
            .build(&names(&["feature", "main"]))
            .unwrap();

        assert_eq!(report.included.len(), 2);
        assert_eq!(store.len(), 3);
        let a = store.lookup("a").unwrap();
        assert_eq!(store.get(a).label(), Some("main"));
        assert_eq!(store.get(a).children().len(), 1);
    }

    #[test]
    fn test_first_parent_only() {
        let source = MemorySource::new()
            .commit("root", &[])
            .commit("side", &["root"])
            .commit("m", &["root", "side"])
            .branch("main", "m");

        let (store, _) = GraphBuilder::new(&source).build(&names(&["main"])).unwrap();

        assert_eq!(store.len(), 2);
        assert!(!store.contains("side"));
    }

    #[test]
    fn test_cutoff_skips_old_branches() {
        let source = MemorySource::new()
            .commit_at("root", &[], 10)
            .commit_at("old", &["root"], 20)
            .commit_at("new", &["root"], 500)
            .branch("stale", "old")
            .branch("fresh", "new");

        let (store, report) = GraphBuilder::new(&source)
            .cutoff(Some(crate::testing::epoch(100)))
            .build(&[])
            .unwrap();

        assert_eq!(report.included, names(&["fresh"]));
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].name, "stale");
        assert!(!store.contains("old"));
    }

    #[test]
    fn test_failed_walk_is_rolled_back() {
        let source = MemorySource::new()
            .commit("root", &[])
            .commit("a", &["root"])
            .commit("x", &["root"])
            .commit("y", &["x"])
            .broken("x")
            .branch("main", "a")
            .branch("broken", "y");

        let (store, report) = GraphBuilder::new(&source)
            .build(&names(&["main", "broken"]))
            .unwrap();

        assert_eq!(report.included, names(&["main"]));
        assert!(matches!(
            &report.failures[0],
            GraphError::Source { branch, .. } if branch == "broken"
        ));
        assert!(!store.contains("y"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_no_duplicate_identities() {
        let source = MemorySource::new()
            .commit("root", &[])
            .commit("a", &["root"])
            .commit("b", &["a"])
            .commit("c", &["b"])
            .commit("d", &["a"])
            .commit("e", &["d"])
            .branch("one", "c")
            .branch("two", "e")
            .branch("three", "b")
            .branch("four", "root");

        let (store, _) = GraphBuilder::new(&source).build(&[]).unwrap();

        let mut ids: Vec<&str> = store.iter().map(|(_, n)| n.id()).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert_eq!(total, 6);
    }
}

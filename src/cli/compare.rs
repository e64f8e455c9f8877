//! Compare command - commits on two branches since their common ancestor

use super::open_repo;
use anyhow::{Context, Result};
use chrono::Local;
use graph::{common_ancestor, compute_depths, path_between, CommitSource, GraphBuilder};
use std::io::{self, Write};
use std::path::Path;

/// Run the compare command
pub fn run_compare(repodir: &Path, a: &str, b: &str, show_files: bool) -> Result<()> {
    let walker = open_repo(repodir)?;
    println!("Looking in {} between {a} and {b}", walker.workdir().display());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_comparison(&walker, a, b, show_files, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Print the common ancestor and, per branch, one line per commit since it.
///
/// Lines always show the commit summary; `show_files` adds the changed paths
/// under each commit instead of on the same line.
fn write_comparison<S, W>(source: &S, a: &str, b: &str, show_files: bool, out: &mut W) -> Result<()>
where
    S: CommitSource + ?Sized,
    W: Write,
{
    let names = vec![a.to_string(), b.to_string()];
    let (mut store, report) = GraphBuilder::new(source).build(&names)?;
    if let Some(failure) = report.failures.into_iter().next() {
        return Err(failure.into());
    }
    compute_depths(&mut store)?;

    let mut tips = Vec::with_capacity(names.len());
    for name in &names {
        let tip = source.resolve_branch(name)?;
        let node = store
            .lookup(&tip.id)
            .with_context(|| format!("{name} was not walked"))?;
        tips.push((name, node));
    }

    let ancestor = common_ancestor(&store, tips[0].1, tips[1].1)
        .with_context(|| format!("{a} and {b} share no history"))?;
    let lca = store.get(ancestor);
    writeln!(
        out,
        "LCA is at {}: {}",
        lca.depth().unwrap_or_default(),
        lca.commit.short_id()
    )?;

    for (name, tip) in tips {
        writeln!(out, "======== {name}")?;
        let path = path_between(&store, ancestor, tip)
            .with_context(|| format!("{name} does not descend from the common ancestor"))?;
        for id in path {
            let commit = &store.get(id).commit;
            writeln!(
                out,
                "{} {} {:<15.15} | {}",
                commit.timestamp.with_timezone(&Local).format("%Y-%m-%d"),
                commit.short_id(),
                commit.author,
                commit.summary
            )?;
            if show_files {
                for file in source.changed_files(&commit.id)? {
                    writeln!(out, "\t{file}")?;
                }
            }
        }
    }

    Ok(())
}

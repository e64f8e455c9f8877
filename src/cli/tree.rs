//! Default tree command - print the branch tree and optional exports

use super::{open_repo, parse_after};
use crate::html;
use crate::TreeArgs;
use anyhow::{Context, Result};
use chrono::Local;
use graph::{
    branch_changes, compute_depths, display_root, export_tree, AsciiRenderer, BranchChanges,
    CommitSource, GraphBuilder, NodeId, NodeStore, RenderConfig, TreeEntry,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Run the tree command (default when no subcommand given)
pub fn run_tree(repodir: &Path, args: &TreeArgs) -> Result<()> {
    let walker = open_repo(repodir)?;
    println!("Working on repo at: {}", walker.workdir().display());

    let stdout = io::stdout();
    let stderr = io::stderr();
    write_tree(&walker, args, &mut stdout.lock(), &mut stderr.lock())
}

/// Build the tree, print it to `out` and write any requested export files.
///
/// Branch diagnostics (unknown, failed, older than the cutoff) go to `diag`,
/// one line each.
fn write_tree<S, W, E>(source: &S, args: &TreeArgs, out: &mut W, diag: &mut E) -> Result<()>
where
    S: CommitSource + ?Sized,
    W: Write,
    E: Write,
{
    let cutoff = args.after.as_deref().map(parse_after).transpose()?;
    let (mut store, report) = GraphBuilder::new(source)
        .cutoff(cutoff)
        .include_remote(args.remote)
        .build(&args.branches)?;

    for name in &report.included {
        writeln!(out, "Including {name}")?;
    }
    for skipped in &report.skipped {
        writeln!(
            diag,
            "Skipping {}, last commit on {}",
            skipped.name,
            skipped.tip_time.with_timezone(&Local).format("%Y-%m-%d")
        )?;
    }
    for failure in &report.failures {
        writeln!(diag, "{failure}")?;
    }

    let root = compute_depths(&mut store)?;
    let start = display_root(&store, root);
    writeln!(
        out,
        "First branch is at depth {}",
        store.get(start).depth().unwrap_or_default()
    )?;

    AsciiRenderer::new(RenderConfig::new(args.width)).render(&store, start, out)?;
    out.flush()?;

    if args.html.is_none() && args.json.is_none() {
        return Ok(());
    }

    let (tree, changes) = exports(&store, root, source, diag)?;

    if let Some(path) = &args.html {
        let mut file = create(path)?;
        html::write_page(&mut file, &tree, &changes)?;
        file.flush()?;
        writeln!(out, "Wrote {}", path.display())?;
    }

    if let Some(path) = &args.json {
        let mut file = create(path)?;
        let doc = serde_json::json!({ "tree": tree, "branches": changes });
        serde_json::to_writer_pretty(&mut file, &doc)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        writeln!(file)?;
        file.flush()?;
        writeln!(out, "Wrote {}", path.display())?;
    }

    Ok(())
}

/// Condensed tree and per-branch change summaries from the global root
fn exports<S, E>(
    store: &NodeStore,
    root: NodeId,
    source: &S,
    diag: &mut E,
) -> Result<(TreeEntry, Vec<BranchChanges>)>
where
    S: CommitSource + ?Sized,
    E: Write,
{
    let mut changes = Vec::new();
    for result in branch_changes(store, root, source) {
        match result {
            Ok(summary) => changes.push(summary),
            Err(err) => writeln!(diag, "{err}")?,
        }
    }
    let tree = export_tree(store, root);
    debug!(
        "Exporting {} tree entries and {} branch summaries",
        tree.entry_count(),
        changes.len()
    );
    Ok((tree, changes))
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

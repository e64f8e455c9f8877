//! Self-contained HTML page for the condensed branch tree.
//!
//! Branch names in the tree are clickable; each opens a panel listing the
//! files the branch changed since it split off.

use graph::{BranchChanges, EntryKind, TreeEntry};
use std::io::{self, Write};

const SCRIPT: &str = include_str!("../assets/tree.js");
const STYLE: &str = include_str!("../assets/tree.css");

pub fn write_page<W: Write>(out: &mut W, tree: &TreeEntry, changes: &[BranchChanges]) -> io::Result<()> {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html>")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"utf-8\">")?;
    writeln!(out, "<title>Branch tree</title>")?;
    writeln!(out, "<style>\n{STYLE}</style>")?;
    writeln!(out, "<script>\n{SCRIPT}</script>")?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;

    writeln!(out, "<div class=\"tree-diagram\">")?;
    writeln!(out, "<ul>")?;
    writeln!(out, "<li class=\"tree-diagram__root\">root")?;
    writeln!(out, "<ul>")?;
    write_entry(out, tree, 0)?;
    writeln!(out, "</ul></li></ul></div>")?;

    for summary in changes {
        write_panel(out, summary)?;
    }

    writeln!(out, "<script>initialize();</script>")?;
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")
}

fn write_entry<W: Write>(out: &mut W, entry: &TreeEntry, depth: usize) -> io::Result<()> {
    let indent = " ".repeat(depth);
    let class = match entry.kind {
        EntryKind::Branch => "branch",
        EntryKind::Commit => "sha",
    };
    let label = escape(&entry.label);
    write!(out, "{indent}<li><span id=\"{label}\" class=\"{class}\">{label}</span>")?;
    if entry.skipped > 0 {
        write!(out, " <span class=\"skipped\">+{}</span>", entry.skipped)?;
    }
    if entry.children.is_empty() {
        return writeln!(out, "</li>");
    }

    writeln!(out, "\n{indent}<ul>")?;
    for child in &entry.children {
        write_entry(out, child, depth + 1)?;
    }
    writeln!(out, "{indent}</ul></li>")
}

fn write_panel<W: Write>(out: &mut W, summary: &BranchChanges) -> io::Result<()> {
    let branch = escape(&summary.branch);
    let origin = escape(summary.origin.as_deref().unwrap_or("root"));
    writeln!(out, "<div id=\"diff-{branch}\" class=\"diffs\"><h1>{origin} -&gt; {branch}</h1>")?;

    let from = summary
        .origin_time
        .map(|time| time.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());
    writeln!(
        out,
        "<ul><li>From: {from}</li><li>To: {}</li><li>Commits: {}</li></ul>",
        summary.tip_time.format("%Y-%m-%d"),
        summary.commit_count
    )?;

    writeln!(out, "<ul>")?;
    for file in &summary.files {
        writeln!(out, " <li>{}</li>", escape(file))?;
    }
    writeln!(out, "</ul></div>")
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

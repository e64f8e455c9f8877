//! CLI commands
//!
//! Command implementations for the `bgraph` binary.

mod compare;
mod tree;

pub use compare::run_compare;
pub use tree::run_tree;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use graph::GitWalker;
use std::path::Path;

/// Open the repository containing `repodir`
fn open_repo(repodir: &Path) -> Result<GitWalker> {
    GitWalker::discover(repodir)
        .with_context(|| format!("Could not find a repo starting from {}", repodir.display()))
}

/// Parse an `MM/DD/YY` cutoff as local midnight
fn parse_after(date: &str) -> Result<DateTime<Utc>> {
    let day = NaiveDate::parse_from_str(date, "%m/%d/%y")
        .with_context(|| format!("Invalid date '{date}', expected MM/DD/YY"))?;
    let midnight = day.and_hms_opt(0, 0, 0).context("Invalid time of day")?;
    let local = Local
        .from_local_datetime(&midnight)
        .earliest()
        .with_context(|| format!("{date} has no local midnight"))?;
    Ok(local.with_timezone(&Utc))
}

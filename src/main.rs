//! bgraph - branch ancestry trees for git repositories
//!
//! Walks every branch back along first parents and prints how the branches
//! split off from each other.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod html;
#[cfg(test)]
mod testing;

#[derive(Parser)]
#[command(name = "bgraph")]
#[command(about = "Show how the branches of a git repository split off from each other")]
#[command(version)]
struct Cli {
    /// Directory inside the repository
    #[arg(short, long, global = true, default_value = ".")]
    repodir: PathBuf,

    /// Log graph construction details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw the branch tree (default)
    Tree(TreeArgs),

    /// List the commits on two branches since they diverged
    ///
    /// Each commit line carries its summary; changed files are listed only
    /// with `--show-files`.
    Compare {
        /// First branch
        a: String,

        /// Second branch
        b: String,

        /// Also list the files changed by each commit, one per line
        #[arg(short, long)]
        show_files: bool,
    },
}

#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Branches to include (all branches if none given)
    pub branches: Vec<String>,

    /// Include remote-tracking branches
    #[arg(short = 'R', long)]
    pub remote: bool,

    /// Only include branches with a commit after this date (MM/DD/YY)
    #[arg(short, long, value_name = "MM/DD/YY")]
    pub after: Option<String>,

    /// Columns per branch name
    #[arg(short, long, default_value_t = graph::render::DEFAULT_NAME_WIDTH)]
    pub width: usize,

    /// Write an HTML page with the tree and per-branch file changes
    #[arg(long, value_name = "PATH")]
    pub html: Option<PathBuf>,

    /// Write the tree and per-branch file changes as JSON
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,
}

impl Default for TreeArgs {
    fn default() -> Self {
        Self {
            branches: Vec::new(),
            remote: false,
            after: None,
            width: graph::render::DEFAULT_NAME_WIDTH,
            html: None,
            json: None,
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("BGRAPH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "graph=debug,branch_graph=debug,warn" } else { "warn" })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        None => cli::run_tree(&cli.repodir, &TreeArgs::default())?,
        Some(Commands::Tree(args)) => cli::run_tree(&cli.repodir, &args)?,
        Some(Commands::Compare { a, b, show_files }) => {
            cli::run_compare(&cli.repodir, &a, &b, show_files)?
        }
    }

    Ok(())
}

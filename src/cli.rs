//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for `tasklink`.
#[derive(Debug, Parser)]
#[command(
    name = "tasklink",
    version,
    about = "Keep a planning task file and a Beads tracker in step"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show which stores are present and how many tasks are linked.
    Status,
    /// Reconcile both stores and persist the link store.
    Sync(SyncArgs),
    /// Create Beads issues for every unlinked planning task.
    Import {
        /// Report what would happen without changing anything.
        #[arg(long)]
        dry_run: bool,
    },
    /// Link a planning task to a Beads issue.
    Link {
        /// Planning task id (`7`, `a:7`, or `A-7`).
        a_id: String,
        /// Beads issue id.
        b_id: String,
    },
    /// Remove the link for a planning task or Beads issue.
    Unlink {
        /// Planning id (`a:7`, `A-7`) or Beads issue id.
        identifier: String,
    },
    /// List every link.
    Links {
        /// Print the raw link store JSON.
        #[arg(long)]
        json: bool,
    },
    /// Write default config and an empty link store.
    Init(InitArgs),
}

/// Arguments for `tasklink sync`.
#[derive(Debug, Clone, Default, Args)]
pub struct SyncArgs {
    /// Report what would happen without changing anything.
    #[arg(long)]
    pub dry_run: bool,
    /// Only push planning changes into Beads.
    #[arg(long, conflicts_with = "b_to_a")]
    pub a_to_b: bool,
    /// Only pull Beads changes into the planning file.
    #[arg(long)]
    pub b_to_a: bool,
    /// Show timestamps and counts, and enable debug logging.
    #[arg(long, short)]
    pub verbose: bool,
}

/// Arguments for `tasklink init`.
#[derive(Debug, Clone, Default, Args)]
pub struct InitArgs {
    /// Also write `docs/tasklink.md`.
    #[arg(long)]
    pub docs: bool,
    /// Also add a tasklink section to `CLAUDE.md`.
    #[arg(long)]
    pub claude: bool,
    /// Overwrite existing config and docs.
    #[arg(long)]
    pub force: bool,
}

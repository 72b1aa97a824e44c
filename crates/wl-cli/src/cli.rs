//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Timesheet-style worklog from GitHub activity.
///
/// Fetches your pull-request and issue events, then compresses consecutive
/// same-subject events into work sessions. Without a subcommand, runs
/// `fetch` followed by `compress`.
#[derive(Debug, Parser)]
#[command(name = "wl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch pull-request and issue events from GitHub into the events file.
    Fetch,

    /// Compress the events file into sessions.
    Compress,
}

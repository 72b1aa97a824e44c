//! GitHub worklog CLI library.
//!
//! This crate provides the CLI interface for the worklog: configuration,
//! argument parsing and the `fetch` / `compress` commands.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::{Config, GithubSettings, load_dotenv};

//! CLI subcommand implementations.

pub mod compress;
pub mod fetch;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wl_cli::commands::{compress, fetch};
use wl_cli::{Cli, Commands, Config, load_dotenv};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    load_dotenv()?;
    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    match cli.command {
        Some(Commands::Fetch) => run_fetch(&config)?,
        Some(Commands::Compress) => run_compress(&config)?,
        None => {
            run_fetch(&config)?;
            run_compress(&config)?;
        }
    }

    Ok(())
}

fn run_fetch(config: &Config) -> Result<()> {
    let report = fetch::run(config)?;
    eprintln!(
        "Fetched {} events for {} into {}",
        report.fetched,
        report.username,
        config.events_path.display()
    );
    Ok(())
}

fn run_compress(config: &Config) -> Result<()> {
    let report = compress::run(config)?;
    eprintln!(
        "Wrote {} sessions from {} events to {} ({} day boundaries)",
        report.sessions,
        report.events,
        config.sessions_path.display(),
        report.boundaries
    );
    Ok(())
}

//! Fetch command: pulls GitHub activity into the events file.

use anyhow::{Context, Result};
use wl_github::{Client, Collector};

use crate::Config;

#[derive(Debug)]
pub struct FetchReport {
    pub username: String,
    pub fetched: usize,
}

/// Fetches the configured user's pull-request and issue events and writes
/// them, in fetch order, to the events file.
///
/// Missing GitHub settings are reported before any network or file access.
pub fn run(config: &Config) -> Result<FetchReport> {
    let github = config.github()?;

    let client = Client::new(github.token, config.api_url.as_str())
        .context("failed to create GitHub client")?;
    let collector = Collector::new(client);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to initialize tokio runtime")?;
    let events = runtime
        .block_on(collector.fetch_events(&github.username, &github.clients))
        .context("failed to fetch events from GitHub")?;

    let fetched = wl_store::write_events_file(&config.events_path, &events)
        .with_context(|| format!("failed to write {}", config.events_path.display()))?;

    Ok(FetchReport {
        username: github.username,
        fetched,
    })
}

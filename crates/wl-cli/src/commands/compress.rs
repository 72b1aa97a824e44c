//! Compress command: folds the events file into work sessions.

use anyhow::{Context, Result};
use wl_core::{CompressOptions, compress, sort_events};

use crate::Config;

#[derive(Debug)]
pub struct CompressReport {
    pub events: usize,
    pub sessions: usize,
    /// Zero-length records marking a run cut short by a day change.
    pub boundaries: usize,
}

/// Reads the events file, sorts it by time, compresses it and writes the
/// sessions file. Running it twice over the same events file produces the
/// same output.
pub fn run(config: &Config) -> Result<CompressReport> {
    let mut events = wl_store::read_events_file(&config.events_path)
        .with_context(|| format!("failed to read {}", config.events_path.display()))?;
    sort_events(&mut events);

    let options = CompressOptions {
        flush_trailing: config.flush_trailing,
    };
    let sessions = compress(&events, options);

    let written = wl_store::write_sessions_file(&config.sessions_path, &sessions)
        .with_context(|| format!("failed to write {}", config.sessions_path.display()))?;

    Ok(CompressReport {
        events: events.len(),
        sessions: written,
        boundaries: sessions.iter().filter(|s| s.is_boundary()).count(),
    })
}

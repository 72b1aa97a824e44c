//! Storage layer for the GitHub worklog.
//!
//! Both stages exchange data through flat CSV files:
//!
//! - the events file (`type,created_at,actor,repo,name`), one row per event
//!   in the order the collector fetched them;
//! - the sessions file (`name,start,end,repo,type,dur`), one row per
//!   compressed session.
//!
//! # Timestamp Format
//!
//! Timestamps are written in RFC 3339 with second precision and a `Z`
//! suffix (e.g., `2024-01-15T10:30:00Z`). Reading is more lenient and also
//! accepts offsets and naive `YYYY-MM-DD HH:MM[:SS]` values, which are
//! taken as UTC. See [`wl_core::parse_timestamp`].
//!
//! Any malformed row fails the whole read; there is no partial recovery.

mod events;
mod sessions;

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use thiserror::Error;
use wl_core::{Event, Session, TimestampError};

pub use events::{EVENT_HEADER, EventWriter, read_events};
pub use sessions::{SESSION_HEADER, write_sessions};

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Opening, creating or flushing a file failed.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The CSV layer failed while reading or writing.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    /// The header row is not the one this file kind uses.
    #[error("unexpected header {found:?}, expected {expected:?}")]
    Header {
        expected: &'static [&'static str],
        found: Vec<String>,
    },
    /// A data row could not be decoded.
    #[error("invalid row {row}: {source}")]
    Row {
        /// 1-based data row number, not counting the header.
        row: usize,
        #[source]
        source: csv::Error,
    },
    /// A data row carries a timestamp we cannot parse.
    #[error("invalid row {row}: {source}")]
    Timestamp {
        row: usize,
        #[source]
        source: TimestampError,
    },
}

/// Reads every event from the events file at `path`.
pub fn read_events_file(path: &Path) -> Result<Vec<Event>, StoreError> {
    let file = File::open(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let events = read_events(BufReader::new(file))?;
    tracing::debug!(path = %path.display(), count = events.len(), "read events");
    Ok(events)
}

/// Writes `events` to `path`, replacing any previous content.
pub fn write_events_file(path: &Path, events: &[Event]) -> Result<usize, StoreError> {
    let mut writer = EventWriter::new(create(path)?)?;
    for event in events {
        writer.write(event)?;
    }
    let written = writer.finish()?;
    tracing::debug!(path = %path.display(), count = written, "wrote events");
    Ok(written)
}

/// Writes `sessions` to `path`, replacing any previous content.
pub fn write_sessions_file(path: &Path, sessions: &[Session]) -> Result<usize, StoreError> {
    let written = write_sessions(create(path)?, sessions)?;
    tracing::debug!(path = %path.display(), count = written, "wrote sessions");
    Ok(written)
}

/// Creates (or truncates) a file, making parent directories as needed.
fn create(path: &Path) -> Result<BufWriter<File>, StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    File::create(path).map(BufWriter::new).map_err(io_err)
}

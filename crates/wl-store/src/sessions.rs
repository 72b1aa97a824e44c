//! The sessions output file.

use std::io::Write;

use serde::Serialize;
use wl_core::{Session, format_timestamp};

use crate::StoreError;

/// Column layout of the sessions file.
pub const SESSION_HEADER: [&str; 6] = ["name", "start", "end", "repo", "type", "dur"];

#[derive(Debug, Serialize)]
struct SessionRow<'a> {
    name: &'a str,
    start: String,
    end: String,
    repo: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    dur: String,
}

impl<'a> From<&'a Session> for SessionRow<'a> {
    fn from(session: &'a Session) -> Self {
        Self {
            name: &session.name,
            start: format_timestamp(&session.start),
            end: format_timestamp(&session.end),
            repo: &session.repo,
            kind: &session.kind,
            dur: session.render_hours(),
        }
    }
}

/// Writes the header and one row per session, returning the row count.
pub fn write_sessions<W: Write>(writer: W, sessions: &[Session]) -> Result<usize, StoreError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(SESSION_HEADER)?;
    for session in sessions {
        writer.serialize(SessionRow::from(session))?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(sessions.len())
}

//! The intermediate events file.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use wl_core::{Event, format_timestamp, parse_timestamp};

use crate::StoreError;

/// Column layout of the events file.
pub const EVENT_HEADER: [&str; 5] = ["type", "created_at", "actor", "repo", "name"];

#[derive(Debug, Serialize, Deserialize)]
struct EventRow {
    #[serde(rename = "type")]
    kind: String,
    created_at: String,
    actor: String,
    repo: String,
    name: String,
}

impl From<&Event> for EventRow {
    fn from(event: &Event) -> Self {
        Self {
            kind: event.kind.clone(),
            created_at: format_timestamp(&event.created_at),
            actor: event.actor.clone(),
            repo: event.repo.clone(),
            name: event.name.clone(),
        }
    }
}

impl EventRow {
    fn into_event(self, row: usize) -> Result<Event, StoreError> {
        let created_at = parse_timestamp(&self.created_at)
            .map_err(|source| StoreError::Timestamp { row, source })?;
        Ok(Event {
            kind: self.kind,
            created_at,
            actor: self.actor,
            repo: self.repo,
            name: self.name,
        })
    }
}

/// Streams events into the events file, header first.
pub struct EventWriter<W: Write> {
    inner: csv::Writer<W>,
    written: usize,
}

impl<W: Write> EventWriter<W> {
    /// Wraps `writer` and emits the header row immediately, so an empty
    /// fetch still produces a well-formed file.
    pub fn new(writer: W) -> Result<Self, StoreError> {
        let mut inner = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        inner.write_record(EVENT_HEADER)?;
        Ok(Self { inner, written: 0 })
    }

    pub fn write(&mut self, event: &Event) -> Result<(), StoreError> {
        self.inner.serialize(EventRow::from(event))?;
        self.written += 1;
        Ok(())
    }

    /// Flushes buffered rows and returns how many events were written.
    pub fn finish(mut self) -> Result<usize, StoreError> {
        self.inner.flush().map_err(csv::Error::from)?;
        Ok(self.written)
    }
}

/// Reads all events from an events file.
///
/// The header must match [`EVENT_HEADER`] exactly. Rows are returned in
/// file order; sorting is the compressor's job.
pub fn read_events<R: Read>(reader: R) -> Result<Vec<Event>, StoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = reader.headers()?;
    if headers.iter().ne(EVENT_HEADER) {
        return Err(StoreError::Header {
            expected: &EVENT_HEADER,
            found: headers.iter().map(str::to_string).collect(),
        });
    }

    let mut events = Vec::new();
    for (idx, row) in reader.deserialize::<EventRow>().enumerate() {
        let row_number = idx + 1;
        let row = row.map_err(|source| StoreError::Row {
            row: row_number,
            source,
        })?;
        events.push(row.into_event(row_number)?);
    }
    Ok(events)
}

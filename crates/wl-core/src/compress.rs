//! Folding a time-ordered event log into work sessions.
//!
//! The scan is single-pass and keeps one open run at a time. A run is
//! closed when the next event falls on another calendar day (emitting a
//! zero-length boundary record) or names another subject (emitting a
//! session that ends at that event). Events continuing the same subject on
//! the same day are absorbed.

use chrono::{DateTime, Utc};

use crate::event::Event;
use crate::session::Session;

/// Knobs for [`compress`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompressOptions {
    /// Emit the run still open at end of stream instead of dropping it.
    ///
    /// Off by default: a run is only ever emitted when a later event closes
    /// it, so the last subject of the log produces no session.
    pub flush_trailing: bool,
}

/// Sorts events by `created_at`, keeping file order for equal timestamps.
pub fn sort_events(events: &mut [Event]) {
    events.sort_by_key(|event| event.created_at);
}

/// The run currently being accumulated.
struct OpenRun<'a> {
    name: &'a str,
    start: DateTime<Utc>,
    /// Most recent event absorbed into the run.
    last: &'a Event,
}

impl<'a> OpenRun<'a> {
    fn open(event: &'a Event) -> Self {
        Self {
            name: &event.name,
            start: event.created_at,
            last: event,
        }
    }

    /// Zero-length record for a run interrupted by a day change.
    fn boundary(&self, trigger: &Event) -> Session {
        Session {
            name: self.name.to_string(),
            start: self.start,
            end: self.start,
            repo: trigger.repo.clone(),
            kind: trigger.kind.clone(),
        }
    }

    /// Session for a run closed by an event on another subject.
    fn close(&self, trigger: &Event) -> Session {
        Session {
            name: self.name.to_string(),
            start: self.start,
            end: trigger.created_at,
            repo: trigger.repo.clone(),
            kind: trigger.kind.clone(),
        }
    }
}

/// Compresses events, already sorted by [`sort_events`], into sessions.
///
/// Sessions come out in the order they were closed, so their `start`
/// values never decrease. An empty log yields no sessions.
pub fn compress(events: &[Event], options: CompressOptions) -> Vec<Session> {
    let mut sessions = Vec::new();
    let mut open: Option<OpenRun<'_>> = None;

    for event in events {
        let run = open.get_or_insert_with(|| OpenRun::open(event));

        if event.day() != run.start.date_naive() {
            tracing::debug!(
                subject = run.name,
                start = %run.start,
                next_day = %event.created_at,
                "day boundary"
            );
            sessions.push(run.boundary(event));
            *run = OpenRun::open(event);
        } else if event.name != run.name {
            tracing::debug!(
                subject = run.name,
                next_subject = %event.name,
                start = %run.start,
                end = %event.created_at,
                "subject changed"
            );
            sessions.push(run.close(event));
            open = None;
        } else {
            run.last = event;
        }
    }

    if let Some(run) = open {
        if options.flush_trailing {
            tracing::debug!(subject = run.name, start = %run.start, "flushing trailing run");
            sessions.push(run.close(run.last));
        } else {
            tracing::debug!(subject = run.name, start = %run.start, "dropping trailing run");
        }
    }

    sessions
}

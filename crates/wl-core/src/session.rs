//! Work sessions: compressed runs of same-subject activity.

use chrono::{DateTime, Duration, Utc};

/// A contiguous block of activity on one subject within one calendar day.
///
/// `start <= end` always holds for sessions produced by [`crate::compress`].
/// Boundary records, emitted when a day change interrupts a run, have
/// `start == end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Subject the time was spent on.
    pub name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Repository of the event that closed the session.
    pub repo: String,
    /// GitHub event type of the event that closed the session.
    pub kind: String,
}

impl Session {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Length in hours, counted in whole minutes.
    #[expect(
        clippy::cast_precision_loss,
        reason = "minute counts stay far below 2^52"
    )]
    pub fn duration_hours(&self) -> f64 {
        self.duration().num_minutes() as f64 / 60.0
    }

    /// Duration as the decimal string written to the sessions file.
    ///
    /// Whole hours keep one fractional digit ("2.0"), everything else uses
    /// the shortest representation that round-trips ("1.5", "0.25").
    pub fn render_hours(&self) -> String {
        let minutes = self.duration().num_minutes();
        if minutes % 60 == 0 {
            format!("{}.0", minutes / 60)
        } else {
            self.duration_hours().to_string()
        }
    }

    /// Whether this is a zero-length day-boundary record.
    pub fn is_boundary(&self) -> bool {
        self.start == self.end
    }
}

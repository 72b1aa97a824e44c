//! Raw activity events pulled from GitHub.

use chrono::{DateTime, NaiveDate, Utc};

use crate::category::EventCategory;

/// One pull-request or issue action performed by the tracked user.
///
/// Events are immutable once recorded: the collector produces them, the
/// compressor only reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// GitHub event type, e.g. `PullRequestEvent` or `IssueCommentEvent`.
    pub kind: String,
    /// When GitHub recorded the event.
    pub created_at: DateTime<Utc>,
    /// Display name of the user who acted.
    pub actor: String,
    /// Repository the event belongs to, as `owner/name`.
    pub repo: String,
    /// Subject: the pull request or issue title.
    pub name: String,
}

impl Event {
    /// The category this event's type falls into, if it is one we track.
    pub fn category(&self) -> Option<EventCategory> {
        EventCategory::classify(&self.kind)
    }

    /// The calendar day (UTC) the event happened on.
    pub fn day(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}

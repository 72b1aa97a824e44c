//! Event categories as the single source of truth for which GitHub event
//! types the worklog keeps.

/// The two kinds of activity the worklog tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    PullRequest,
    Issue,
}

impl EventCategory {
    /// Classifies a GitHub event type string by its prefix.
    ///
    /// `PullRequestEvent`, `PullRequestReviewEvent` and friends map to
    /// [`EventCategory::PullRequest`]; `IssuesEvent` and `IssueCommentEvent`
    /// map to [`EventCategory::Issue`]. Everything else is ignored.
    #[must_use]
    pub fn classify(event_type: &str) -> Option<Self> {
        if event_type.starts_with("PullRequest") {
            Some(Self::PullRequest)
        } else if event_type.starts_with("Issue") {
            Some(Self::Issue)
        } else {
            None
        }
    }

    /// The payload field that carries the subject object for this category.
    #[must_use]
    pub const fn payload_key(&self) -> &'static str {
        match self {
            Self::PullRequest => "pull_request",
            Self::Issue => "issue",
        }
    }
}

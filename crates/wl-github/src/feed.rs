//! Event feeds and the cursor-based paging contract.

use std::fmt;
use std::future::Future;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::GithubError;

/// An activity feed on the GitHub events API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feed {
    /// Public and private events performed by `actor`.
    User { actor: String },
    /// Events in `org` visible to the authenticated `actor`.
    Organization { actor: String, org: String },
}

impl Feed {
    /// Request path relative to the API root.
    pub fn path(&self) -> String {
        match self {
            Self::User { actor } => format!("/users/{actor}/events"),
            Self::Organization { actor, org } => format!("/users/{actor}/events/orgs/{org}"),
        }
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User { actor } => write!(f, "user:{actor}"),
            Self::Organization { org, .. } => write!(f, "org:{org}"),
        }
    }
}

/// Position within a feed. Pages are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub page: u32,
}

impl PageCursor {
    pub const fn first() -> Self {
        Self { page: 1 }
    }
}

/// One page of a feed.
#[derive(Debug, Clone)]
pub struct Page {
    pub events: Vec<RawEvent>,
    /// Cursor for the following page, `None` on the last page.
    pub next: Option<PageCursor>,
}

/// An event as GitHub returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub actor: RawActor,
    pub repo: RawRepo,
    #[serde(default)]
    pub payload: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawActor {
    pub login: String,
    #[serde(default)]
    pub display_login: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRepo {
    /// `owner/name`.
    pub name: String,
}

/// Anything that can serve feed pages.
pub trait EventSource {
    fn fetch_page(
        &self,
        feed: &Feed,
        cursor: PageCursor,
    ) -> impl Future<Output = Result<Page, GithubError>>;
}

//! GitHub event collection for the worklog.
//!
//! Pulls the tracked user's activity from the GitHub REST events API and
//! keeps only pull-request and issue events:
//! - [`Client`] talks HTTP and exposes one page of a feed at a time
//! - [`Collector`] walks every feed page by page and turns raw events into
//!   [`wl_core::Event`]s
//!
//! Paging is explicit: a [`PageCursor`] names the page to fetch and each
//! [`Page`] says which cursor comes next, so partial progress is visible to
//! the caller and any page can be re-requested.

mod client;
mod collector;
mod feed;

use thiserror::Error;

pub use client::{Client, DEFAULT_API_URL};
pub use collector::Collector;
pub use feed::{EventSource, Feed, Page, PageCursor, RawActor, RawEvent, RawRepo};

/// GitHub client errors.
#[derive(Debug, Error)]
pub enum GithubError {
    /// The provided access token was invalid.
    #[error("invalid access token: {reason}")]
    InvalidToken { reason: &'static str },
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// GitHub rejected the credentials.
    #[error("unauthorized (status {status}): {message}")]
    Unauthorized { status: u16, message: String },
    /// GitHub returned an error response.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
    /// Failed to parse response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

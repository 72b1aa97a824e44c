//! HTTP client for the GitHub REST events API.

use std::fmt;
use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, LINK};
use reqwest::{StatusCode, Url};
use serde::Deserialize;

use crate::GithubError;
use crate::feed::{EventSource, Feed, Page, PageCursor, RawEvent};

/// Public GitHub API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default request timeout for API calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const GITHUB_API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("wl/", env!("CARGO_PKG_VERSION"));
/// Largest page size the events API accepts.
const PER_PAGE: u32 = 100;

/// GitHub API client.
///
/// Cheap to clone; clones share the underlying HTTP connection pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a new client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or whitespace-only, or if
    /// the HTTP client fails to build.
    pub fn new(token: impl Into<String>, base_url: impl Into<String>) -> Result<Self, GithubError> {
        let token = token.into();

        if token.is_empty() {
            return Err(GithubError::InvalidToken {
                reason: "access token cannot be empty",
            });
        }
        if token.trim().is_empty() {
            return Err(GithubError::InvalidToken {
                reason: "access token cannot be whitespace-only",
            });
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(GithubError::ClientBuild)?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            http,
            base_url,
            token,
        })
    }
}

impl EventSource for Client {
    async fn fetch_page(&self, feed: &Feed, cursor: PageCursor) -> Result<Page, GithubError> {
        let url = format!("{}{}", self.base_url, feed.path());
        tracing::debug!(%feed, page = cursor.page, "fetching events page");

        let response = self
            .http
            .get(&url)
            .query(&[("per_page", PER_PAGE), ("page", cursor.page)])
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(api_error(status, &body));
        }
        let next = next_cursor(response.headers())?;
        let body = response.text().await?;

        let events: Vec<RawEvent> = serde_json::from_str(&body)
            .map_err(|err| GithubError::InvalidResponse(err.to_string()))?;
        tracing::debug!(
            %feed,
            page = cursor.page,
            count = events.len(),
            has_next = next.is_some(),
            "fetched events page"
        );
        Ok(Page { events, next })
    }
}

/// Reads the `rel="next"` entry of a `Link` header.
///
/// `<https://api.github.com/users/alice/events?per_page=100&page=2>; rel="next", <...>; rel="last"`
fn next_cursor(headers: &HeaderMap) -> Result<Option<PageCursor>, GithubError> {
    let Some(link) = headers.get(LINK) else {
        return Ok(None);
    };
    let link = link
        .to_str()
        .map_err(|err| GithubError::InvalidResponse(format!("unreadable Link header: {err}")))?;

    let Some(target) = link.split(',').find_map(|entry| {
        let (target, params) = entry.split_once(';')?;
        params
            .split(';')
            .any(|param| param.trim() == r#"rel="next""#)
            .then_some(target)
    }) else {
        return Ok(None);
    };

    let target = target.trim().trim_start_matches('<').trim_end_matches('>');
    let url = Url::parse(target)
        .map_err(|err| GithubError::InvalidResponse(format!("bad next link {target}: {err}")))?;
    let page = url
        .query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
        .ok_or_else(|| GithubError::InvalidResponse(format!("next link has no page: {target}")))?;
    Ok(Some(PageCursor { page }))
}

fn api_error(status: StatusCode, body: &str) -> GithubError {
    #[derive(Deserialize)]
    struct ErrorPayload {
        message: String,
    }

    let message = serde_json::from_str::<ErrorPayload>(body)
        .map(|payload| payload.message)
        .unwrap_or_else(|_| body.trim().to_string());
    let status = status.as_u16();
    if matches!(status, 401 | 403) {
        GithubError::Unauthorized { status, message }
    } else {
        GithubError::Api { status, message }
    }
}

//! Walking feeds and turning raw GitHub events into worklog events.

use std::collections::HashSet;

use wl_core::{Event, EventCategory};

use crate::GithubError;
use crate::feed::{EventSource, Feed, PageCursor, RawEvent};

/// Collects the tracked user's pull-request and issue events.
#[derive(Debug, Clone)]
pub struct Collector<S> {
    source: S,
}

impl<S: EventSource> Collector<S> {
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Feeds searched for `actor`: one per organization, then the user's own.
    pub fn feeds(actor: &str, orgs: &[String]) -> Vec<Feed> {
        orgs.iter()
            .map(|org| Feed::Organization {
                actor: actor.to_string(),
                org: org.clone(),
            })
            .chain(std::iter::once(Feed::User {
                actor: actor.to_string(),
            }))
            .collect()
    }

    /// Fetches every page of every feed and returns the events `actor`
    /// performed, in fetch order.
    ///
    /// Events appearing in more than one feed are kept once. The first
    /// failing page aborts the whole fetch.
    pub async fn fetch_events(
        &self,
        actor: &str,
        orgs: &[String],
    ) -> Result<Vec<Event>, GithubError> {
        let mut seen = HashSet::new();
        let mut events = Vec::new();

        for feed in Self::feeds(actor, orgs) {
            let mut cursor = Some(PageCursor::first());
            while let Some(current) = cursor {
                let page = self.source.fetch_page(&feed, current).await?;
                for raw in page.events {
                    if !raw.actor.login.eq_ignore_ascii_case(actor) {
                        continue;
                    }
                    if !seen.insert(raw.id.clone()) {
                        continue;
                    }
                    if let Some(event) = to_event(raw) {
                        events.push(event);
                    }
                }
                cursor = page.next;
            }
            tracing::debug!(%feed, total = events.len(), "feed exhausted");
        }

        tracing::info!(count = events.len(), "collected events");
        Ok(events)
    }
}

/// Keeps pull-request and issue events that name their subject.
fn to_event(raw: RawEvent) -> Option<Event> {
    let category = EventCategory::classify(&raw.kind)?;
    let Some(title) = raw.payload[category.payload_key()]["title"].as_str() else {
        tracing::warn!(
            id = %raw.id,
            kind = %raw.kind,
            payload = category.payload_key(),
            "event payload has no subject title, skipping"
        );
        return None;
    };

    Some(Event {
        name: title.to_string(),
        kind: raw.kind,
        created_at: raw.created_at,
        actor: raw.actor.display_login.unwrap_or(raw.actor.login),
        repo: raw.repo.name,
    })
}

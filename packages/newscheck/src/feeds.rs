//! Feed fetching - RSS/Atom endpoints to raw entries.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tracing::{info, warn};

use crate::error::FetchError;
use crate::types::article::RawEntry;

/// Maximum feeds downloaded concurrently.
const FEED_CONCURRENCY: usize = 4;

/// Source of feed entries.
///
/// Implemented by [`FeedFetcher`] for real feeds and by the mock in
/// [`crate::testing`] for tests. A single bad feed must never abort the
/// batch, so the contract is infallible: per-feed failures are logged and
/// skipped inside the implementation.
#[async_trait]
pub trait EntrySource: Send + Sync {
    /// Retrieve up to `per_feed_limit` entries per source, preserving source
    /// order then entry order.
    async fn fetch(&self, sources: &[String], per_feed_limit: usize) -> Vec<RawEntry>;
}

/// HTTP feed fetcher backed by `feed-rs`.
pub struct FeedFetcher {
    client: reqwest::Client,
    user_agent: String,
}

impl FeedFetcher {
    /// Create a fetcher with the given download timeout.
    pub fn new(timeout: Duration, user_agent: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build feed HTTP client");
        Self {
            client,
            user_agent: user_agent.into(),
        }
    }

    /// Fetch and parse one feed.
    async fn fetch_feed(
        &self,
        feed_url: &str,
        per_feed_limit: usize,
    ) -> Result<Vec<RawEntry>, FetchError> {
        let resp = self
            .client
            .get(feed_url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        let feed = feed_rs::parser::parse(&bytes[..]).map_err(|e| FetchError::Parse {
            url: feed_url.to_string(),
            message: e.to_string(),
        })?;

        let entries = entries_from_feed(feed, feed_url, per_feed_limit);
        if entries.is_empty() {
            return Err(FetchError::EmptyFeed {
                url: feed_url.to_string(),
            });
        }

        Ok(entries)
    }
}

#[async_trait]
impl EntrySource for FeedFetcher {
    async fn fetch(&self, sources: &[String], per_feed_limit: usize) -> Vec<RawEntry> {
        // Ordered buffered stream: feeds download concurrently but results
        // come back in source order, keeping the output deterministic.
        let per_feed: Vec<Result<Vec<RawEntry>, FetchError>> = stream::iter(sources.iter().cloned())
            .map(|feed_url: String| async move { self.fetch_feed(&feed_url, per_feed_limit).await })
            .buffered(FEED_CONCURRENCY)
            .collect()
            .await;

        let mut entries = Vec::new();
        for (feed_url, result) in sources.iter().zip(per_feed) {
            match result {
                Ok(feed_entries) => {
                    info!(feed = %feed_url, entries = feed_entries.len(), "feed fetched");
                    entries.extend(feed_entries);
                }
                Err(e) => {
                    warn!(feed = %feed_url, error = %e, "skipping feed");
                }
            }
        }
        entries
    }
}

/// Map a parsed feed to raw entries, capped at `per_feed_limit`.
///
/// Entry order is preserved as the feed reports it. Entries without a usable
/// link are dropped.
fn entries_from_feed(
    feed: feed_rs::model::Feed,
    feed_url: &str,
    per_feed_limit: usize,
) -> Vec<RawEntry> {
    let source_label = feed
        .title
        .map(|t| t.content)
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| host_of(feed_url));

    let mut entries: Vec<RawEntry> = feed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let url = entry
                .links
                .first()
                .map(|l| l.href.clone())
                .or_else(|| entry.id.starts_with("http").then(|| entry.id.clone()))?;

            let mut raw = RawEntry::new(url, source_label.clone());
            if let Some(title) = entry.title {
                raw = raw.with_title_hint(title.content);
            }
            Some(raw)
        })
        .collect();

    entries.truncate(per_feed_limit);
    entries
}

fn host_of(feed_url: &str) -> String {
    url::Url::parse(feed_url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
        .unwrap_or_else(|| "Unknown".to_string())
}

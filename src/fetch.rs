//! Feed transport: fetch a feed URL and yield its raw entries.
//!
//! The transport is a trait so the pipeline can be exercised with canned
//! entries in tests; the real implementation is reqwest + feed-rs.

use crate::types::{Result, RightsfeedError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("rightsfeed/", env!("CARGO_PKG_VERSION"));
const FETCH_TIMEOUT_SECS: u64 = 30;

/// One raw feed entry as delivered by the transport, before any
/// normalization or classification.
#[derive(Debug, Clone)]
pub struct RawEntry {
    pub link: String,
    pub title: String,
    pub summary: String,
    pub published_at: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait FeedTransport: Send + Sync {
    /// Fetch and parse the feed at `feed_url`. A transport error is
    /// distinguishable from an empty feed (`Ok(vec![])`).
    async fn fetch_entries(&self, feed_url: &str) -> Result<Vec<RawEntry>>;
}

pub struct HttpFeedFetcher {
    client: Client,
}

impl HttpFeedFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedTransport for HttpFeedFetcher {
    async fn fetch_entries(&self, feed_url: &str) -> Result<Vec<RawEntry>> {
        let url = Url::parse(feed_url)?;
        debug!("Fetching feed: {}", url);

        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let feed = feed_rs::parser::parse(body.as_ref())
            .map_err(|e| RightsfeedError::Parse(format!("{feed_url}: {e}")))?;

        let entries = feed
            .entries
            .into_iter()
            .filter_map(entry_to_raw)
            .collect::<Vec<_>>();
        debug!("Parsed {} entries from {}", entries.len(), feed_url);
        Ok(entries)
    }
}

fn entry_to_raw(entry: feed_rs::model::Entry) -> Option<RawEntry> {
    // Entries without a link carry no article identity; skip them.
    let link = entry.links.first()?.href.clone();

    let title = entry
        .title
        .map(|t| t.content)
        .unwrap_or_else(|| "No title".to_string());

    // Prefer the summary; fall back to full content.
    let summary = entry
        .summary
        .map(|s| s.content)
        .or_else(|| entry.content.and_then(|c| c.body))
        .unwrap_or_default();

    // A missing or unparsable date degrades to None, never an error.
    let published_at = entry
        .published
        .or(entry.updated)
        .map(|dt| dt.with_timezone(&Utc));

    Some(RawEntry {
        link,
        title,
        summary,
        published_at,
    })
}

use crate::taxonomy::{IdentityTag, Topic};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One row of the static source registry.
#[derive(Debug, Clone, Copy)]
pub struct Source {
    pub name: &'static str,
    pub url: &'static str,
    pub country: &'static str,
}

/// A normalized feed entry before classification. Lives only for the
/// duration of a single ingestion pass.
#[derive(Debug, Clone)]
pub struct ArticleCandidate {
    pub title: String,
    pub summary: String,
    pub link: String,
    pub source: String,
    pub published_at: Option<DateTime<Utc>>,
}

/// The persistence-ready record produced by the pipeline. `url_hash` is the
/// natural key; at most one stored row exists per hash.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedArticle {
    pub url_hash: String,
    pub title: String,
    pub summary: String,
    pub link: String,
    pub source: String,
    pub country: String,
    /// Legacy single-valued category, always "women" or "lgbtqia+".
    pub category: String,
    /// Alphabetically ordered, each tag at most once.
    pub identity_tags: Vec<IdentityTag>,
    /// Table-order matches, capped at three.
    pub topics: Vec<Topic>,
    pub scraped_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub is_paywalled: bool,
    /// Manual curation override; never written by ingestion or
    /// recategorization. Effective paywall state is this value when set,
    /// else `is_paywalled`.
    pub paywall_override: Option<bool>,
    pub locale: String,
}

impl ClassifiedArticle {
    pub fn effective_paywall(&self) -> bool {
        self.paywall_override.unwrap_or(self.is_paywalled)
    }
}

/// Filters for the downstream read interface. All fields optional; results
/// are ordered by scrape time descending and capped at `limit`.
#[derive(Debug, Clone)]
pub struct ArticleQuery {
    pub category: Option<String>,
    pub source: Option<String>,
    pub search: Option<String>,
    /// OR-combined.
    pub topics: Vec<Topic>,
    pub country: Option<String>,
    pub scraped_after: Option<DateTime<Utc>>,
    pub scraped_before: Option<DateTime<Utc>>,
    /// Selects rows whose effective paywall state is false.
    pub free_only: bool,
    pub limit: i64,
}

impl Default for ArticleQuery {
    fn default() -> Self {
        Self {
            category: None,
            source: None,
            search: None,
            topics: Vec::new(),
            country: None,
            scraped_after: None,
            scraped_before: None,
            free_only: false,
            limit: 200,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RightsfeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RightsfeedError>;

//! Storage adapters. One trait, one implementation per backend; the
//! classification and pipeline code never branches on backend identity.
//!
//! Tag lists are semantic lists everywhere else in the crate; the
//! comma-joined string representation exists only inside this module.

mod postgres;
mod sqlite;

pub use postgres::PostgresStore;
pub use sqlite::SqliteStore;

use crate::taxonomy::{IdentityTag, Topic};
use crate::types::{ArticleQuery, ClassifiedArticle, Result, RightsfeedError};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};

/// The fields the recategorization pass reads per stored row.
#[derive(Debug, Clone)]
pub struct TagSnapshot {
    pub url_hash: String,
    pub title: String,
    pub summary: String,
    pub source: String,
}

/// Replacement tag fields written back by the recategorization pass.
/// Paywall fields, timestamps, and the identity hash are never touched.
#[derive(Debug, Clone)]
pub struct TagUpdate {
    pub url_hash: String,
    pub category: String,
    pub identity_tags: Vec<IdentityTag>,
    pub topics: Vec<Topic>,
}

#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Bootstrap the articles relation. Failure here is fatal to the pass.
    async fn init(&self) -> Result<()>;

    /// Insert keyed on the content identity hash. Returns `true` when a new
    /// row was stored, `false` when the hash already existed (a no-op, not
    /// an error). Atomic per hash.
    async fn insert_article(&self, article: &ClassifiedArticle) -> Result<bool>;

    /// Bulk-delete rows scraped before `cutoff`. Returns rows removed.
    async fn delete_scraped_before(&self, cutoff: DateTime<Utc>) -> Result<u64>;

    /// Every stored row's re-classification inputs.
    async fn tag_snapshots(&self) -> Result<Vec<TagSnapshot>>;

    /// Overwrite only the tag fields of one row.
    async fn update_tags(&self, update: &TagUpdate) -> Result<()>;

    /// Filtered read, ordered by scrape time descending, capped.
    async fn query_articles(&self, query: &ArticleQuery) -> Result<Vec<ClassifiedArticle>>;
}

/// Literal stored when no identity tag fired.
pub(crate) const GENERAL_TAGS: &str = "general";

pub(crate) fn join_identity_tags(tags: &[IdentityTag]) -> String {
    if tags.is_empty() {
        GENERAL_TAGS.to_string()
    } else {
        tags.iter()
            .map(|t| t.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub(crate) fn split_identity_tags(serialized: &str) -> Vec<IdentityTag> {
    serialized
        .split(',')
        .filter_map(|part| IdentityTag::from_label(part.trim()))
        .collect()
}

pub(crate) fn join_topics(topics: &[Topic]) -> String {
    topics
        .iter()
        .map(|t| t.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Topic labels themselves contain commas, so the serialized string cannot
/// be split on the delimiter. Stored topic lists are always in category
/// table order (the classifier emits them that way and recategorization
/// rewrites them that way), so recovering by label containment in table
/// order reproduces the stored order exactly.
pub(crate) fn split_topics(serialized: &str) -> Vec<Topic> {
    Topic::ALL
        .iter()
        .copied()
        .filter(|t| serialized.contains(t.label()))
        .collect()
}

/// RFC 3339 UTC text is the on-disk timestamp format for both backends;
/// it is dialect-neutral and lexicographically ordered.
pub(crate) fn encode_time(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn decode_time(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RightsfeedError::Parse(format!("bad stored timestamp {raw:?}: {e}")))
}

pub(crate) fn decode_optional_time(raw: Option<String>) -> Option<DateTime<Utc>> {
    raw.as_deref()
        .filter(|s| !s.is_empty())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Column values shared by both backends' row mappers.
pub(crate) struct ArticleRow {
    pub url_hash: String,
    pub title: String,
    pub summary: String,
    pub link: String,
    pub source: String,
    pub country: String,
    pub category: String,
    pub tags: String,
    pub topics: String,
    pub scraped_at: String,
    pub published_at: Option<String>,
    pub is_paywalled: bool,
    pub paywall_override: Option<bool>,
    pub locale: String,
}

impl ArticleRow {
    pub(crate) fn into_article(self) -> Result<ClassifiedArticle> {
        Ok(ClassifiedArticle {
            identity_tags: split_identity_tags(&self.tags),
            topics: split_topics(&self.topics),
            scraped_at: decode_time(&self.scraped_at)?,
            published_at: decode_optional_time(self.published_at),
            url_hash: self.url_hash,
            title: self.title,
            summary: self.summary,
            link: self.link,
            source: self.source,
            country: self.country,
            category: self.category,
            is_paywalled: self.is_paywalled,
            paywall_override: self.paywall_override,
            locale: self.locale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_identity_tags_serialize_to_general() {
        assert_eq!(join_identity_tags(&[]), "general");
        assert!(split_identity_tags("general").is_empty());
    }

    #[test]
    fn identity_tags_round_trip() {
        let tags = vec![IdentityTag::Lgbtqia, IdentityTag::Women];
        assert_eq!(join_identity_tags(&tags), "lgbtqia+, women");
        assert_eq!(split_identity_tags("lgbtqia+, women"), tags);
    }

    #[test]
    fn topics_round_trip() {
        let topics = vec![Topic::BodilyAutonomy, Topic::StatePower];
        let joined = join_topics(&topics);
        assert_eq!(
            joined,
            "Bodily Autonomy & Reproductive Justice, State Power, Law & Governance"
        );
        assert_eq!(split_topics(&joined), topics);
    }

    #[test]
    fn no_topic_label_is_a_substring_of_another() {
        for a in Topic::ALL {
            for b in Topic::ALL {
                if a != b {
                    assert!(
                        !a.label().contains(b.label()),
                        "{} contains {}",
                        a.label(),
                        b.label()
                    );
                }
            }
        }
    }
}

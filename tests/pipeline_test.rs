use async_trait::async_trait;
use chrono::{Duration, Utc};
use rightsfeed::pipeline::{classify_candidate, url_hash};
use rightsfeed::store::{ArticleStore, SqliteStore};
use rightsfeed::types::ArticleCandidate;
use rightsfeed::{
    ArticleQuery, ClassifiedArticle, FeedTransport, IdentityTag, IngestionPipeline, RawEntry,
    Result, RightsfeedError, Topic,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Serves canned entries per feed URL; every unknown URL fails, which also
/// exercises per-source error isolation.
struct StubTransport {
    feeds: HashMap<String, Vec<RawEntry>>,
}

impl StubTransport {
    fn new() -> Self {
        Self {
            feeds: HashMap::new(),
        }
    }

    fn with_feed(mut self, url: &str, entries: Vec<RawEntry>) -> Self {
        self.feeds.insert(url.to_string(), entries);
        self
    }
}

#[async_trait]
impl FeedTransport for StubTransport {
    async fn fetch_entries(&self, feed_url: &str) -> Result<Vec<RawEntry>> {
        self.feeds
            .get(feed_url)
            .cloned()
            .ok_or_else(|| RightsfeedError::Parse(format!("stub: no feed at {feed_url}")))
    }
}

fn entry(link: &str, title: &str, summary: &str) -> RawEntry {
    RawEntry {
        link: link.to_string(),
        title: title.to_string(),
        summary: summary.to_string(),
        published_at: Some(Utc::now()),
    }
}

fn source_url(name: &str) -> &'static str {
    rightsfeed::registry::find(name)
        .unwrap_or_else(|| panic!("{name} missing from registry"))
        .url
}

fn stored_article(link: &str, source: &str, country: &str) -> ClassifiedArticle {
    let candidate = ArticleCandidate {
        title: "Court ruling on abortion access".to_string(),
        summary: "A long enough summary about reproductive rights that stays comfortably past the teaser threshold used by the paywall heuristic.".to_string(),
        link: link.to_string(),
        source: source.to_string(),
        published_at: None,
    };
    classify_candidate(&candidate, country)
}

async fn memory_store() -> Arc<dyn ArticleStore> {
    let store = SqliteStore::in_memory().await.expect("in-memory sqlite");
    store.init().await.expect("schema bootstrap");
    Arc::new(store)
}

#[tokio::test]
async fn ingestion_is_idempotent_on_identity_hash() -> anyhow::Result<()> {
    let store = memory_store().await;
    let source = rightsfeed::registry::find("Al Jazeera").unwrap();
    let transport = Arc::new(StubTransport::new().with_feed(
        source.url,
        vec![
            entry(
                "https://example.org/abortion-ruling",
                "Court ruling on abortion access",
                "",
            ),
            entry(
                "https://example.org/markets",
                "Stock markets close higher",
                "Quiet trading day across the exchanges.",
            ),
        ],
    ));
    let pipeline = IngestionPipeline::new(store.clone(), transport);

    // First pass: one entry passes the gate, one is filtered out.
    assert_eq!(pipeline.ingest_source(source).await?, 1);
    // Second pass over the same feed stores nothing new.
    assert_eq!(pipeline.ingest_source(source).await?, 0);

    let rows = store.query_articles(&ArticleQuery::default()).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].url_hash, url_hash("https://example.org/abortion-ruling"));
    assert_eq!(rows[0].identity_tags, vec![IdentityTag::Women]);
    assert_eq!(rows[0].category, "women");
    Ok(())
}

#[tokio::test]
async fn failing_sources_do_not_abort_the_pass() -> anyhow::Result<()> {
    let store = memory_store().await;
    // Only PinkNews resolves; every other registry source errors.
    let transport = Arc::new(StubTransport::new().with_feed(
        source_url("PinkNews"),
        vec![entry(
            "https://example.org/cafes",
            "Five cosy cafes we adore",
            "Warm corners and quiet afternoons, reviewed at considerable and affectionate length for your weekend plans.",
        )],
    ));
    let pipeline = IngestionPipeline::new(store.clone(), transport);

    let total = pipeline.run_pass().await?;
    assert_eq!(total, 1);

    let rows = store.query_articles(&ArticleQuery::default()).await?;
    assert_eq!(rows.len(), 1);
    // Always-include source with no keyword hits falls back to its default.
    assert_eq!(rows[0].topics, vec![Topic::CultureMedia]);
    assert_eq!(rows[0].category, "lgbtqia+");
    Ok(())
}

#[tokio::test]
async fn retention_sweep_prunes_only_expired_rows() -> anyhow::Result<()> {
    let store = memory_store().await;

    let mut old = stored_article("https://example.org/old", "Al Jazeera", "Qatar");
    old.scraped_at = Utc::now() - Duration::days(200);
    let mut fresh = stored_article("https://example.org/fresh", "Al Jazeera", "Qatar");
    fresh.scraped_at = Utc::now() - Duration::days(1);

    assert!(store.insert_article(&old).await?);
    assert!(store.insert_article(&fresh).await?);

    let pruned = store
        .delete_scraped_before(Utc::now() - Duration::days(180))
        .await?;
    assert_eq!(pruned, 1);

    let rows = store.query_articles(&ArticleQuery::default()).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].link, "https://example.org/fresh");
    Ok(())
}

#[tokio::test]
async fn recategorization_is_idempotent_and_preserves_overrides() -> anyhow::Result<()> {
    let store = memory_store().await;

    let mut article = stored_article("https://example.org/override", "Al Jazeera", "Qatar");
    article.paywall_override = Some(true);
    assert!(store.insert_article(&article).await?);

    let transport = Arc::new(StubTransport::new());
    let pipeline = IngestionPipeline::new(store.clone(), transport);

    assert_eq!(pipeline.recategorize_all().await?, 1);
    let first = store.query_articles(&ArticleQuery::default()).await?;

    assert_eq!(pipeline.recategorize_all().await?, 1);
    let second = store.query_articles(&ArticleQuery::default()).await?;

    assert_eq!(first.len(), 1);
    assert_eq!(first[0].identity_tags, second[0].identity_tags);
    assert_eq!(first[0].topics, second[0].topics);
    assert_eq!(first[0].category, second[0].category);
    // Paywall fields and timestamps are untouched by recategorization.
    assert_eq!(second[0].paywall_override, Some(true));
    assert_eq!(second[0].is_paywalled, article.is_paywalled);
    assert_eq!(second[0].scraped_at, first[0].scraped_at);
    Ok(())
}

#[tokio::test]
async fn query_filters_and_ordering() -> anyhow::Result<()> {
    let store = memory_store().await;

    let mut a = stored_article("https://example.org/a", "Al Jazeera", "Qatar");
    a.scraped_at = Utc::now() - Duration::days(3);
    let mut b = stored_article("https://example.org/b", "BBC News", "UK");
    b.scraped_at = Utc::now() - Duration::days(2);
    b.is_paywalled = true;
    let mut c = stored_article("https://example.org/c", "BBC News", "UK");
    c.scraped_at = Utc::now() - Duration::days(1);
    c.is_paywalled = true;
    // Manual curation marked this one free despite the detector.
    c.paywall_override = Some(false);
    assert!(b.effective_paywall());
    assert!(!c.effective_paywall());

    for article in [&a, &b, &c] {
        assert!(store.insert_article(article).await?);
    }

    // Ordered by scrape time descending.
    let all = store.query_articles(&ArticleQuery::default()).await?;
    let links: Vec<_> = all.iter().map(|r| r.link.as_str()).collect();
    assert_eq!(
        links,
        vec![
            "https://example.org/c",
            "https://example.org/b",
            "https://example.org/a"
        ]
    );

    // Source filter.
    let bbc = store
        .query_articles(&ArticleQuery {
            source: Some("BBC News".to_string()),
            ..ArticleQuery::default()
        })
        .await?;
    assert_eq!(bbc.len(), 2);

    // Country filter.
    let qatar = store
        .query_articles(&ArticleQuery {
            country: Some("Qatar".to_string()),
            ..ArticleQuery::default()
        })
        .await?;
    assert_eq!(qatar.len(), 1);

    // Topic filter (OR-combined against the serialized list).
    let by_topic = store
        .query_articles(&ArticleQuery {
            topics: vec![Topic::BodilyAutonomy],
            ..ArticleQuery::default()
        })
        .await?;
    assert_eq!(by_topic.len(), 3);
    let none = store
        .query_articles(&ArticleQuery {
            topics: vec![Topic::ClimateJustice],
            ..ArticleQuery::default()
        })
        .await?;
    assert!(none.is_empty());

    // Free-only honors the override over the detected flag: `a` was never
    // flagged and `c` is overridden free; `b` stays paywalled.
    let free = store
        .query_articles(&ArticleQuery {
            free_only: true,
            ..ArticleQuery::default()
        })
        .await?;
    let free_links: Vec<_> = free.iter().map(|r| r.link.as_str()).collect();
    assert_eq!(free_links, vec!["https://example.org/c", "https://example.org/a"]);

    // Free-text search over title/summary.
    let found = store
        .query_articles(&ArticleQuery {
            search: Some("reproductive".to_string()),
            ..ArticleQuery::default()
        })
        .await?;
    assert_eq!(found.len(), 3);

    // Scrape-time bounds and result cap.
    let recent = store
        .query_articles(&ArticleQuery {
            scraped_after: Some(Utc::now() - Duration::hours(60)),
            ..ArticleQuery::default()
        })
        .await?;
    assert_eq!(recent.len(), 2);
    let capped = store
        .query_articles(&ArticleQuery {
            limit: 1,
            ..ArticleQuery::default()
        })
        .await?;
    assert_eq!(capped.len(), 1);
    assert_eq!(capped[0].link, "https://example.org/c");
    Ok(())
}

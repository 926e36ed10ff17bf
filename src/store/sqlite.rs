//! SQLite-backed article store (local development backend).

use super::{
    encode_time, join_identity_tags, join_topics, ArticleRow, ArticleStore, TagSnapshot, TagUpdate,
};
use crate::types::{ArticleQuery, ClassifiedArticle, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;
use tracing::info;

pub struct SqliteStore {
    db: Pool<Sqlite>,
}

impl SqliteStore {
    /// Open (or create) a database at `url`, e.g. `sqlite://news.db`.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        // A single connection keeps all writes serialized, matching the
        // sequential-batch execution model.
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        info!("Connected to SQLite database: {}", url);
        Ok(Self { db })
    }

    /// Fresh in-memory database, used by the integration tests.
    pub async fn in_memory() -> Result<Self> {
        Self::connect("sqlite::memory:").await
    }
}

fn map_row(row: SqliteRow) -> Result<ClassifiedArticle> {
    ArticleRow {
        url_hash: row.try_get("url_hash")?,
        title: row.try_get("title")?,
        summary: row.try_get("summary")?,
        link: row.try_get("link")?,
        source: row.try_get("source")?,
        country: row.try_get("country")?,
        category: row.try_get("category")?,
        tags: row.try_get("tags")?,
        topics: row.try_get("topics")?,
        scraped_at: row.try_get("scraped_at")?,
        published_at: row.try_get("published_at")?,
        is_paywalled: row.try_get("is_paywalled")?,
        paywall_override: row.try_get("paywall_override")?,
        locale: row.try_get("locale")?,
    }
    .into_article()
}

#[async_trait]
impl ArticleStore for SqliteStore {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS articles (
                id               INTEGER PRIMARY KEY AUTOINCREMENT,
                url_hash         TEXT    NOT NULL UNIQUE,
                title            TEXT    NOT NULL,
                link             TEXT    NOT NULL,
                summary          TEXT    NOT NULL DEFAULT '',
                source           TEXT    NOT NULL,
                country          TEXT    NOT NULL DEFAULT '',
                category         TEXT    NOT NULL,
                tags             TEXT    NOT NULL DEFAULT '',
                topics           TEXT    NOT NULL DEFAULT '',
                scraped_at       TEXT    NOT NULL,
                published_at     TEXT,
                is_paywalled     INTEGER NOT NULL DEFAULT 0,
                paywall_override INTEGER,
                locale           TEXT    NOT NULL DEFAULT 'en'
            )
            "#,
        )
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn insert_article(&self, article: &ClassifiedArticle) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO articles
              (url_hash, title, link, summary, source, country, category,
               tags, topics, scraped_at, published_at, is_paywalled,
               paywall_override, locale)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&article.url_hash)
        .bind(&article.title)
        .bind(&article.link)
        .bind(&article.summary)
        .bind(&article.source)
        .bind(&article.country)
        .bind(&article.category)
        .bind(join_identity_tags(&article.identity_tags))
        .bind(join_topics(&article.topics))
        .bind(encode_time(article.scraped_at))
        .bind(article.published_at.map(encode_time))
        .bind(article.is_paywalled)
        .bind(article.paywall_override)
        .bind(&article.locale)
        .execute(&self.db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_scraped_before(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM articles WHERE scraped_at < ?")
            .bind(encode_time(cutoff))
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected())
    }

    async fn tag_snapshots(&self) -> Result<Vec<TagSnapshot>> {
        let rows = sqlx::query("SELECT url_hash, title, summary, source FROM articles")
            .fetch_all(&self.db)
            .await?;
        rows.into_iter()
            .map(|row| {
                Ok(TagSnapshot {
                    url_hash: row.try_get("url_hash")?,
                    title: row.try_get("title")?,
                    summary: row.try_get("summary")?,
                    source: row.try_get("source")?,
                })
            })
            .collect()
    }

    async fn update_tags(&self, update: &TagUpdate) -> Result<()> {
        sqlx::query("UPDATE articles SET category = ?, tags = ?, topics = ? WHERE url_hash = ?")
            .bind(&update.category)
            .bind(join_identity_tags(&update.identity_tags))
            .bind(join_topics(&update.topics))
            .bind(&update.url_hash)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    async fn query_articles(&self, query: &ArticleQuery) -> Result<Vec<ClassifiedArticle>> {
        let mut sql = String::from(
            "SELECT url_hash, title, link, summary, source, country, category, \
             tags, topics, scraped_at, published_at, is_paywalled, \
             paywall_override, locale FROM articles WHERE 1=1",
        );
        let mut binds: Vec<String> = Vec::new();

        if let Some(category) = &query.category {
            sql.push_str(" AND (category = ? OR tags LIKE ?)");
            binds.push(category.clone());
            binds.push(format!("%{category}%"));
        }
        if let Some(source) = &query.source {
            sql.push_str(" AND source = ?");
            binds.push(source.clone());
        }
        if let Some(country) = &query.country {
            sql.push_str(" AND country = ?");
            binds.push(country.clone());
        }
        if let Some(search) = &query.search {
            sql.push_str(" AND (title LIKE ? OR summary LIKE ?)");
            binds.push(format!("%{search}%"));
            binds.push(format!("%{search}%"));
        }
        if !query.topics.is_empty() {
            let clauses = vec!["topics LIKE ?"; query.topics.len()].join(" OR ");
            sql.push_str(&format!(" AND ({clauses})"));
            for topic in &query.topics {
                binds.push(format!("%{}%", topic.label()));
            }
        }
        if let Some(after) = query.scraped_after {
            sql.push_str(" AND scraped_at >= ?");
            binds.push(encode_time(after));
        }
        if let Some(before) = query.scraped_before {
            sql.push_str(" AND scraped_at <= ?");
            binds.push(encode_time(before));
        }
        if query.free_only {
            sql.push_str(" AND COALESCE(paywall_override, is_paywalled) = 0");
        }
        sql.push_str(" ORDER BY scraped_at DESC LIMIT ?");

        let mut q = sqlx::query(&sql);
        for bind in binds {
            q = q.bind(bind);
        }
        q = q.bind(query.limit);

        let rows = q.fetch_all(&self.db).await?;
        rows.into_iter().map(map_row).collect()
    }
}

// `decode_time` round-trips `encode_time`; pinned here because retention
// and range filters compare the encoded strings lexicographically.
#[cfg(test)]
mod tests {
    use super::super::decode_time;
    use super::*;

    #[test]
    fn encoded_timestamps_order_lexicographically() {
        let older = Utc::now() - chrono::Duration::days(200);
        let newer = Utc::now();
        assert!(encode_time(older) < encode_time(newer));
        let decoded = decode_time(&encode_time(newer)).unwrap();
        assert_eq!(encode_time(decoded), encode_time(newer));
    }
}

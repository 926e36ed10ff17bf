//! PostgreSQL-backed article store (production backend).

use super::{
    encode_time, join_identity_tags, join_topics, ArticleRow, ArticleStore, TagSnapshot, TagUpdate,
};
use crate::types::{ArticleQuery, ClassifiedArticle, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Pool, Postgres, Row};
use tracing::info;

pub struct PostgresStore {
    db: Pool<Postgres>,
}

impl PostgresStore {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let db = PgPool::connect(database_url).await?;
        info!("Connected to PostgreSQL database");
        Ok(Self { db })
    }
}

fn map_row(row: PgRow) -> Result<ClassifiedArticle> {
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
impl ArticleStore for PostgresStore {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS articles (
                id               BIGSERIAL PRIMARY KEY,
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
                is_paywalled     BOOLEAN NOT NULL DEFAULT FALSE,
                paywall_override BOOLEAN,
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
            INSERT INTO articles
              (url_hash, title, link, summary, source, country, category,
               tags, topics, scraped_at, published_at, is_paywalled,
               paywall_override, locale)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT (url_hash) DO NOTHING
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
        let result = sqlx::query("DELETE FROM articles WHERE scraped_at < $1")
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
        sqlx::query("UPDATE articles SET category = $1, tags = $2, topics = $3 WHERE url_hash = $4")
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
            binds.push(category.clone());
            let eq = binds.len();
            binds.push(format!("%{category}%"));
            let like = binds.len();
            sql.push_str(&format!(" AND (category = ${eq} OR tags LIKE ${like})"));
        }
        if let Some(source) = &query.source {
            binds.push(source.clone());
            sql.push_str(&format!(" AND source = ${}", binds.len()));
        }
        if let Some(country) = &query.country {
            binds.push(country.clone());
            sql.push_str(&format!(" AND country = ${}", binds.len()));
        }
        if let Some(search) = &query.search {
            binds.push(format!("%{search}%"));
            let title = binds.len();
            binds.push(format!("%{search}%"));
            let summary = binds.len();
            sql.push_str(&format!(
                " AND (title LIKE ${title} OR summary LIKE ${summary})"
            ));
        }
        if !query.topics.is_empty() {
            let mut clauses = Vec::with_capacity(query.topics.len());
            for topic in &query.topics {
                binds.push(format!("%{}%", topic.label()));
                clauses.push(format!("topics LIKE ${}", binds.len()));
            }
            sql.push_str(&format!(" AND ({})", clauses.join(" OR ")));
        }
        if let Some(after) = query.scraped_after {
            binds.push(encode_time(after));
            sql.push_str(&format!(" AND scraped_at >= ${}", binds.len()));
        }
        if let Some(before) = query.scraped_before {
            binds.push(encode_time(before));
            sql.push_str(&format!(" AND scraped_at <= ${}", binds.len()));
        }
        if query.free_only {
            sql.push_str(" AND COALESCE(paywall_override, is_paywalled) = FALSE");
        }
        sql.push_str(&format!(
            " ORDER BY scraped_at DESC LIMIT ${}",
            binds.len() + 1
        ));

        let mut q = sqlx::query(&sql);
        for bind in binds {
            q = q.bind(bind);
        }
        q = q.bind(query.limit);

        let rows = q.fetch_all(&self.db).await?;
        rows.into_iter().map(map_row).collect()
    }
}

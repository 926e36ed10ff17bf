use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use rightsfeed::{
    ArticleQuery, ArticleStore, HttpFeedFetcher, IngestionPipeline, PostgresStore, SqliteStore,
    Topic,
};
use std::sync::Arc;
use tracing::info;

const DEFAULT_SQLITE_URL: &str = "sqlite://news.db";

#[derive(Parser)]
#[command(name = "rightsfeed", about = "Social-justice news ingestion and classification")]
struct Cli {
    /// Postgres URL for production, otherwise a sqlite:// URL.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run one ingestion pass over all configured sources (default).
    Ingest,
    /// Re-apply the identity and topic classifiers to every stored row.
    Recategorize,
    /// Query stored articles and print them as JSON lines.
    Query {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        source: Option<String>,
        /// Free-text search over title and summary.
        #[arg(long)]
        search: Option<String>,
        /// Topic label; repeat for OR-combined filtering.
        #[arg(long = "topic")]
        topics: Vec<String>,
        #[arg(long)]
        country: Option<String>,
        /// RFC 3339 lower bound on scrape time.
        #[arg(long)]
        since: Option<DateTime<Utc>>,
        /// RFC 3339 upper bound on scrape time.
        #[arg(long)]
        until: Option<DateTime<Utc>>,
        /// Only rows whose effective paywall state is free.
        #[arg(long)]
        free_only: bool,
        #[arg(long, default_value_t = 200)]
        limit: i64,
    },
}

async fn open_store(database_url: Option<String>) -> anyhow::Result<Arc<dyn ArticleStore>> {
    match database_url {
        Some(url) if url.starts_with("postgres") => {
            let store = PostgresStore::connect(&url)
                .await
                .context("failed to connect to PostgreSQL")?;
            Ok(Arc::new(store))
        }
        Some(url) => {
            let store = SqliteStore::connect(&url)
                .await
                .with_context(|| format!("failed to open {url}"))?;
            Ok(Arc::new(store))
        }
        None => {
            let store = SqliteStore::connect(DEFAULT_SQLITE_URL)
                .await
                .context("failed to open local SQLite database")?;
            Ok(Arc::new(store))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let store = open_store(cli.database_url).await?;

    match cli.command.unwrap_or(Command::Ingest) {
        Command::Ingest => {
            let transport = Arc::new(HttpFeedFetcher::new()?);
            let pipeline = IngestionPipeline::new(store, transport);
            pipeline.bootstrap().await.context("bootstrap failed")?;
            let total = pipeline.run_pass().await?;
            info!("Done: {} new articles saved", total);
        }
        Command::Recategorize => {
            let transport = Arc::new(HttpFeedFetcher::new()?);
            let pipeline = IngestionPipeline::new(store, transport);
            let updated = pipeline.recategorize_all().await?;
            info!("Recategorized {} articles", updated);
        }
        Command::Query {
            category,
            source,
            search,
            topics,
            country,
            since,
            until,
            free_only,
            limit,
        } => {
            let topics = topics
                .iter()
                .map(|label| {
                    Topic::from_label(label)
                        .ok_or_else(|| anyhow::anyhow!("unknown topic label: {label}"))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;

            let query = ArticleQuery {
                category,
                source,
                search,
                topics,
                country,
                scraped_after: since,
                scraped_before: until,
                free_only,
                limit,
            };
            for article in store.query_articles(&query).await? {
                println!("{}", serde_json::to_string(&article)?);
            }
        }
    }

    Ok(())
}

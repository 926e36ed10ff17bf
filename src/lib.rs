// Public library surface for integration tests (and potential reuse).

pub mod classify;
pub mod fetch;
pub mod normalize;
pub mod pipeline;
pub mod registry;
pub mod store;
pub mod taxonomy;
pub mod types;

// ---- Re-exports for a stable public API ----
pub use fetch::{FeedTransport, HttpFeedFetcher, RawEntry};
pub use pipeline::IngestionPipeline;
pub use store::{ArticleStore, PostgresStore, SqliteStore};
pub use taxonomy::{IdentityTag, Topic};
pub use types::{ArticleCandidate, ArticleQuery, ClassifiedArticle, Result, RightsfeedError, Source};

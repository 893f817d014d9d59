//! Pipeline configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the ingestion and retrieval pipeline.
///
/// Built once at startup and carried by the context; components read it
/// through their constructors rather than re-deriving settings at call sites.
#[derive(Debug, Clone)]
pub struct NewsConfig {
    /// Ordered feed endpoint URLs
    pub feed_sources: Vec<String>,

    /// Maximum entries taken per feed
    pub per_feed_limit: usize,

    /// Minimum readable characters (trimmed) for an article to be stored
    pub min_content_chars: usize,

    /// Default number of results returned by `search`
    pub default_top_k: usize,

    /// Maximum characters in a result's context snippet
    pub snippet_chars: usize,

    /// Verdict cache time-to-live
    pub cache_ttl: Duration,

    /// Optional verdict cache capacity; `None` means unbounded
    pub cache_capacity: Option<usize>,

    /// Timeout for a feed download
    pub feed_timeout: Duration,

    /// Timeout for an article page download
    pub page_timeout: Duration,

    /// Timeout for one collaborator (oracle) call
    pub oracle_timeout: Duration,

    /// Timeout for one embedding call
    pub embed_timeout: Duration,

    /// Bounded concurrency for per-entry ingestion work
    pub ingest_concurrency: usize,

    /// Path of the flat-file store used when the vector backend is absent
    pub flat_store_path: PathBuf,

    /// User-Agent sent with feed and page requests
    pub user_agent: String,
}

impl NewsConfig {
    /// Create a config for the given feed endpoints with reference defaults.
    pub fn new(feed_sources: Vec<String>) -> Self {
        Self {
            feed_sources,
            per_feed_limit: 10,
            min_content_chars: 100,
            default_top_k: 3,
            snippet_chars: 500,
            cache_ttl: Duration::from_secs(3600),
            cache_capacity: None,
            feed_timeout: Duration::from_secs(15),
            page_timeout: Duration::from_secs(20),
            oracle_timeout: Duration::from_secs(30),
            embed_timeout: Duration::from_secs(30),
            ingest_concurrency: 4,
            flat_store_path: PathBuf::from("news_articles.json"),
            user_agent: "newscheck/0.1".to_string(),
        }
    }

    /// Set the per-feed entry cap.
    pub fn with_per_feed_limit(mut self, limit: usize) -> Self {
        self.per_feed_limit = limit;
        self
    }

    /// Set the minimum-content threshold.
    pub fn with_min_content_chars(mut self, chars: usize) -> Self {
        self.min_content_chars = chars;
        self
    }

    /// Set the verdict cache TTL.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Cap the verdict cache size.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = Some(capacity);
        self
    }

    /// Set the flat store file path.
    pub fn with_flat_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.flat_store_path = path.into();
        self
    }

    /// Set ingestion concurrency.
    pub fn with_ingest_concurrency(mut self, concurrency: usize) -> Self {
        self.ingest_concurrency = concurrency.max(1);
        self
    }
}

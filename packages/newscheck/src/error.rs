//! Typed errors for the news pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Each failure domain gets its
//! own enum; only `NewsError` crosses the public entry points.

use thiserror::Error;

/// Systemic errors surfaced by the public entry points.
///
/// Per-item failures during ingestion never become a `NewsError` - they are
/// tallied into the batch report. Only conditions that invalidate the whole
/// operation land here.
#[derive(Debug, Error)]
pub enum NewsError {
    /// No feed endpoints configured; ingestion cannot start
    #[error("no feed sources configured")]
    NoFeedsConfigured,

    /// Storage backend failed in a way that affects the whole operation
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    /// Query text was empty or unusable
    #[error("invalid query: {reason}")]
    InvalidQuery { reason: String },
}

/// Errors fetching or parsing a single feed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Feed body could not be parsed as RSS/Atom
    #[error("feed parse error for {url}: {message}")]
    Parse { url: String, message: String },

    /// Feed parsed but contained no entries
    #[error("empty feed: {url}")]
    EmptyFeed { url: String },
}

/// Errors extracting readable content for a single entry.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Page download failed
    #[error("HTTP error fetching {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Page download timed out
    #[error("timeout fetching: {url}")]
    Timeout { url: String },

    /// Both extractor tiers ran; neither produced enough content
    #[error("content below threshold for {url}: {chars} chars")]
    ContentTooShort { url: String, chars: usize },

    /// Entry URL was not a valid URL
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },
}

/// Errors from the article store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem I/O failed (flat backend)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted records could not be (de)serialized
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Embedding generation failed (vector backend)
    #[error("embedding error: {0}")]
    Embedding(String),

    /// This backend does not implement similarity queries
    #[error("similarity queries unsupported by {backend} backend")]
    UnsupportedQuery { backend: &'static str },
}

/// Errors from external trust collaborators (misinformation classifier,
/// fact-check oracle, credibility lookup).
#[derive(Debug, Error)]
pub enum OracleError {
    /// Collaborator unreachable or returned a transport-level failure
    #[error("collaborator unavailable: {0}")]
    Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Collaborator call exceeded its deadline
    #[error("collaborator call timed out")]
    Timeout,

    /// Collaborator responded with something unusable
    #[error("malformed collaborator response: {0}")]
    Malformed(String),
}

/// Result type alias for public pipeline operations.
pub type Result<T> = std::result::Result<T, NewsError>;

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result type alias for extraction operations.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Result type alias for collaborator calls.
pub type OracleResult<T> = std::result::Result<T, OracleError>;

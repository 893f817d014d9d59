//! Capability-Aware News Ingestion & Retrieval
//!
//! Ingests articles from a fixed set of feeds, extracts readable content,
//! annotates each article with trust signals (misinformation verdict,
//! fact-check verdict, source credibility), stores them, and retrieves the
//! most relevant articles for a free-text query together with those signals.
//!
//! # Design Philosophy
//!
//! **Degrade, don't fail.**
//!
//! Every expensive dependency - embedding encoder, vector index, remote
//! content extractor, trust oracles - is optional at runtime:
//!
//! - Capabilities are detected exactly once at startup and threaded through
//!   constructors; nothing re-probes at call sites.
//! - Storage is vector-backed when the full stack is present, flat-file
//!   otherwise - same contract either way.
//! - Retrieval uses embedding similarity when it can and keyword scoring
//!   when it must, including transparent mid-query fallback.
//! - Collaborator failures resolve to `Unknown` sentinels; per-item failures
//!   tally into a batch report instead of aborting the run.
//!
//! # Usage
//!
//! ```rust,ignore
//! use newscheck::{NewsConfig, NewsContext};
//!
//! let config = NewsConfig::new(vec![
//!     "https://example.com/feed.xml".to_string(),
//! ]);
//!
//! // No embedder/index supplied: flat storage + keyword retrieval.
//! let ctx = NewsContext::builder(config).build();
//!
//! let report = ctx.ingest(30, None).await?;
//! println!("ingested {} new articles", report.succeeded);
//!
//! for result in ctx.search("climate policy").await? {
//!     println!("{}: {} ({})", result.source_name, result.fact_verdict, result.credibility);
//! }
//! ```
//!
//! # Modules
//!
//! - [`capability`] - one-time detection of optional subsystems
//! - [`feeds`] - feed fetching (RSS/Atom to raw entries)
//! - [`extract`] - two-tier content extraction cascade
//! - [`stores`] - storage backends (vector, flat file)
//! - [`annotate`] - trust annotation behind TTL verdict caches
//! - [`retrieval`] - query answering with fallback ranking
//! - [`pipeline`] - the ingestion batch loop
//! - [`testing`] - mock implementations for tests

pub mod annotate;
pub mod capability;
pub mod context;
pub mod credibility;
pub mod error;
pub mod extract;
pub mod feeds;
pub mod pipeline;
pub mod retrieval;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{ExtractError, FetchError, NewsError, OracleError, Result, StoreError};
pub use types::{
    article::{Article, ExtractedContent, RawEntry},
    config::NewsConfig,
    result::QueryResult,
    verdict::{Credibility, FactVerdict, MisinfoVerdict},
};

pub use capability::CapabilitySet;
pub use context::{NewsContext, NewsContextBuilder};

// Re-export the trait seams
pub use extract::{ArticleExtractor, ExtractorCascade};
pub use feeds::{EntrySource, FeedFetcher};
pub use traits::{
    ArticleStore, CredibilityProvider, FactCheckOracle, InMemoryIndex, MisinfoOracle,
    TextEmbedder, VectorIndex,
};

// Re-export pipeline components
pub use annotate::{
    cache::{CacheEntry, CacheStats, VerdictCache},
    TrustAnnotator, ANALYSIS_FAILED,
};
pub use credibility::TableCredibility;
pub use pipeline::{ingest, IngestReport, ItemOutcome, ProgressFn};
pub use retrieval::{keyword_top_k, search};

// Re-export stores
pub use stores::{FlatFileStore, VectorStore};

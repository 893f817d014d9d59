//! Process-wide context - built once, passed explicitly.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::annotate::cache::CacheStats;
use crate::annotate::TrustAnnotator;
use crate::capability::CapabilitySet;
use crate::credibility::TableCredibility;
use crate::error::{OracleError, OracleResult, Result};
use crate::extract::{ArticleExtractor, ExtractorCascade};
use crate::feeds::{EntrySource, FeedFetcher};
use crate::pipeline::{self, IngestReport, ProgressFn};
use crate::retrieval;
use crate::stores::{FlatFileStore, VectorStore};
use crate::traits::{
    ArticleStore, CredibilityProvider, FactCheckOracle, MisinfoOracle, TextEmbedder, VectorIndex,
};
use crate::types::config::NewsConfig;
use crate::types::result::QueryResult;
use crate::types::verdict::{FactVerdict, MisinfoVerdict};

/// Shared pipeline context.
///
/// Replaces module-level singletons: capabilities are detected once at build
/// time, the storage backend is selected once, and every component is held
/// behind a trait so tests can substitute doubles. Constructed via
/// [`NewsContext::builder`].
pub struct NewsContext {
    pub(crate) config: NewsConfig,
    pub(crate) capabilities: CapabilitySet,
    pub(crate) store: Arc<dyn ArticleStore>,
    pub(crate) entry_source: Arc<dyn EntrySource>,
    pub(crate) extractor: Arc<dyn ArticleExtractor>,
    pub(crate) annotator: TrustAnnotator,
    pub(crate) credibility: Arc<dyn CredibilityProvider>,
}

impl NewsContext {
    /// Start building a context for the given configuration.
    pub fn builder(config: NewsConfig) -> NewsContextBuilder {
        NewsContextBuilder {
            config,
            embedder: None,
            vector_index: None,
            entry_source: None,
            extractor: None,
            misinfo: None,
            fact: None,
            credibility: None,
        }
    }

    /// Capabilities detected at build time.
    pub fn capabilities(&self) -> CapabilitySet {
        self.capabilities
    }

    /// The active storage backend.
    pub fn store(&self) -> &Arc<dyn ArticleStore> {
        &self.store
    }

    /// The pipeline configuration.
    pub fn config(&self) -> &NewsConfig {
        &self.config
    }

    /// Run one ingestion batch. See [`pipeline::ingest`].
    pub async fn ingest(
        &self,
        max_articles: usize,
        progress: Option<&ProgressFn>,
    ) -> Result<IngestReport> {
        pipeline::ingest(self, max_articles, progress).await
    }

    /// Search with the configured default result count.
    pub async fn search(&self, query: &str) -> Result<Vec<QueryResult>> {
        retrieval::search(self, query, self.config.default_top_k).await
    }

    /// Search with an explicit result count.
    pub async fn search_with_limit(&self, query: &str, top_k: usize) -> Result<Vec<QueryResult>> {
        retrieval::search(self, query, top_k).await
    }

    /// Combined verdict-cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        self.annotator.stats()
    }

    /// Sweep expired verdict-cache entries; returns how many were removed.
    pub fn clear_expired_cache(&self) -> usize {
        self.annotator.clear_expired()
    }
}

/// Builder for [`NewsContext`].
///
/// Optional subsystems left unset select the degraded tier: no embedder or no
/// vector index means the flat storage backend and keyword retrieval;
/// unconfigured collaborators make every annotation resolve to the `Unknown`
/// sentinel through the annotator's ordinary failure path.
pub struct NewsContextBuilder {
    config: NewsConfig,
    embedder: Option<Arc<dyn TextEmbedder>>,
    vector_index: Option<Arc<dyn VectorIndex>>,
    entry_source: Option<Arc<dyn EntrySource>>,
    extractor: Option<Arc<dyn ArticleExtractor>>,
    misinfo: Option<Arc<dyn MisinfoOracle>>,
    fact: Option<Arc<dyn FactCheckOracle>>,
    credibility: Option<Arc<dyn CredibilityProvider>>,
}

impl NewsContextBuilder {
    /// Supply an embedding encoder.
    pub fn with_embedder(mut self, embedder: Arc<dyn TextEmbedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Supply a vector index.
    pub fn with_vector_index(mut self, index: Arc<dyn VectorIndex>) -> Self {
        self.vector_index = Some(index);
        self
    }

    /// Replace the feed fetcher (tests).
    pub fn with_entry_source(mut self, source: Arc<dyn EntrySource>) -> Self {
        self.entry_source = Some(source);
        self
    }

    /// Replace the extractor cascade (tests).
    pub fn with_extractor(mut self, extractor: Arc<dyn ArticleExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Supply the misinformation classifier.
    pub fn with_misinfo_oracle(mut self, oracle: Arc<dyn MisinfoOracle>) -> Self {
        self.misinfo = Some(oracle);
        self
    }

    /// Supply the fact-check oracle.
    pub fn with_fact_check_oracle(mut self, oracle: Arc<dyn FactCheckOracle>) -> Self {
        self.fact = Some(oracle);
        self
    }

    /// Replace the credibility provider (defaults to the built-in table).
    pub fn with_credibility_provider(mut self, provider: Arc<dyn CredibilityProvider>) -> Self {
        self.credibility = Some(provider);
        self
    }

    /// Detect capabilities, select the storage backend, and assemble the
    /// context. Infallible: every absence has a defined degraded tier.
    pub fn build(self) -> NewsContext {
        let capabilities = CapabilitySet::detect(self.embedder.as_ref(), self.vector_index.as_ref());

        let store: Arc<dyn ArticleStore> = if capabilities.vector_search() {
            Arc::new(VectorStore::new(
                self.embedder.expect("embeddings capability implies encoder"),
                self.vector_index.expect("vector capability implies index"),
                self.config.embed_timeout,
            ))
        } else {
            Arc::new(FlatFileStore::new(&self.config.flat_store_path))
        };
        info!(backend = store.backend_name(), "storage backend selected");

        let entry_source = self.entry_source.unwrap_or_else(|| {
            Arc::new(FeedFetcher::new(
                self.config.feed_timeout,
                self.config.user_agent.clone(),
            ))
        });

        let extractor = self.extractor.unwrap_or_else(|| {
            Arc::new(ExtractorCascade::new(
                self.config.page_timeout,
                self.config.min_content_chars,
            ))
        });

        let misinfo = self
            .misinfo
            .unwrap_or_else(|| Arc::new(UnconfiguredOracle));
        let fact: Arc<dyn FactCheckOracle> = self
            .fact
            .unwrap_or_else(|| Arc::new(UnconfiguredOracle));

        let annotator = TrustAnnotator::new(
            misinfo,
            fact,
            self.config.cache_ttl,
            self.config.cache_capacity,
            self.config.oracle_timeout,
        );

        let credibility = self
            .credibility
            .unwrap_or_else(|| Arc::new(TableCredibility::new()));

        NewsContext {
            config: self.config,
            capabilities,
            store,
            entry_source,
            extractor,
            annotator,
            credibility,
        }
    }
}

/// Stand-in for a collaborator that was never configured.
///
/// Fails every call, which the annotator resolves to the `Unknown` sentinel -
/// an unconfigured oracle degrades exactly like an unreachable one.
struct UnconfiguredOracle;

#[async_trait]
impl MisinfoOracle for UnconfiguredOracle {
    async fn detect(&self, _text: &str) -> OracleResult<(MisinfoVerdict, String)> {
        Err(OracleError::Unavailable("not configured".into()))
    }
}

#[async_trait]
impl FactCheckOracle for UnconfiguredOracle {
    async fn check(&self, _claim: &str, _context: &str) -> OracleResult<(FactVerdict, String)> {
        Err(OracleError::Unavailable("not configured".into()))
    }
}

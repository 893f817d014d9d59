//! Mock implementations for testing pipelines without network or model calls.
//!
//! Each mock is deterministic, builder-configurable, and tracks how often it
//! was called so tests can assert on collaborator traffic.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::error::{ExtractError, ExtractResult, OracleError, OracleResult};
use crate::extract::ArticleExtractor;
use crate::feeds::EntrySource;
use crate::traits::{CredibilityProvider, FactCheckOracle, MisinfoOracle, TextEmbedder};
use crate::types::article::{ExtractedContent, RawEntry};
use crate::types::verdict::{Credibility, FactVerdict, MisinfoVerdict};

/// Entry source serving predefined entries, grouped by source label.
#[derive(Default)]
pub struct MockEntrySource {
    entries: Vec<RawEntry>,
}

impl MockEntrySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry to serve.
    pub fn with_entry(mut self, entry: RawEntry) -> Self {
        self.entries.push(entry);
        self
    }
}

#[async_trait]
impl EntrySource for MockEntrySource {
    async fn fetch(&self, _sources: &[String], per_feed_limit: usize) -> Vec<RawEntry> {
        // Apply the per-feed cap the way the real fetcher does, per label.
        let mut taken: HashMap<String, usize> = HashMap::new();
        self.entries
            .iter()
            .filter(|entry| {
                let count = taken.entry(entry.source_label.clone()).or_insert(0);
                *count += 1;
                *count <= per_feed_limit
            })
            .cloned()
            .collect()
    }
}

enum MockExtraction {
    Content(ExtractedContent),
    NetworkFailure,
}

/// Extractor serving predefined outcomes by URL.
#[derive(Default)]
pub struct MockExtractor {
    outcomes: HashMap<String, MockExtraction>,
    calls: AtomicUsize,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve content for a URL.
    pub fn with_content(
        mut self,
        url: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.outcomes.insert(
            url.into(),
            MockExtraction::Content(ExtractedContent {
                title: title.into(),
                text: text.into(),
            }),
        );
        self
    }

    /// Simulate a network failure for a URL.
    pub fn with_failure(mut self, url: impl Into<String>) -> Self {
        self.outcomes.insert(url.into(), MockExtraction::NetworkFailure);
        self
    }

    /// How many extractions were attempted.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArticleExtractor for MockExtractor {
    async fn extract(&self, entry: &RawEntry) -> ExtractResult<ExtractedContent> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.outcomes.get(&entry.url) {
            Some(MockExtraction::Content(content)) => Ok(content.clone()),
            Some(MockExtraction::NetworkFailure) | None => Err(ExtractError::Http {
                url: entry.url.clone(),
                source: "simulated network failure".into(),
            }),
        }
    }
}

/// Deterministic embedder: identical text always embeds identically.
pub struct MockEmbedder {
    dimension: usize,
    fail_after: Option<usize>,
    calls: AtomicUsize,
}

impl MockEmbedder {
    /// Create an embedder with the given dimension.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            fail_after: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Make every call fail (for degraded-path tests).
    pub fn failing(self) -> Self {
        self.failing_after(0)
    }

    /// Succeed for the first `calls` calls, then fail - simulates an encoder
    /// outage that begins after ingestion.
    pub fn failing_after(mut self, calls: usize) -> Self {
        self.fail_after = Some(calls);
        self
    }

    /// How many embeddings were requested.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextEmbedder for MockEmbedder {
    async fn embed(&self, text: &str) -> OracleResult<Vec<f32>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_after.is_some_and(|limit| call >= limit) {
            return Err(OracleError::Unavailable("simulated encoder outage".into()));
        }

        // Hash bytes seed the vector so equal text gives equal embeddings.
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        let hash = hasher.finalize();

        Ok((0..self.dimension)
            .map(|i| {
                let byte = hash[i % hash.len()] as f32;
                byte / 127.5 - 1.0
            })
            .collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Misinformation classifier returning a fixed verdict.
pub struct MockMisinfoOracle {
    verdict: MisinfoVerdict,
    explanation: String,
    fail: bool,
    calls: AtomicUsize,
}

impl Default for MockMisinfoOracle {
    fn default() -> Self {
        Self {
            verdict: MisinfoVerdict::LikelySafe,
            explanation: "Mock analysis: no indicators".to_string(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }
}

impl MockMisinfoOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the verdict returned by every call.
    pub fn with_verdict(mut self, verdict: MisinfoVerdict, explanation: impl Into<String>) -> Self {
        self.verdict = verdict;
        self.explanation = explanation.into();
        self
    }

    /// Make every call fail.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// How many classifications were requested.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MisinfoOracle for MockMisinfoOracle {
    async fn detect(&self, _text: &str) -> OracleResult<(MisinfoVerdict, String)> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(OracleError::Unavailable("simulated classifier outage".into()));
        }
        Ok((self.verdict, self.explanation.clone()))
    }
}

/// Fact-check oracle returning a fixed verdict, with optional per-claim
/// overrides.
pub struct MockFactChecker {
    verdict: FactVerdict,
    evidence: String,
    by_claim: RwLock<HashMap<String, (FactVerdict, String)>>,
    fail: bool,
    calls: AtomicUsize,
}

impl Default for MockFactChecker {
    fn default() -> Self {
        Self {
            verdict: FactVerdict::Unverified,
            evidence: "Mock evidence".to_string(),
            by_claim: RwLock::new(HashMap::new()),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }
}

impl MockFactChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the default verdict.
    pub fn with_verdict(mut self, verdict: FactVerdict, evidence: impl Into<String>) -> Self {
        self.verdict = verdict;
        self.evidence = evidence.into();
        self
    }

    /// Override the verdict for one claim.
    pub fn with_claim(
        self,
        claim: impl Into<String>,
        verdict: FactVerdict,
        evidence: impl Into<String>,
    ) -> Self {
        self.by_claim
            .write()
            .unwrap()
            .insert(claim.into(), (verdict, evidence.into()));
        self
    }

    /// Make every call fail.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// How many checks were requested.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FactCheckOracle for MockFactChecker {
    async fn check(&self, claim: &str, _context: &str) -> OracleResult<(FactVerdict, String)> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(OracleError::Unavailable("simulated oracle outage".into()));
        }
        if let Some(hit) = self.by_claim.read().unwrap().get(claim) {
            return Ok(hit.clone());
        }
        Ok((self.verdict, self.evidence.clone()))
    }
}

/// Credibility provider with per-source scores.
#[derive(Default)]
pub struct MockCredibility {
    scores: HashMap<String, f32>,
    fail: bool,
}

impl MockCredibility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the score for a source label.
    pub fn with_score(mut self, source: impl Into<String>, score: f32) -> Self {
        self.scores.insert(source.into(), score);
        self
    }

    /// Make every call fail.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

#[async_trait]
impl CredibilityProvider for MockCredibility {
    async fn credibility(&self, source_name: &str) -> OracleResult<Credibility> {
        if self.fail {
            return Err(OracleError::Unavailable("simulated lookup outage".into()));
        }
        Ok(self
            .scores
            .get(source_name)
            .map(|s| Credibility::Score(*s))
            .unwrap_or(Credibility::NotAvailable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_embedder_is_deterministic() {
        let embedder = MockEmbedder::new(16);
        let a = embedder.embed("same text").await.unwrap();
        let b = embedder.embed("same text").await.unwrap();
        let c = embedder.embed("different").await.unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 16);
        assert_eq!(embedder.call_count(), 3);
    }

    #[tokio::test]
    async fn mock_entry_source_applies_per_feed_cap() {
        let source = MockEntrySource::new()
            .with_entry(RawEntry::new("https://a.com/1", "feedA"))
            .with_entry(RawEntry::new("https://a.com/2", "feedA"))
            .with_entry(RawEntry::new("https://a.com/3", "feedA"))
            .with_entry(RawEntry::new("https://b.com/1", "feedB"));

        let entries = source.fetch(&[], 2).await;
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2].url, "https://b.com/1");
    }
}

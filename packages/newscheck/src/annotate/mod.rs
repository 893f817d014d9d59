//! Trust annotation - cache-fronted calls to the external collaborators.

pub mod cache;

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::OracleError;
use crate::traits::{FactCheckOracle, MisinfoOracle};
use crate::types::verdict::{FactVerdict, MisinfoVerdict};
use cache::{fingerprint, CacheStats, VerdictCache};

/// Fixed explanation returned with the `Unknown` sentinel on collaborator
/// failure.
pub const ANALYSIS_FAILED: &str = "Analysis failed";

/// Wraps the misinformation classifier and fact-check oracle, isolating
/// their failures behind sentinel verdicts and fronting both with TTL caches.
///
/// A collaborator failure never propagates: callers get `Unknown` plus
/// [`ANALYSIS_FAILED`] and proceed uninterrupted. Failures and `Unknown`
/// verdicts are never cached.
pub struct TrustAnnotator {
    misinfo: Arc<dyn MisinfoOracle>,
    fact: Arc<dyn FactCheckOracle>,
    misinfo_cache: VerdictCache<MisinfoVerdict>,
    fact_cache: VerdictCache<FactVerdict>,
    oracle_timeout: Duration,
}

impl TrustAnnotator {
    /// Create an annotator over the given collaborators.
    pub fn new(
        misinfo: Arc<dyn MisinfoOracle>,
        fact: Arc<dyn FactCheckOracle>,
        cache_ttl: Duration,
        cache_capacity: Option<usize>,
        oracle_timeout: Duration,
    ) -> Self {
        let mut misinfo_cache = VerdictCache::new(cache_ttl);
        let mut fact_cache = VerdictCache::new(cache_ttl);
        if let Some(capacity) = cache_capacity {
            misinfo_cache = misinfo_cache.with_capacity(capacity);
            fact_cache = fact_cache.with_capacity(capacity);
        }

        Self {
            misinfo,
            fact,
            misinfo_cache,
            fact_cache,
            oracle_timeout,
        }
    }

    /// Misinformation verdict for article text.
    pub async fn annotate_misinfo(&self, text: &str) -> (MisinfoVerdict, String) {
        if text.trim().is_empty() {
            return (
                MisinfoVerdict::Unknown,
                "Cannot analyze empty text".to_string(),
            );
        }

        let fp = fingerprint(&[text]);
        if let Some((verdict, explanation)) = self.misinfo_cache.get(&fp) {
            debug!(fingerprint = %fp, "misinfo cache hit");
            return (verdict, explanation);
        }

        let outcome = tokio::time::timeout(self.oracle_timeout, self.misinfo.detect(text)).await;
        match flatten(outcome) {
            Ok((verdict, explanation)) => {
                if !verdict.is_unknown() {
                    self.misinfo_cache.put(fp, verdict, explanation.clone());
                }
                (verdict, explanation)
            }
            Err(e) => {
                warn!(error = %e, "misinformation classifier failed");
                (MisinfoVerdict::Unknown, ANALYSIS_FAILED.to_string())
            }
        }
    }

    /// Fact-check verdict for a claim against context text.
    pub async fn annotate_fact_check(&self, claim: &str, context: &str) -> (FactVerdict, String) {
        if claim.trim().is_empty() || context.trim().is_empty() {
            return (
                FactVerdict::Unknown,
                "Cannot analyze empty claim or context".to_string(),
            );
        }

        let fp = fingerprint(&[claim, context]);
        if let Some((verdict, evidence)) = self.fact_cache.get(&fp) {
            debug!(fingerprint = %fp, "fact-check cache hit");
            return (verdict, evidence);
        }

        let outcome =
            tokio::time::timeout(self.oracle_timeout, self.fact.check(claim, context)).await;
        match flatten(outcome) {
            Ok((verdict, evidence)) => {
                if !verdict.is_unknown() {
                    self.fact_cache.put(fp, verdict, evidence.clone());
                }
                (verdict, evidence)
            }
            Err(e) => {
                warn!(error = %e, "fact-check oracle failed");
                (FactVerdict::Unknown, ANALYSIS_FAILED.to_string())
            }
        }
    }

    /// Misinformation cache handle (stats, sweeps).
    pub fn misinfo_cache(&self) -> &VerdictCache<MisinfoVerdict> {
        &self.misinfo_cache
    }

    /// Fact-check cache handle (stats, sweeps).
    pub fn fact_cache(&self) -> &VerdictCache<FactVerdict> {
        &self.fact_cache
    }

    /// Combined statistics across both caches.
    pub fn stats(&self) -> CacheStats {
        let m = self.misinfo_cache.stats();
        let f = self.fact_cache.stats();
        CacheStats {
            total_entries: m.total_entries + f.total_entries,
            valid_entries: m.valid_entries + f.valid_entries,
        }
    }

    /// Sweep expired entries from both caches; returns total removed.
    pub fn clear_expired(&self) -> usize {
        self.misinfo_cache.clear_expired() + self.fact_cache.clear_expired()
    }
}

fn flatten<T>(
    outcome: Result<Result<T, OracleError>, tokio::time::error::Elapsed>,
) -> Result<T, OracleError> {
    match outcome {
        Ok(inner) => inner,
        Err(_) => Err(OracleError::Timeout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockFactChecker, MockMisinfoOracle};

    fn annotator(
        misinfo: MockMisinfoOracle,
        fact: MockFactChecker,
    ) -> (TrustAnnotator, Arc<MockMisinfoOracle>, Arc<MockFactChecker>) {
        let misinfo = Arc::new(misinfo);
        let fact = Arc::new(fact);
        let annotator = TrustAnnotator::new(
            misinfo.clone(),
            fact.clone(),
            Duration::from_secs(3600),
            None,
            Duration::from_secs(5),
        );
        (annotator, misinfo, fact)
    }

    #[tokio::test]
    async fn identical_text_calls_classifier_once() {
        let (annotator, misinfo, _) = annotator(
            MockMisinfoOracle::new().with_verdict(MisinfoVerdict::LikelySafe, "clean"),
            MockFactChecker::new(),
        );

        let first = annotator.annotate_misinfo("same article text").await;
        let second = annotator.annotate_misinfo("same article text").await;

        assert_eq!(first.0, MisinfoVerdict::LikelySafe);
        assert_eq!(first, second);
        assert_eq!(misinfo.call_count(), 1);
    }

    #[tokio::test]
    async fn expired_entry_calls_classifier_again() {
        let (annotator, misinfo, _) = annotator(
            MockMisinfoOracle::new().with_verdict(MisinfoVerdict::LikelySafe, "clean"),
            MockFactChecker::new(),
        );

        annotator.annotate_misinfo("text").await;

        // Backdate the cached entry past its TTL.
        let fp = fingerprint(&["text"]);
        let stale = cache::CacheEntry::new(
            MisinfoVerdict::LikelySafe,
            "clean",
            chrono::Duration::hours(1),
        )
        .with_created_at(chrono::Utc::now() - chrono::Duration::hours(2));
        annotator.misinfo_cache().put_entry(fp, stale);

        annotator.annotate_misinfo("text").await;
        assert_eq!(misinfo.call_count(), 2);
    }

    #[tokio::test]
    async fn failure_returns_sentinel_and_is_not_cached() {
        let (annotator, misinfo, _) =
            annotator(MockMisinfoOracle::new().failing(), MockFactChecker::new());

        let (verdict, explanation) = annotator.annotate_misinfo("text").await;
        assert_eq!(verdict, MisinfoVerdict::Unknown);
        assert_eq!(explanation, ANALYSIS_FAILED);
        assert_eq!(annotator.misinfo_cache().stats().total_entries, 0);

        // A second call hits the collaborator again - no cached failure.
        annotator.annotate_misinfo("text").await;
        assert_eq!(misinfo.call_count(), 2);
    }

    #[tokio::test]
    async fn fact_check_caches_by_claim_and_context() {
        let (annotator, _, fact) = annotator(
            MockMisinfoOracle::new(),
            MockFactChecker::new().with_verdict(FactVerdict::LikelyTrue, "supported"),
        );

        annotator.annotate_fact_check("claim", "context one").await;
        annotator.annotate_fact_check("claim", "context one").await;
        annotator.annotate_fact_check("claim", "context two").await;

        assert_eq!(fact.call_count(), 2);
    }

    #[tokio::test]
    async fn empty_input_short_circuits() {
        let (annotator, misinfo, fact) = annotator(MockMisinfoOracle::new(), MockFactChecker::new());

        let (verdict, _) = annotator.annotate_misinfo("   ").await;
        assert_eq!(verdict, MisinfoVerdict::Unknown);

        let (verdict, _) = annotator.annotate_fact_check("", "context").await;
        assert_eq!(verdict, FactVerdict::Unknown);

        assert_eq!(misinfo.call_count(), 0);
        assert_eq!(fact.call_count(), 0);
    }
}

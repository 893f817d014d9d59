//! TTL-keyed verdict cache.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use sha2::{Digest, Sha256};

/// Fingerprint annotation input: SHA-256 over the parts, unit-separated so
/// `("ab", "c")` and `("a", "bc")` cannot collide.
pub fn fingerprint(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            hasher.update([0x1f]);
        }
        hasher.update(part.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}

/// One cached verdict.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The cached verdict
    pub verdict: V,

    /// Explanation or evidence text that accompanied it
    pub explanation: String,

    /// When the entry was stored
    pub created_at: DateTime<Utc>,

    /// Lifetime after which the entry is logically expired
    pub ttl: Duration,
}

impl<V> CacheEntry<V> {
    /// Create an entry stamped now.
    pub fn new(verdict: V, explanation: impl Into<String>, ttl: Duration) -> Self {
        Self {
            verdict,
            explanation: explanation.into(),
            created_at: Utc::now(),
            ttl,
        }
    }

    /// Backdate the entry (expiry tests).
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Whether `created_at + ttl` has passed.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.created_at + self.ttl
    }
}

/// Cache statistics for operator monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Entries physically present, expired or not
    pub total_entries: usize,

    /// Entries still within TTL
    pub valid_entries: usize,
}

/// TTL-keyed cache in front of a trust collaborator.
///
/// A fingerprint maps to at most one live entry; writes are last-writer-wins
/// and writers on different fingerprints do not block each other. Expired
/// entries stay physically present until [`VerdictCache::clear_expired`]
/// sweeps them or capacity eviction removes them - normal annotation traffic
/// never deletes.
pub struct VerdictCache<V> {
    entries: DashMap<String, CacheEntry<V>>,
    ttl: Duration,
    max_entries: Option<usize>,
}

impl<V: Clone> VerdictCache<V> {
    /// Create an unbounded cache with the given TTL.
    pub fn new(ttl: std::time::Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl: Duration::from_std(ttl).unwrap_or_else(|_| Duration::hours(1)),
            max_entries: None,
        }
    }

    /// Cap the number of entries.
    pub fn with_capacity(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries);
        self
    }

    /// Look up a fingerprint; expired entries miss but are not removed.
    pub fn get(&self, fingerprint: &str) -> Option<(V, String)> {
        self.entries.get(fingerprint).and_then(|entry| {
            if entry.is_expired() {
                None
            } else {
                Some((entry.verdict.clone(), entry.explanation.clone()))
            }
        })
    }

    /// Store a verdict with a fresh `created_at`.
    pub fn put(&self, fingerprint: impl Into<String>, verdict: V, explanation: impl Into<String>) {
        self.put_entry(fingerprint, CacheEntry::new(verdict, explanation, self.ttl));
    }

    /// Store a pre-built entry (callers that need to control `created_at`).
    pub fn put_entry(&self, fingerprint: impl Into<String>, entry: CacheEntry<V>) {
        let fingerprint = fingerprint.into();

        if let Some(max) = self.max_entries {
            if !self.entries.contains_key(&fingerprint) && self.entries.len() >= max {
                self.evict_one();
            }
        }

        self.entries.insert(fingerprint, entry);
    }

    /// Sweep entries past their TTL; returns how many were removed.
    pub fn clear_expired(&self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        before - self.entries.len()
    }

    /// Current statistics.
    pub fn stats(&self) -> CacheStats {
        let total_entries = self.entries.len();
        let valid_entries = self
            .entries
            .iter()
            .filter(|entry| !entry.is_expired())
            .count();
        CacheStats {
            total_entries,
            valid_entries,
        }
    }

    /// Make room for one insert: sweep expired entries first, then fall back
    /// to evicting the oldest.
    fn evict_one(&self) {
        if self.clear_expired() > 0 {
            return;
        }

        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.created_at)
            .map(|entry| entry.key().clone());

        if let Some(key) = oldest {
            self.entries.remove(&key);
        }
    }
}

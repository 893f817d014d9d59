//! Storage contract shared by the vector and flat backends.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::article::Article;

/// Deduplicating article store.
///
/// Backend selection happens exactly once at startup; from then on callers
/// see the same contract regardless of which backend is active. `add` is the
/// authoritative dedup point and must be atomic with respect to the
/// uniqueness check - two concurrent inserts of one URL cannot both succeed.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Insert an article keyed by URL.
    ///
    /// Returns `false` without mutation when the URL already exists
    /// (first write wins); `true` after persisting a new article.
    async fn add(&self, article: Article) -> StoreResult<bool>;

    /// Whether an article with this URL is already stored.
    ///
    /// A cheap pre-check so the pipeline can skip annotation work for known
    /// URLs; `add` still performs its own atomic check.
    async fn contains(&self, url: &str) -> StoreResult<bool>;

    /// Return the `top_k` most similar articles with their scores.
    ///
    /// Only the vector backend implements this; the flat backend returns
    /// [`crate::error::StoreError::UnsupportedQuery`] and relies on the
    /// retrieval engine's keyword path.
    async fn query_similar(&self, query: &str, top_k: usize) -> StoreResult<Vec<(Article, f32)>>;

    /// Full scan in stable insertion order.
    async fn load_all(&self) -> StoreResult<Vec<Article>>;

    /// Backend name for logging.
    fn backend_name(&self) -> &'static str;
}

/// Cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_similarity_basics() {
        let a = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &[1.0, 0.0, 0.0]) - 1.0).abs() < 0.001);
        assert!(cosine_similarity(&a, &[0.0, 1.0, 0.0]).abs() < 0.001);
        assert!((cosine_similarity(&a, &[-1.0, 0.0, 0.0]) + 1.0).abs() < 0.001);
        assert_eq!(cosine_similarity(&a, &[1.0, 0.0]), 0.0);
    }
}

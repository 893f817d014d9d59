//! Vector index trait and the in-process implementation.

use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::RwLock;

use crate::error::StoreResult;
use crate::traits::store::cosine_similarity;
use crate::types::article::Article;

/// Nearest-neighbor index over article embeddings.
///
/// An optional subsystem, independent of the embedding encoder: both must be
/// present for the vector storage backend to be selected.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Insert an article with its embedding, keyed by URL.
    ///
    /// Returns `false` without mutation when the URL already exists. The
    /// existence check and insert must be atomic.
    async fn insert(&self, article: Article, embedding: Vec<f32>) -> StoreResult<bool>;

    /// Return up to `top_k` articles nearest to `embedding`, best first.
    async fn search(&self, embedding: &[f32], top_k: usize) -> StoreResult<Vec<(Article, f32)>>;

    /// Whether an article with this URL is indexed.
    async fn contains(&self, url: &str) -> StoreResult<bool>;

    /// All indexed articles in insertion order.
    async fn all(&self) -> StoreResult<Vec<Article>>;
}

struct IndexedArticle {
    article: Article,
    embedding: Vec<f32>,
}

/// In-process vector index.
///
/// Holds everything in memory behind one lock; insertion order is preserved
/// so full scans are deterministic. Suitable for the small corpora this
/// pipeline handles - a remote index can implement [`VectorIndex`] without
/// touching the pipeline.
#[derive(Default)]
pub struct InMemoryIndex {
    entries: RwLock<IndexMap<String, IndexedArticle>>,
}

impl InMemoryIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of indexed articles.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl VectorIndex for InMemoryIndex {
    async fn insert(&self, article: Article, embedding: Vec<f32>) -> StoreResult<bool> {
        let mut entries = self.entries.write().unwrap();
        if entries.contains_key(&article.url) {
            return Ok(false);
        }
        entries.insert(
            article.url.clone(),
            IndexedArticle { article, embedding },
        );
        Ok(true)
    }

    async fn search(&self, embedding: &[f32], top_k: usize) -> StoreResult<Vec<(Article, f32)>> {
        let entries = self.entries.read().unwrap();

        let mut scored: Vec<_> = entries
            .values()
            .map(|e| {
                let score = cosine_similarity(embedding, &e.embedding);
                (e.article.clone(), score)
            })
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);

        Ok(scored)
    }

    async fn contains(&self, url: &str) -> StoreResult<bool> {
        Ok(self.entries.read().unwrap().contains_key(url))
    }

    async fn all(&self) -> StoreResult<Vec<Article>> {
        Ok(self
            .entries
            .read()
            .unwrap()
            .values()
            .map(|e| e.article.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(url: &str) -> Article {
        Article::new(url, "title", "body text", "Feed")
    }

    #[tokio::test]
    async fn insert_is_first_write_wins() {
        let index = InMemoryIndex::new();

        let first = article("https://example.com/a");
        let second = Article::new("https://example.com/a", "other", "other body", "Feed");

        assert!(index.insert(first, vec![1.0, 0.0]).await.unwrap());
        assert!(!index.insert(second, vec![0.0, 1.0]).await.unwrap());

        let all = index.all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "title");
    }

    #[tokio::test]
    async fn search_ranks_by_similarity() {
        let index = InMemoryIndex::new();
        index
            .insert(article("https://example.com/a"), vec![1.0, 0.0])
            .await
            .unwrap();
        index
            .insert(article("https://example.com/b"), vec![0.0, 1.0])
            .await
            .unwrap();

        let results = index.search(&[0.9, 0.1], 10).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0.url, "https://example.com/a");
        assert!(results[0].1 > results[1].1);
    }

    #[tokio::test]
    async fn all_preserves_insertion_order() {
        let index = InMemoryIndex::new();
        for i in 0..5 {
            index
                .insert(article(&format!("https://example.com/{i}")), vec![i as f32])
                .await
                .unwrap();
        }

        let urls: Vec<_> = index.all().await.unwrap().into_iter().map(|a| a.url).collect();
        let expected: Vec<_> = (0..5).map(|i| format!("https://example.com/{i}")).collect();
        assert_eq!(urls, expected);
    }
}

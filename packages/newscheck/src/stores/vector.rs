//! Vector-backed article store.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{StoreError, StoreResult};
use crate::traits::{ArticleStore, TextEmbedder, VectorIndex};
use crate::types::article::Article;

/// Article store backed by an embedding encoder and a vector index.
///
/// `add` embeds `full_text` before insert; `query_similar` embeds the query
/// and delegates nearest-neighbor search to the index. Selected at startup
/// only when both optional subsystems are present.
pub struct VectorStore {
    embedder: Arc<dyn TextEmbedder>,
    index: Arc<dyn VectorIndex>,
    embed_timeout: Duration,
}

impl VectorStore {
    /// Create a store over the given encoder and index.
    pub fn new(
        embedder: Arc<dyn TextEmbedder>,
        index: Arc<dyn VectorIndex>,
        embed_timeout: Duration,
    ) -> Self {
        Self {
            embedder,
            index,
            embed_timeout,
        }
    }

    async fn embed(&self, text: &str) -> StoreResult<Vec<f32>> {
        tokio::time::timeout(self.embed_timeout, self.embedder.embed(text))
            .await
            .map_err(|_| StoreError::Embedding("embedding call timed out".to_string()))?
            .map_err(|e| StoreError::Embedding(e.to_string()))
    }
}

#[async_trait]
impl ArticleStore for VectorStore {
    async fn add(&self, article: Article) -> StoreResult<bool> {
        // Cheap pre-check saves an embedding call for known URLs; the index
        // insert below remains the atomic dedup point.
        if self.index.contains(&article.url).await? {
            return Ok(false);
        }

        let embedding = self.embed(&article.full_text).await?;
        let article = article.with_embedding(embedding.clone());
        self.index.insert(article, embedding).await
    }

    async fn contains(&self, url: &str) -> StoreResult<bool> {
        self.index.contains(url).await
    }

    async fn query_similar(&self, query: &str, top_k: usize) -> StoreResult<Vec<(Article, f32)>> {
        let embedding = self.embed(query).await?;
        self.index.search(&embedding, top_k).await
    }

    async fn load_all(&self) -> StoreResult<Vec<Article>> {
        self.index.all().await
    }

    fn backend_name(&self) -> &'static str {
        "vector"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockEmbedder;
    use crate::traits::InMemoryIndex;

    fn store() -> VectorStore {
        VectorStore::new(
            Arc::new(MockEmbedder::new(8)),
            Arc::new(InMemoryIndex::new()),
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn add_embeds_and_dedups() {
        let store = store();
        let a = Article::new("https://example.com/a", "First", "first body", "Feed");
        let b = Article::new("https://example.com/a", "Second", "second body", "Feed");

        assert!(store.add(a).await.unwrap());
        assert!(!store.add(b).await.unwrap());

        let all = store.load_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "First");
        assert!(all[0].embedding.is_some());
    }

    #[tokio::test]
    async fn query_similar_returns_scored_articles() {
        let store = store();
        store
            .add(Article::new("https://example.com/a", "T", "climate change report", "Feed"))
            .await
            .unwrap();

        // Identical text embeds identically under the deterministic mock, so
        // the stored article comes back with a perfect score.
        let results = store.query_similar("climate change report", 3).await.unwrap();
        assert_eq!(results.len(), 1);
        assert!((results[0].1 - 1.0).abs() < 0.001);
    }
}

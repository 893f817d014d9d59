//! Flat-file article store.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::ArticleStore;
use crate::types::article::Article;

/// Article store persisted as a JSON array of records.
///
/// The fallback backend when the vector stack is absent. Every mutation is
/// load, append if new, rewrite the full set - acceptable because the corpus
/// is small and writes are infrequent relative to reads. A single mutex
/// serializes the load-check-append-save sequence, which is what makes `add`
/// atomic with respect to the uniqueness check.
pub struct FlatFileStore {
    path: PathBuf,
    file_lock: Mutex<()>,
}

impl FlatFileStore {
    /// Open a store at the given path; the file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file_lock: Mutex::new(()),
        }
    }

    async fn read_records(&self) -> StoreResult<Vec<Article>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn write_records(&self, records: &[Article]) -> StoreResult<()> {
        let bytes = serde_json::to_vec(records)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl ArticleStore for FlatFileStore {
    async fn add(&self, article: Article) -> StoreResult<bool> {
        let _guard = self.file_lock.lock().await;

        let mut records = self.read_records().await?;
        if records.iter().any(|a| a.url == article.url) {
            return Ok(false);
        }

        debug!(url = %article.url, "appending article to flat store");
        records.push(article);
        self.write_records(&records).await?;
        Ok(true)
    }

    async fn contains(&self, url: &str) -> StoreResult<bool> {
        let _guard = self.file_lock.lock().await;
        Ok(self.read_records().await?.iter().any(|a| a.url == url))
    }

    async fn query_similar(&self, _query: &str, _top_k: usize) -> StoreResult<Vec<(Article, f32)>> {
        Err(StoreError::UnsupportedQuery { backend: "flat" })
    }

    async fn load_all(&self) -> StoreResult<Vec<Article>> {
        let _guard = self.file_lock.lock().await;
        self.read_records().await
    }

    fn backend_name(&self) -> &'static str {
        "flat"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::verdict::MisinfoVerdict;

    fn store_in(dir: &tempfile::TempDir) -> FlatFileStore {
        FlatFileStore::new(dir.path().join("articles.json"))
    }

    #[tokio::test]
    async fn load_all_is_empty_before_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_persists_and_dedups_first_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let first = Article::new("https://example.com/a", "First", "first body", "BBC")
            .with_misinfo(MisinfoVerdict::LikelySafe, "no indicators");
        let second = Article::new("https://example.com/a", "Second", "second body", "BBC");

        assert!(store.add(first).await.unwrap());
        assert!(!store.add(second).await.unwrap());

        // Re-open from disk: exactly one record, the first writer's content.
        let reopened = store_in(&dir);
        let all = reopened.load_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "First");
        assert_eq!(all[0].misinfo_verdict, MisinfoVerdict::LikelySafe);
    }

    #[tokio::test]
    async fn load_all_preserves_append_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        for i in 0..4 {
            let url = format!("https://example.com/{i}");
            store
                .add(Article::new(url, format!("t{i}"), "body", "Feed"))
                .await
                .unwrap();
        }

        let urls: Vec<_> = store.load_all().await.unwrap().into_iter().map(|a| a.url).collect();
        let expected: Vec<_> = (0..4).map(|i| format!("https://example.com/{i}")).collect();
        assert_eq!(urls, expected);
    }

    #[tokio::test]
    async fn query_similar_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let err = store.query_similar("anything", 3).await.unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedQuery { backend: "flat" }));
    }

    #[tokio::test]
    async fn concurrent_adds_of_same_url_insert_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = std::sync::Arc::new(store_in(&dir));

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let article =
                    Article::new("https://example.com/same", format!("writer {i}"), "body", "Feed");
                store.add(article).await.unwrap()
            }));
        }

        let mut inserted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                inserted += 1;
            }
        }

        assert_eq!(inserted, 1);
        assert_eq!(store.load_all().await.unwrap().len(), 1);
    }
}

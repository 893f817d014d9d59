//! Text embedding trait.

use async_trait::async_trait;

use crate::error::OracleResult;

/// Embedding encoder for semantic similarity.
///
/// An optional subsystem: its absence selects the flat storage backend and
/// the keyword retrieval path. Implementations wrap a local model or a remote
/// encoding service and own their transport details; the caller applies the
/// configured deadline around each call.
#[async_trait]
pub trait TextEmbedder: Send + Sync {
    /// Generate an embedding for the given text.
    async fn embed(&self, text: &str) -> OracleResult<Vec<f32>>;

    /// Embedding dimension, for index sizing and sanity checks.
    fn dimension(&self) -> usize;
}

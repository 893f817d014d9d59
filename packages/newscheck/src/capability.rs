//! One-time detection of optional subsystems.

use std::sync::Arc;

use tracing::info;

use crate::traits::{TextEmbedder, VectorIndex};

/// Immutable set of optional subsystems detected at startup.
///
/// Computed exactly once when the context is built and threaded through
/// constructors; nothing re-probes at call sites. Absence of a subsystem is
/// a normal configuration state, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilitySet {
    /// An embedding encoder is available
    pub embeddings: bool,

    /// A vector index is available
    pub vector_index: bool,
}

impl CapabilitySet {
    /// No optional subsystems present.
    pub const NONE: CapabilitySet = CapabilitySet {
        embeddings: false,
        vector_index: false,
    };

    /// Probe which optional subsystems were supplied.
    pub fn detect(
        embedder: Option<&Arc<dyn TextEmbedder>>,
        index: Option<&Arc<dyn VectorIndex>>,
    ) -> Self {
        let caps = Self {
            embeddings: embedder.is_some(),
            vector_index: index.is_some(),
        };
        info!(
            embeddings = caps.embeddings,
            vector_index = caps.vector_index,
            "capability detection complete"
        );
        caps
    }

    /// Whether similarity storage and retrieval can run.
    ///
    /// Requires both the encoder and the index; with either one missing the
    /// pipeline uses the flat backend and keyword scoring.
    pub fn vector_search(&self) -> bool {
        self.embeddings && self.vector_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_search_requires_both_subsystems() {
        assert!(!CapabilitySet::NONE.vector_search());
        assert!(!CapabilitySet {
            embeddings: true,
            vector_index: false
        }
        .vector_search());
        assert!(!CapabilitySet {
            embeddings: false,
            vector_index: true
        }
        .vector_search());
        assert!(CapabilitySet {
            embeddings: true,
            vector_index: true
        }
        .vector_search());
    }
}

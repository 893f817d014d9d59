//! Core trait abstractions.
//!
//! Every expensive or external dependency sits behind one of these traits so
//! the pipeline can be assembled from real implementations in production and
//! from the doubles in [`crate::testing`] in tests:
//! - [`TextEmbedder`] / [`VectorIndex`] - the optional vector stack
//! - [`ArticleStore`] - the storage contract both backends satisfy
//! - [`MisinfoOracle`] / [`FactCheckOracle`] / [`CredibilityProvider`] - the
//!   external trust collaborators

pub mod embedder;
pub mod index;
pub mod oracle;
pub mod store;

pub use embedder::TextEmbedder;
pub use index::{InMemoryIndex, VectorIndex};
pub use oracle::{CredibilityProvider, FactCheckOracle, MisinfoOracle};
pub use store::{cosine_similarity, ArticleStore};

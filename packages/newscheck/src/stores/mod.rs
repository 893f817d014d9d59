//! Storage implementations.
//!
//! Two interchangeable backends behind [`crate::traits::ArticleStore`]:
//! - [`VectorStore`] - embeds on insert, answers similarity queries
//! - [`FlatFileStore`] - append-rewrite JSON file, keyword retrieval upstream

pub mod flat;
pub mod vector;

pub use flat::FlatFileStore;
pub use vector::VectorStore;

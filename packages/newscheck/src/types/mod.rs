//! Core data types for articles, verdicts, queries, and configuration.

pub mod article;
pub mod config;
pub mod result;
pub mod verdict;

pub use article::{Article, ExtractedContent, RawEntry};
pub use config::NewsConfig;
pub use result::QueryResult;
pub use verdict::{Credibility, FactVerdict, MisinfoVerdict};

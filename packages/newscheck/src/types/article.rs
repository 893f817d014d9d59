//! Article types - feed entries, extracted content, and stored articles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::verdict::MisinfoVerdict;

/// A feed entry before content extraction.
///
/// Produced by the feed fetcher; carries only what the feed itself knows
/// about the article.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    /// Link to the full article
    pub url: String,

    /// Entry title as reported by the feed, if any
    pub title_hint: Option<String>,

    /// Human-readable label of the feed this entry came from
    pub source_label: String,
}

impl RawEntry {
    /// Create a new raw entry.
    pub fn new(url: impl Into<String>, source_label: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title_hint: None,
            source_label: source_label.into(),
        }
    }

    /// Set the title hint.
    pub fn with_title_hint(mut self, title: impl Into<String>) -> Self {
        self.title_hint = Some(title.into());
        self
    }
}

/// Readable content produced by an extractor tier, before annotation.
#[derive(Debug, Clone)]
pub struct ExtractedContent {
    /// Article title (falls back to the feed's title hint upstream)
    pub title: String,

    /// Readable body text
    pub text: String,
}

impl ExtractedContent {
    /// Character count of the trimmed body text.
    pub fn trimmed_len(&self) -> usize {
        self.text.trim().chars().count()
    }
}

/// A stored news article with its ingestion-time trust annotation.
///
/// Articles are immutable once created; re-ingestion of the same URL is a
/// skip, never an overwrite. The URL is the store key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Canonical article URL - unique within the store
    pub url: String,

    /// Article title
    pub title: String,

    /// Readable body text (above the minimum-content threshold)
    pub full_text: String,

    /// Label of the feed the article came from
    pub source_name: String,

    /// Misinformation verdict computed at ingestion time
    pub misinfo_verdict: MisinfoVerdict,

    /// Explanation accompanying the misinformation verdict
    pub misinfo_explanation: String,

    /// When the article was ingested
    pub ingested_at: DateTime<Utc>,

    /// Embedding of `full_text`, present only when the vector backend
    /// ingested the article. Never persisted to the flat store format.
    #[serde(skip)]
    pub embedding: Option<Vec<f32>>,
}

impl Article {
    /// Create a new article with the current ingestion timestamp.
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        full_text: impl Into<String>,
        source_name: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            full_text: full_text.into(),
            source_name: source_name.into(),
            misinfo_verdict: MisinfoVerdict::Unknown,
            misinfo_explanation: String::new(),
            ingested_at: Utc::now(),
            embedding: None,
        }
    }

    /// Set the misinformation annotation.
    pub fn with_misinfo(
        mut self,
        verdict: MisinfoVerdict,
        explanation: impl Into<String>,
    ) -> Self {
        self.misinfo_verdict = verdict;
        self.misinfo_explanation = explanation.into();
        self
    }

    /// Set the embedding vector.
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Set the ingestion timestamp.
    pub fn with_ingested_at(mut self, ingested_at: DateTime<Utc>) -> Self {
        self.ingested_at = ingested_at;
        self
    }

    /// Title and body joined for keyword matching.
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.full_text).to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn searchable_text_is_lowercased_title_plus_body() {
        let article = Article::new("https://example.com/a", "Climate Report", "Sea LEVELS", "BBC");
        assert_eq!(article.searchable_text(), "climate report sea levels");
    }

    #[test]
    fn embedding_is_not_serialized() {
        let article = Article::new("https://example.com/a", "T", "body", "BBC")
            .with_embedding(vec![0.1, 0.2]);
        let json = serde_json::to_value(&article).unwrap();
        assert!(json.get("embedding").is_none());
        assert_eq!(json["url"], "https://example.com/a");
    }
}

//! Default table-backed source credibility provider.

use async_trait::async_trait;

use crate::error::OracleResult;
use crate::traits::CredibilityProvider;
use crate::types::verdict::Credibility;

/// Known source labels with credibility scores in `[0.0, 1.0]`.
///
/// Matching is case-insensitive substring over the source label, so feed
/// titles like "BBC News - World" resolve to the "BBC" row.
const CREDIBILITY_TABLE: [(&str, f32); 20] = [
    ("BBC", 0.95),
    ("Reuters", 0.95),
    ("Associated Press", 0.95),
    ("AP News", 0.95),
    ("NPR", 0.92),
    ("The Guardian", 0.90),
    ("Economist", 0.89),
    ("New York Times", 0.88),
    ("Financial Times", 0.88),
    ("Washington Post", 0.87),
    ("Bloomberg", 0.87),
    ("Wall Street Journal", 0.86),
    ("CNN", 0.85),
    ("Al Jazeera", 0.75),
    ("USA Today", 0.72),
    ("Yahoo News", 0.70),
    ("Fox News", 0.58),
    ("Daily Mail", 0.45),
    ("Breitbart", 0.35),
    ("InfoWars", 0.15),
];

/// Score given to sources not in the table.
const DEFAULT_SCORE: f32 = 0.5;

/// Credibility lookup backed by a static tier table.
///
/// The scoring methodology itself is an external concern; this provider just
/// serves the table. Swap in a remote implementation of
/// [`CredibilityProvider`] without touching the retrieval engine.
#[derive(Default)]
pub struct TableCredibility;

impl TableCredibility {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CredibilityProvider for TableCredibility {
    async fn credibility(&self, source_name: &str) -> OracleResult<Credibility> {
        let source = source_name.trim().to_lowercase();
        if source.is_empty() {
            return Ok(Credibility::NotAvailable);
        }

        let score = CREDIBILITY_TABLE
            .iter()
            .find(|(label, _)| source.contains(&label.to_lowercase()))
            .map(|(_, score)| *score)
            .unwrap_or(DEFAULT_SCORE);

        Ok(Credibility::Score(score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_sources_match_by_substring() {
        let provider = TableCredibility::new();

        let cred = provider.credibility("BBC News - World").await.unwrap();
        assert_eq!(cred, Credibility::Score(0.95));

        let cred = provider.credibility("cnn top stories").await.unwrap();
        assert_eq!(cred, Credibility::Score(0.85));
    }

    #[tokio::test]
    async fn unknown_source_gets_midpoint() {
        let provider = TableCredibility::new();
        let cred = provider.credibility("Some Local Blog").await.unwrap();
        assert_eq!(cred, Credibility::Score(0.5));
    }

    #[tokio::test]
    async fn empty_source_is_not_available() {
        let provider = TableCredibility::new();
        let cred = provider.credibility("  ").await.unwrap();
        assert_eq!(cred, Credibility::NotAvailable);
    }
}

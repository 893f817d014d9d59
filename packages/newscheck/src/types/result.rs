//! Query result type assembled by the retrieval engine.

use serde::{Deserialize, Serialize};

use crate::types::verdict::{Credibility, FactVerdict, MisinfoVerdict};

/// One retrieved article with its trust signals.
///
/// The shape is identical regardless of which storage or retrieval backend
/// produced it - only the relevance ranking may differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    /// Label of the feed the article came from
    pub source_name: String,

    /// Credibility score for the source, or N/A
    pub credibility: Credibility,

    /// Fact-check verdict for the query against this article's text
    pub fact_verdict: FactVerdict,

    /// Evidence text accompanying the fact-check verdict
    pub evidence: String,

    /// Bounded-length excerpt of the matched article
    pub context_snippet: String,

    /// Misinformation verdict computed at ingestion time
    pub misinfo_verdict: MisinfoVerdict,

    /// Explanation accompanying the misinformation verdict
    pub misinfo_explanation: String,
}

//! Retrieval engine - free-text query to annotated results.

use tracing::{debug, warn};

use crate::context::NewsContext;
use crate::error::{NewsError, Result};
use crate::types::article::Article;
use crate::types::result::QueryResult;
use crate::types::verdict::Credibility;

/// Search stored articles and annotate the matches.
///
/// Uses vector similarity when the capability is present, keyword scoring
/// otherwise. A vector failure mid-query falls back to the keyword path
/// transparently - the caller sees degraded ranking, never an error. Both
/// paths produce the same result shape. An empty result set is `Ok`.
pub async fn search(ctx: &NewsContext, query: &str, top_k: usize) -> Result<Vec<QueryResult>> {
    let query = query.trim();
    if query.is_empty() {
        return Err(NewsError::InvalidQuery {
            reason: "empty query".to_string(),
        });
    }

    let ranked = if ctx.capabilities.vector_search() {
        match ctx.store.query_similar(query, top_k).await {
            Ok(hits) => {
                debug!(hits = hits.len(), "vector retrieval");
                hits.into_iter().map(|(article, _)| article).collect()
            }
            Err(e) => {
                warn!(error = %e, "vector query failed, degrading to keyword path");
                keyword_rank(ctx, query, top_k).await?
            }
        }
    } else {
        keyword_rank(ctx, query, top_k).await?
    };

    let mut results = Vec::with_capacity(ranked.len());
    for article in ranked {
        results.push(annotate_result(ctx, query, article).await);
    }
    Ok(results)
}

async fn keyword_rank(ctx: &NewsContext, query: &str, top_k: usize) -> Result<Vec<Article>> {
    let articles = ctx.store.load_all().await.map_err(NewsError::Storage)?;
    Ok(keyword_top_k(query, articles, top_k))
}

/// Keyword fallback scoring.
///
/// Score = number of query tokens (lowercased, whitespace-split, duplicates
/// counted) occurring as substrings of the lowercased title + body.
/// Zero-score articles are dropped; the sort is stable so ties keep storage
/// order, making repeated calls deterministic for a fixed corpus.
pub fn keyword_top_k(query: &str, articles: Vec<Article>, top_k: usize) -> Vec<Article> {
    let query_lower = query.to_lowercase();
    let tokens: Vec<&str> = query_lower.split_whitespace().collect();
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(usize, Article)> = articles
        .into_iter()
        .filter_map(|article| {
            let text = article.searchable_text();
            let score = tokens
                .iter()
                .filter(|&&token| text.contains(token))
                .count();
            (score > 0).then_some((score, article))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
        .into_iter()
        .take(top_k)
        .map(|(_, article)| article)
        .collect()
}

/// Annotate one ranked article into a query result.
///
/// The fact-check verdict is computed fresh against the query - distinct
/// from the misinformation verdict carried from ingestion time. Collaborator
/// failures degrade to sentinels; they never drop the result.
async fn annotate_result(ctx: &NewsContext, query: &str, article: Article) -> QueryResult {
    let (fact_verdict, evidence) = ctx
        .annotator
        .annotate_fact_check(query, &article.full_text)
        .await;

    let credibility = tokio::time::timeout(
        ctx.config.oracle_timeout,
        ctx.credibility.credibility(&article.source_name),
    )
    .await
    .ok()
    .and_then(|r| r.ok())
    .unwrap_or(Credibility::NotAvailable);

    QueryResult {
        source_name: article.source_name,
        credibility,
        fact_verdict,
        evidence,
        context_snippet: snippet(&article.full_text, ctx.config.snippet_chars),
        misinfo_verdict: article.misinfo_verdict,
        misinfo_explanation: article.misinfo_explanation,
    }
}

/// Bounded-length excerpt, truncated on a character boundary.
fn snippet(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut excerpt: String = text.chars().take(max_chars).collect();
    excerpt.push_str("...");
    excerpt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(url: &str, title: &str, body: &str) -> Article {
        Article::new(url, title, body, "Feed")
    }

    #[test]
    fn keyword_scoring_counts_matching_tokens() {
        let articles = vec![
            article("u1", "Climate policy update", "new climate rules announced"),
            article("u2", "Sports roundup", "match results from the weekend"),
        ];

        let ranked = keyword_top_k("climate policy", articles, 3);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].url, "u1");
    }

    #[test]
    fn zero_score_articles_are_dropped() {
        let articles = vec![article("u1", "Elections", "ballot counts continue")];
        assert!(keyword_top_k("climate", articles, 3).is_empty());
    }

    #[test]
    fn ties_keep_storage_order() {
        let articles = vec![
            article("first", "shared topic", "body"),
            article("second", "shared topic", "body"),
            article("third", "shared topic", "body"),
        ];

        let ranked = keyword_top_k("topic", articles, 10);
        let urls: Vec<_> = ranked.iter().map(|a| a.url.as_str()).collect();
        assert_eq!(urls, ["first", "second", "third"]);
    }

    #[test]
    fn duplicate_query_tokens_count_twice() {
        let articles = vec![
            article("once", "climate here", "body"),
            article("twice", "other", "election night election results"),
        ];

        // "election election climate" scores 2 for the election article
        // (duplicate token counted per occurrence in the query) and 1 for
        // the climate article.
        let ranked = keyword_top_k("election election climate", articles, 10);
        assert_eq!(ranked[0].url, "twice");
        assert_eq!(ranked[1].url, "once");
    }

    #[test]
    fn top_k_truncates_after_ranking() {
        let articles = vec![
            article("low", "topic", "body"),
            article("high", "topic topic topic", "topic topic"),
        ];

        let ranked = keyword_top_k("topic", articles, 1);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].url, "high");
    }

    #[test]
    fn snippet_truncates_on_char_boundary() {
        assert_eq!(snippet("short", 10), "short");

        let long = "é".repeat(20);
        let cut = snippet(&long, 5);
        assert_eq!(cut, format!("{}...", "é".repeat(5)));
    }
}

//! Content extraction - entry URL to readable article text.
//!
//! Two tiers behind one cascade: a structured article parser, then a generic
//! markup scraper. The page is fetched once; tiers are mutually exclusive and
//! first success wins. Per-entry failures are isolated - the batch moves on.

pub mod article_parser;
pub mod fallback_parser;

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::error::{ExtractError, ExtractResult};
use crate::types::article::{ExtractedContent, RawEntry};
use article_parser::ArticleParser;
use fallback_parser::FallbackParser;

/// Intermediate parser output before title fallback resolution.
#[derive(Debug, Clone)]
pub struct ParsedText {
    pub title: Option<String>,
    pub text: String,
}

/// Extracts readable content for a feed entry.
///
/// Implemented by [`ExtractorCascade`]; tests substitute the mock in
/// [`crate::testing`].
#[async_trait]
pub trait ArticleExtractor: Send + Sync {
    /// Extract content for one entry, or an error isolated to that entry.
    async fn extract(&self, entry: &RawEntry) -> ExtractResult<ExtractedContent>;
}

/// Two-tier extraction cascade.
pub struct ExtractorCascade {
    client: reqwest::Client,
    primary: ArticleParser,
    secondary: FallbackParser,
    min_content_chars: usize,
}

impl ExtractorCascade {
    /// Create a cascade with the given page timeout and content threshold.
    pub fn new(page_timeout: Duration, min_content_chars: usize) -> Self {
        // Browser-like User-Agent: plenty of outlets serve bots a stub page.
        let user_agent = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

        let client = reqwest::Client::builder()
            .timeout(page_timeout)
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("failed to build page HTTP client");

        Self {
            client,
            primary: ArticleParser::new(),
            secondary: FallbackParser::new(),
            min_content_chars,
        }
    }

    async fn fetch_html(&self, url: &str) -> ExtractResult<String> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ExtractError::Timeout {
                    url: url.to_string(),
                }
            } else {
                ExtractError::Http {
                    url: url.to_string(),
                    source: Box::new(e),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Http {
                url: url.to_string(),
                source: format!("HTTP {status}").into(),
            });
        }

        response.text().await.map_err(|e| ExtractError::Http {
            url: url.to_string(),
            source: Box::new(e),
        })
    }

    /// Run the parse tiers against already-fetched markup.
    ///
    /// Exposed separately from [`ArticleExtractor::extract`] so callers that
    /// already hold the page body (or tests) can drive the cascade without a
    /// network fetch.
    pub fn extract_html(
        &self,
        entry: &RawEntry,
        html: &str,
    ) -> ExtractResult<ExtractedContent> {
        let mut best_chars = 0;

        // Tier 1: structured article parse. The secondary tier never runs
        // when this produced valid content.
        if let Some(parsed) = self.primary.parse(html) {
            let chars = parsed.text.trim().chars().count();
            if chars > self.min_content_chars {
                debug!(url = %entry.url, chars, "primary extractor succeeded");
                return Ok(self.assemble(entry, parsed));
            }
            best_chars = chars;
        }

        // Tier 2: generic markup scrape.
        if let Some(parsed) = self.secondary.parse(html) {
            let chars = parsed.text.trim().chars().count();
            if chars > self.min_content_chars {
                debug!(url = %entry.url, chars, "fallback extractor succeeded");
                return Ok(self.assemble(entry, parsed));
            }
            best_chars = best_chars.max(chars);
        }

        Err(ExtractError::ContentTooShort {
            url: entry.url.clone(),
            chars: best_chars,
        })
    }

    fn assemble(&self, entry: &RawEntry, parsed: ParsedText) -> ExtractedContent {
        let title = parsed
            .title
            .or_else(|| entry.title_hint.clone())
            .unwrap_or_else(|| "No title".to_string());

        ExtractedContent {
            title,
            text: parsed.text,
        }
    }
}

#[async_trait]
impl ArticleExtractor for ExtractorCascade {
    async fn extract(&self, entry: &RawEntry) -> ExtractResult<ExtractedContent> {
        if url::Url::parse(&entry.url).is_err() {
            return Err(ExtractError::InvalidUrl {
                url: entry.url.clone(),
            });
        }

        // One fetch feeds both tiers; a network failure fails the entry.
        let html = self.fetch_html(&entry.url).await?;
        self.extract_html(entry, &html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cascade(min_chars: usize) -> ExtractorCascade {
        ExtractorCascade::new(Duration::from_secs(5), min_chars)
    }

    fn entry() -> RawEntry {
        RawEntry::new("https://example.com/story", "Example Wire").with_title_hint("Hinted")
    }

    fn long_paragraph() -> String {
        "word ".repeat(40).trim().to_string()
    }

    #[test]
    fn primary_tier_wins_when_article_markup_present() {
        let body = long_paragraph();
        let html = format!(
            "<html><body><article><p>{body}</p></article><main><p>other</p></main></body></html>"
        );

        let content = cascade(100).extract_html(&entry(), &html).unwrap();
        assert_eq!(content.text, body);
    }

    #[test]
    fn falls_back_when_primary_content_too_short() {
        let body = long_paragraph();
        let html = format!(
            "<html><body><article><p>stub</p></article><main><p>{body}</p></main></body></html>"
        );

        let content = cascade(100).extract_html(&entry(), &html).unwrap();
        assert_eq!(content.text, body);
    }

    #[test]
    fn short_text_never_yields_content() {
        let html = "<html><body><article><p>tiny</p></article></body></html>";
        let err = cascade(100).extract_html(&entry(), html).unwrap_err();
        assert!(matches!(err, ExtractError::ContentTooShort { chars: 4, .. }));
    }

    #[test]
    fn threshold_is_strictly_greater_than() {
        let exactly_100 = "x".repeat(100);
        let html = format!("<html><body><article><p>{exactly_100}</p></article></body></html>");
        let err = cascade(100).extract_html(&entry(), &html).unwrap_err();
        assert!(matches!(err, ExtractError::ContentTooShort { chars: 100, .. }));
    }

    #[test]
    fn title_hint_fills_in_when_markup_has_none() {
        let body = long_paragraph();
        let html = format!("<html><body><article><p>{body}</p></article></body></html>");

        let content = cascade(100).extract_html(&entry(), &html).unwrap();
        assert_eq!(content.title, "Hinted");
    }

    #[tokio::test]
    async fn invalid_url_is_rejected_before_fetch() {
        let bad = RawEntry::new("not a url", "Feed");
        let err = cascade(100).extract(&bad).await.unwrap_err();
        assert!(matches!(err, ExtractError::InvalidUrl { .. }));
    }
}

//! Secondary extractor tier - generic markup scrape.

use scraper::{Html, Selector};

use super::article_parser::extract_title;
use super::ParsedText;

/// Content regions tried in priority order before the all-paragraphs sweep.
const CONTENT_SELECTORS: [&str; 8] = [
    "main",
    "[role='main']",
    "#content",
    "#main",
    ".content",
    ".post-content",
    ".entry-content",
    ".story-body",
];

/// Generic markup scraper.
///
/// Runs only when the primary tier produced nothing usable. Walks a
/// prioritized list of content-region selectors and, when no region matches,
/// concatenates every paragraph-level text node in the document.
#[derive(Default)]
pub struct FallbackParser;

impl FallbackParser {
    pub fn new() -> Self {
        Self
    }

    /// Scrape readable text out of arbitrary markup.
    pub fn parse(&self, html: &str) -> Option<ParsedText> {
        let document = Html::parse_document(html);
        let paragraph_selector = Selector::parse("p").ok()?;

        for selector_str in CONTENT_SELECTORS {
            let Ok(selector) = Selector::parse(selector_str) else {
                continue;
            };
            if let Some(region) = document.select(&selector).next() {
                let text = join_paragraphs(region.select(&paragraph_selector));
                if !text.is_empty() {
                    return Some(ParsedText {
                        title: extract_title(&document),
                        text,
                    });
                }
            }
        }

        // No region matched: sweep every paragraph in the document.
        let text = join_paragraphs(document.select(&paragraph_selector));
        if text.is_empty() {
            return None;
        }

        Some(ParsedText {
            title: extract_title(&document),
            text,
        })
    }
}

fn join_paragraphs<'a>(paragraphs: impl Iterator<Item = scraper::ElementRef<'a>>) -> String {
    paragraphs
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_content_region_over_page_sweep() {
        let html = r#"<html><body>
            <header><p>Boilerplate banner.</p></header>
            <main><p>Region paragraph.</p></main>
            <footer><p>Footer text.</p></footer>
        </body></html>"#;

        let parsed = FallbackParser::new().parse(html).unwrap();
        assert_eq!(parsed.text, "Region paragraph.");
    }

    #[test]
    fn sweeps_all_paragraphs_without_a_region() {
        let html = r#"<html><body>
            <div><p>One.</p></div>
            <div><p>Two.</p></div>
        </body></html>"#;

        let parsed = FallbackParser::new().parse(html).unwrap();
        assert_eq!(parsed.text, "One.\n\nTwo.");
    }

    #[test]
    fn fails_on_paragraphless_markup() {
        let html = "<html><body><div>No paragraphs anywhere</div></body></html>";
        assert!(FallbackParser::new().parse(html).is_none());
    }
}

//! Primary extractor tier - structured article markup.

use scraper::{Html, Selector};

use super::ParsedText;

/// Selectors that mark up a page as a proper article.
const ARTICLE_SELECTORS: [&str; 3] = ["article", "[itemprop='articleBody']", ".article-body"];

/// Structured article parser.
///
/// Succeeds only on pages that carry real article markup; pages without it
/// fall through to the secondary tier. Intentionally strict - a generic
/// body scrape here would defeat the cascade's quality ordering.
#[derive(Default)]
pub struct ArticleParser;

impl ArticleParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse article markup out of a document, or `None` when the page has
    /// no recognizable article region.
    pub fn parse(&self, html: &str) -> Option<ParsedText> {
        let document = Html::parse_document(html);

        let region = ARTICLE_SELECTORS.iter().find_map(|selector_str| {
            let selector = Selector::parse(selector_str).ok()?;
            document.select(&selector).next()
        })?;

        let paragraph_selector = Selector::parse("p, h2, h3, li").ok()?;
        let mut blocks: Vec<String> = region
            .select(&paragraph_selector)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        // Article regions without block children still count if they carry
        // bare text (some outlets put the body straight into <article>).
        if blocks.is_empty() {
            let bare = region.text().collect::<String>().trim().to_string();
            if bare.is_empty() {
                return None;
            }
            blocks.push(bare);
        }

        Some(ParsedText {
            title: extract_title(&document),
            text: blocks.join("\n\n"),
        })
    }
}

/// Title from `og:title` metadata, else the `<title>` element.
pub(super) fn extract_title(document: &Html) -> Option<String> {
    let og = Selector::parse("meta[property='og:title']").ok()?;
    if let Some(content) = document
        .select(&og)
        .next()
        .and_then(|el| el.value().attr("content"))
    {
        let content = content.trim();
        if !content.is_empty() {
            return Some(content.to_string());
        }
    }

    let title = Selector::parse("title").ok()?;
    document
        .select(&title)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_article_element() {
        let html = r#"<html><head><title>Page Title</title></head><body>
            <nav><p>Menu item</p></nav>
            <article><p>First paragraph.</p><p>Second paragraph.</p></article>
        </body></html>"#;

        let parsed = ArticleParser::new().parse(html).unwrap();
        assert_eq!(parsed.title.as_deref(), Some("Page Title"));
        assert_eq!(parsed.text, "First paragraph.\n\nSecond paragraph.");
    }

    #[test]
    fn prefers_og_title() {
        let html = r#"<html><head>
            <title>Site | Story</title>
            <meta property="og:title" content="Story Headline"/>
        </head><body><article><p>Body.</p></article></body></html>"#;

        let parsed = ArticleParser::new().parse(html).unwrap();
        assert_eq!(parsed.title.as_deref(), Some("Story Headline"));
    }

    #[test]
    fn fails_without_article_markup() {
        let html = "<html><body><div><p>Just a div page.</p></div></body></html>";
        assert!(ArticleParser::new().parse(html).is_none());
    }

    #[test]
    fn bare_article_text_is_used() {
        let html = "<html><body><article>Inline body text without paragraphs.</article></body></html>";
        let parsed = ArticleParser::new().parse(html).unwrap();
        assert_eq!(parsed.text, "Inline body text without paragraphs.");
    }
}

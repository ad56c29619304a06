use std::time::Duration;

use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::debug;

use ac_core::{ArticleExtractor, Error, ExtractedArticle, Result};

const USER_AGENT: &str = concat!("articlecast/", env!("CARGO_PKG_VERSION"));

/// Generic article extractor for arbitrary pages.
///
/// Title comes from `og:title`, the document `<title>`, or the first `<h1>`,
/// in that order. Body paragraphs come from `<article> p`, falling back to all
/// `<p>` elements when the page has no `<article>` landmark.
pub struct PageExtractor {
    client: reqwest::Client,
}

impl PageExtractor {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self { client }
    }
}

impl Default for PageExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleExtractor for PageExtractor {
    async fn extract(&self, url: &str) -> Result<ExtractedArticle> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Extraction(format!("failed to fetch {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::Extraction(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| Error::Extraction(format!("failed to read {}: {}", url, e)))?;

        let document = Html::parse_document(&html);
        let title = extract_title(&document);
        let text = extract_body(&document);
        debug!("extracted {} chars from {}", text.len(), url);

        Ok(ExtractedArticle { title, text })
    }
}

fn extract_title(document: &Html) -> String {
    let og_title = Selector::parse(r#"meta[property="og:title"]"#).unwrap();
    if let Some(content) = document
        .select(&og_title)
        .next()
        .and_then(|el| el.value().attr("content"))
    {
        let content = content.trim();
        if !content.is_empty() {
            return content.to_string();
        }
    }

    for selector in ["title", "h1"] {
        let selector = Selector::parse(selector).unwrap();
        if let Some(el) = document.select(&selector).next() {
            let text = el.text().collect::<String>().trim().to_string();
            if !text.is_empty() {
                return text;
            }
        }
    }

    String::new()
}

fn extract_body(document: &Html) -> String {
    for selector in ["article p", "p"] {
        let selector = Selector::parse(selector).unwrap();
        let paragraphs = document
            .select(&selector)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>();
        if !paragraphs.is_empty() {
            return paragraphs.join("\n\n");
        }
    }

    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_prefers_og_title() {
        let html = r#"
            <head>
                <meta property="og:title" content="Open Graph Title">
                <title>Document Title</title>
            </head>
            <body><h1>Heading</h1></body>
        "#;
        let document = Html::parse_document(html);
        assert_eq!(extract_title(&document), "Open Graph Title");
    }

    #[test]
    fn test_title_falls_back_to_document_title() {
        let html = "<head><title>Document Title</title></head><body><h1>Heading</h1></body>";
        let document = Html::parse_document(html);
        assert_eq!(extract_title(&document), "Document Title");
    }

    #[test]
    fn test_title_falls_back_to_h1() {
        let html = "<body><h1>Heading</h1></body>";
        let document = Html::parse_document(html);
        assert_eq!(extract_title(&document), "Heading");
    }

    #[test]
    fn test_body_prefers_article_paragraphs() {
        let html = r#"
            <body>
                <p>Sidebar noise</p>
                <article>
                    <p>First paragraph.</p>
                    <p>Second paragraph.</p>
                </article>
            </body>
        "#;
        let document = Html::parse_document(html);
        assert_eq!(
            extract_body(&document),
            "First paragraph.\n\nSecond paragraph."
        );
    }

    #[test]
    fn test_body_falls_back_to_all_paragraphs() {
        let html = "<body><div><p>One.</p><p>Two.</p></div></body>";
        let document = Html::parse_document(html);
        assert_eq!(extract_body(&document), "One.\n\nTwo.");
    }

    #[test]
    fn test_empty_document_extracts_nothing() {
        let document = Html::parse_document("<body><div>no paragraphs here</div></body>");
        assert_eq!(extract_title(&document), "");
        assert_eq!(extract_body(&document), "");
    }
}

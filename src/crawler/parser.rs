//! HTML parser for extracting page text and links
//!
//! This module handles parsing HTML content to extract:
//! - The visible text of the page, flattened to a single line
//! - Every `<a href>` link, resolved against the page URL, with its anchor text

use crate::storage::UrlRecord;
use scraper::{Html, Selector};
use thiserror::Error;
use url::Url;

/// Elements whose text is never part of the page content
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// A page that could not be parsed
#[derive(Debug, Clone, Error)]
#[error("Failed to parse {url}: {message}")]
pub struct ParseFailure {
    pub url: String,
    pub message: String,
}

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// Visible text, whitespace-separated
    pub text: String,

    /// Links in document order, labelled with their anchor text
    pub links: Vec<UrlRecord>,
}

/// Anything that can split a response body into text and links
pub trait PageParser {
    /// Parses `body`, resolving relative links against `base`
    fn parse(&self, body: &str, base: &str) -> Result<ParsedPage, ParseFailure>;
}

/// `PageParser` backed by scraper
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlParser;

impl PageParser for HtmlParser {
    fn parse(&self, body: &str, base: &str) -> Result<ParsedPage, ParseFailure> {
        let base_url = Url::parse(base).map_err(|e| ParseFailure {
            url: base.to_string(),
            message: format!("invalid base URL: {}", e),
        })?;
        Ok(parse_html(body, &base_url))
    }
}

/// Parses HTML content and extracts text and links
///
/// # Link Extraction Rules
///
/// **Include:** every `<a href="...">`, duplicates and all, in document order.
///
/// **Exclude:**
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only hrefs (same page anchors)
/// - Anything that does not resolve to an http(s) URL
///
/// # Example
///
/// ```
/// use sumi_scribe::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><body><p>Hi</p><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url);
/// assert_eq!(parsed.text, "Hi Link");
/// assert_eq!(parsed.links[0].url, "https://example.com/page");
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        text: extract_text(&document),
        links: extract_links(&document, base_url),
    }
}

/// Collects every visible word, joined by single spaces
fn extract_text(document: &Html) -> String {
    let mut parts: Vec<&str> = Vec::new();

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| HIDDEN_ELEMENTS.contains(&element.name()))
        });
        if hidden {
            continue;
        }

        parts.extend(text.split_whitespace());
    }

    parts.join(" ")
}

/// Extracts all valid links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<UrlRecord> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            let Some(absolute_url) = resolve_link(href, base_url) else {
                continue;
            };

            let anchor = element
                .text()
                .flat_map(str::split_whitespace)
                .collect::<Vec<_>>()
                .join(" ");
            links.push(UrlRecord::labelled(absolute_url, anchor));
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

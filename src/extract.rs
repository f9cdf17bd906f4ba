//! Best-effort article extraction from inconsistent HTML layouts.
//!
//! Thairath article pages do not share one template, so every field is
//! pulled through an ordered fallback chain and the first hit wins:
//!
//! - **Headline**: `og:title` meta content, else the first `<h1>`
//! - **Published**: `article:published_time` meta content, ISO-normalized
//! - **Content**: the first container in `main`, `article`,
//!   `.article-content`, `.content-article` whose paragraphs survive the
//!   length filter
//! - **Summary**: `og:description`, else `meta[name=description]`
//!
//! Extraction never fails; a page exposing none of these yields a record
//! with empty fields. The chains trade completeness for robustness and are
//! deliberately order-sensitive.

use crate::models::ExtractedArticle;
use crate::utils::normalize_date;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

static OG_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:title"]"#).unwrap());
static FIRST_HEADING: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static PUBLISHED_TIME: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="article:published_time"]"#).unwrap());
static OG_DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:description"]"#).unwrap());
static META_DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="description"]"#).unwrap());
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

/// Content containers tried in order; first selector with a qualifying
/// paragraph wins.
static CONTENT_CONTAINERS: Lazy<Vec<Selector>> = Lazy::new(|| {
    ["main", "article", ".article-content", ".content-article"]
        .iter()
        .map(|css| Selector::parse(css).unwrap())
        .collect()
});

/// Extract article fields from a fetched page.
///
/// `url` is only used for logging; the caller owns record assembly.
pub fn extract_article(html: &str, url: &str) -> ExtractedArticle {
    let document = Html::parse_document(html);

    let headline = meta_content(&document, &OG_TITLE)
        .or_else(|| {
            document
                .select(&FIRST_HEADING)
                .next()
                .map(|heading| element_text(&heading))
        })
        .unwrap_or_default();

    let published_iso =
        meta_content(&document, &PUBLISHED_TIME).and_then(|raw| normalize_date(&raw));

    let content = extract_content(&document);

    let summary = meta_content(&document, &OG_DESCRIPTION)
        .or_else(|| meta_content(&document, &META_DESCRIPTION))
        .map(|text| text.trim().to_string())
        .unwrap_or_default();

    debug!(
        %url,
        headline_bytes = headline.len(),
        content_bytes = content.len(),
        has_published = published_iso.is_some(),
        "extracted article fields"
    );

    ExtractedArticle {
        headline,
        summary,
        content,
        published_iso,
    }
}

/// The `content` attribute of the first element matching `selector`.
fn meta_content(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(str::to_string)
}

/// Concatenated, trimmed text of an element.
fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Walk the container chain and collect body paragraphs.
///
/// A container that matches but yields no paragraph longer than 2 trimmed
/// characters falls through to the next selector; boilerplate-only wrappers
/// are common on listing-like pages.
fn extract_content(document: &Html) -> String {
    for selector in CONTENT_CONTAINERS.iter() {
        let container = match document.select(selector).next() {
            Some(container) => container,
            None => continue,
        };
        let paragraphs: Vec<String> = container
            .select(&PARAGRAPH)
            .map(|paragraph| element_text(&paragraph))
            .filter(|text| text.chars().count() > 2)
            .collect();
        if !paragraphs.is_empty() {
            return paragraphs.join("\n");
        }
    }
    String::new()
}

//! Data models for sitemap entries and article records.
//!
//! This module defines the structures that flow through the pipeline:
//! - [`SitemapEntry`]: a page URL discovered in a sitemap, with its
//!   optional last-modified timestamp
//! - [`ExtractedArticle`]: the fields pulled out of an article page's HTML
//! - [`ArticleRecord`]: a complete dataset row, ready for serialization

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// The news agency every record in this crawl belongs to.
pub const AGENCY: &str = "thairath";

/// A page URL discovered while resolving the sitemap hierarchy.
///
/// Produced by the sitemap resolver and consumed once by the crawl
/// orchestrator; entries are not retained after filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    /// The page URL (`<loc>` element).
    pub location: String,
    /// The `<lastmod>` timestamp, when present and parseable.
    pub last_modified: Option<DateTime<FixedOffset>>,
}

/// The fields extracted from an article page's HTML.
///
/// Extraction is best-effort: any field the page does not expose in a
/// recognized place is left empty (or `None` for the timestamp).
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedArticle {
    /// Article headline.
    pub headline: String,
    /// Short description of the article.
    pub summary: String,
    /// Body paragraphs joined with newlines.
    pub content: String,
    /// Publication time as a normalized ISO-8601 string.
    pub published_iso: Option<String>,
}

/// One row of the output dataset.
///
/// Assembled by the orchestrator from an [`ExtractedArticle`] plus the
/// classified section and the id derived from the URL. Immutable once
/// built; owned by its section's result list until written out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Always [`AGENCY`].
    pub agency: String,
    /// The section this article was classified into.
    pub section: String,
    /// The last numeric path segment of the URL, or a timestamp fallback.
    pub id: String,
    /// Publication time in ISO-8601, empty when unknown.
    pub published_iso: String,
    /// Article headline.
    pub headline: String,
    /// Short description of the article.
    pub summary: String,
    /// Body paragraphs joined with newlines.
    pub content: String,
    /// The article page URL.
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_record_serialization_round_trip() {
        let record = ArticleRecord {
            agency: AGENCY.to_string(),
            section: "politic".to_string(),
            id: "12345".to_string(),
            published_iso: "2024-01-01T00:00:00+00:00".to_string(),
            headline: "Headline".to_string(),
            summary: "Summary".to_string(),
            content: "Body".to_string(),
            url: "https://x/news/politic/12345".to_string(),
        };

        let json = serde_json::to_string(&record).unwrap();
        let parsed: ArticleRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_sitemap_entry_without_lastmod() {
        let entry = SitemapEntry {
            location: "https://x/news/politic/1".to_string(),
            last_modified: None,
        };
        assert!(entry.last_modified.is_none());
    }
}

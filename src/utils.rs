//! Utility functions for date normalization, URL id extraction, and file
//! system checks.
//!
//! This module provides helper functions used throughout the application:
//! - ISO-8601 parsing tolerant of the date shapes sitemaps actually carry
//! - Deriving a record id from an article URL
//! - Field cleanup for tabular serialization
//! - File system validation for output directories

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// A path segment made up entirely of digits.
static NUMERIC_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());

/// Parse an ISO-8601 timestamp, tolerating the variants seen in the wild.
///
/// Accepts a full RFC 3339 timestamp (a trailing literal `Z` is treated as
/// UTC), a naive `YYYY-MM-DDTHH:MM:SS` without an offset, or a bare
/// `YYYY-MM-DD` date. Naive values are interpreted as UTC.
///
/// # Returns
///
/// The parsed timestamp, or `None` if the input matches none of the
/// accepted shapes.
pub fn parse_iso_datetime(raw: &str) -> Option<DateTime<FixedOffset>> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc().fixed_offset());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Normalize a raw timestamp string to canonical ISO-8601.
///
/// A trailing `Z` comes back as an explicit `+00:00` offset, e.g.
/// `2024-01-01T00:00:00Z` -> `2024-01-01T00:00:00+00:00`.
///
/// # Returns
///
/// The normalized string, or `None` when the input does not parse.
pub fn normalize_date(raw: &str) -> Option<String> {
    parse_iso_datetime(raw).map(|parsed| parsed.to_rfc3339())
}

/// Derive a record id from an article URL.
///
/// Takes the last path segment consisting entirely of digits, ignoring any
/// query string or fragment. Thairath article URLs end in a numeric id
/// (`/news/politic/2756499`); pages with slug-only paths yield `None` and
/// the caller falls back to a timestamp-derived id.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(extract_id_from_url("https://x/news/politic/12345"), Some("12345".into()));
/// assert_eq!(extract_id_from_url("https://x/news/some-slug"), None);
/// ```
pub fn extract_id_from_url(url: &str) -> Option<String> {
    let path_end = url.find(['?', '#']).unwrap_or(url.len());
    url[..path_end]
        .split('/')
        .filter(|segment| NUMERIC_SEGMENT.is_match(segment))
        .next_back()
        .map(str::to_string)
}

/// Prepare a text field for tabular output.
///
/// Embedded newlines are collapsed to spaces and surrounding whitespace is
/// trimmed, so multi-paragraph content fits in a single row.
pub fn clean_field(value: &str) -> String {
    value.replace(['\r', '\n'], " ").trim().to_string()
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable
/// (permission denied, read-only filesystem, etc.).
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_date_zulu_suffix() {
        assert_eq!(
            normalize_date("2024-01-01T00:00:00Z").as_deref(),
            Some("2024-01-01T00:00:00+00:00")
        );
    }

    #[test]
    fn test_normalize_date_keeps_explicit_offset() {
        assert_eq!(
            normalize_date("2024-06-15T12:30:00+07:00").as_deref(),
            Some("2024-06-15T12:30:00+07:00")
        );
    }

    #[test]
    fn test_normalize_date_bare_date_becomes_utc_midnight() {
        assert_eq!(
            normalize_date("2024-03-09").as_deref(),
            Some("2024-03-09T00:00:00+00:00")
        );
    }

    #[test]
    fn test_normalize_date_naive_datetime() {
        assert_eq!(
            normalize_date("2024-03-09T08:15:00").as_deref(),
            Some("2024-03-09T08:15:00+00:00")
        );
    }

    #[test]
    fn test_normalize_date_rejects_garbage() {
        assert_eq!(normalize_date("yesterday"), None);
        assert_eq!(normalize_date(""), None);
    }

    #[test]
    fn test_extract_id_last_numeric_segment() {
        assert_eq!(
            extract_id_from_url("https://x/news/politic/12345"),
            Some("12345".to_string())
        );
        assert_eq!(
            extract_id_from_url("https://x/2024/81234"),
            Some("81234".to_string())
        );
    }

    #[test]
    fn test_extract_id_trailing_slash_and_query() {
        assert_eq!(
            extract_id_from_url("https://x/news/politic/12345/"),
            Some("12345".to_string())
        );
        assert_eq!(
            extract_id_from_url("https://x/news/politic/12345?ref=home"),
            Some("12345".to_string())
        );
        assert_eq!(
            extract_id_from_url("https://x/news/politic/12345#comments"),
            Some("12345".to_string())
        );
    }

    #[test]
    fn test_extract_id_ignores_numbers_in_query() {
        assert_eq!(extract_id_from_url("https://x/news/slug?page=2"), None);
    }

    #[test]
    fn test_extract_id_no_numeric_segment() {
        assert_eq!(extract_id_from_url("https://x/news/some-slug"), None);
        assert_eq!(extract_id_from_url("https://x/"), None);
    }

    #[test]
    fn test_clean_field_collapses_newlines() {
        assert_eq!(clean_field("line one\nline two"), "line one line two");
        assert_eq!(clean_field("  padded\r\ntext  "), "padded  text");
    }

    #[test]
    fn test_clean_field_empty() {
        assert_eq!(clean_field(""), "");
        assert_eq!(clean_field("\n\n"), "");
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_missing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a/b");
        let nested = nested.to_str().unwrap();
        assert!(ensure_writable_dir(nested).await.is_ok());
        assert!(std::path::Path::new(nested).is_dir());
    }
}

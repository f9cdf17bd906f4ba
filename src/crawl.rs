//! Crawl orchestration: candidate filtering and the fetch-extract-record loop.
//!
//! The orchestrator ties the pipeline together:
//!
//! 1. Resolve the sitemap hierarchy into page entries
//! 2. Keep entries that classify into a requested section, drop duplicate
//!    locations, drop entries whose last-modified falls outside the recency
//!    window
//! 3. Fetch each surviving candidate sequentially (fast-then-slow retry),
//!    extract its fields, and append the assembled record to its section's
//!    result list
//!
//! A single candidate failing never aborts the crawl; it is logged and
//! counted. The per-section map plus the ok/skipped/failed counts are the
//! contract boundary; writing files is the outputs module's job.

use crate::extract::extract_article;
use crate::fetch::{FetchText, fetch_with_fast_retry};
use crate::models::{AGENCY, ArticleRecord, SitemapEntry};
use crate::sections::{SectionRule, classify};
use crate::sitemap;
use crate::utils::extract_id_from_url;
use chrono::{Duration as ChronoDuration, Utc};
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use std::collections::HashMap;
use std::error::Error;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, instrument};

/// Pause after each successful article fetch.
const POLITENESS_DELAY: Duration = Duration::from_millis(50);

/// Run parameters for one crawl.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Root sitemap URL (index or url-set).
    pub sitemap_url: String,
    /// Entries last modified more than this many days ago are skipped.
    pub since_days: i64,
    /// Requested section names, in priority order.
    pub sections: Vec<String>,
    /// Optional cap on the number of candidates fetched.
    pub limit: Option<usize>,
    /// Cap on distinct child sitemap documents followed.
    pub max_sitemap_docs: usize,
}

/// The in-memory result of a crawl.
#[derive(Debug, Default)]
pub struct CrawlOutcome {
    /// Records grouped by section; every requested section has an entry,
    /// possibly empty.
    pub sections: HashMap<String, Vec<ArticleRecord>>,
    /// Candidates fetched, extracted, and recorded.
    pub ok: usize,
    /// Section-matching entries excluded by the recency window.
    pub skipped: usize,
    /// Candidates that failed both fetch attempts or extraction.
    pub failed: usize,
}

/// Crawl every requested section reachable from the configured sitemap.
///
/// Candidates are processed strictly sequentially; see the module docs for
/// the per-candidate lifecycle.
#[instrument(level = "info", skip_all, fields(sitemap = %config.sitemap_url))]
pub async fn run<F: FetchText>(
    fetcher: &F,
    config: &CrawlConfig,
    rules: &[SectionRule],
) -> CrawlOutcome {
    let all_entries = sitemap::resolve(fetcher, &config.sitemap_url, config.max_sitemap_docs).await;
    info!(count = all_entries.len(), "sitemap entries discovered");

    let since = Utc::now() - ChronoDuration::days(config.since_days);
    let mut skipped = 0usize;

    let mut candidates: Vec<(String, SitemapEntry)> = all_entries
        .into_iter()
        .filter_map(|entry| {
            classify(&entry.location, &config.sections, rules)
                .map(|section| (section.to_string(), entry))
        })
        .unique_by(|(_, entry)| entry.location.clone())
        .filter(|(_, entry)| match entry.last_modified {
            Some(last_modified) if last_modified.with_timezone(&Utc) < since => {
                skipped += 1;
                false
            }
            _ => true,
        })
        .collect();

    if let Some(limit) = config.limit {
        if candidates.len() > limit {
            info!(limit, dropped = candidates.len() - limit, "applying candidate limit");
            candidates.truncate(limit);
        }
    }

    info!(
        candidates = candidates.len(),
        skipped, "filtered sitemap entries"
    );

    // Strictly sequential: `then` drives one fetch-extract cycle at a time.
    let processed: Vec<Option<(String, ArticleRecord)>> = stream::iter(candidates)
        .then(|(section, entry)| async move {
            match fetch_and_extract(fetcher, &section, &entry).await {
                Ok(record) => {
                    info!(url = %entry.location, %section, "saved article");
                    sleep(POLITENESS_DELAY).await;
                    Some((section, record))
                }
                Err(e) => {
                    error!(url = %entry.location, error = %e, "article fetch failed");
                    None
                }
            }
        })
        .collect()
        .await;

    let mut outcome = CrawlOutcome {
        skipped,
        ..Default::default()
    };
    for section in &config.sections {
        outcome.sections.insert(section.clone(), Vec::new());
    }
    for item in processed {
        match item {
            Some((section, record)) => {
                outcome.sections.entry(section).or_default().push(record);
                outcome.ok += 1;
            }
            None => outcome.failed += 1,
        }
    }

    info!(
        ok = outcome.ok,
        skipped = outcome.skipped,
        failed = outcome.failed,
        "crawl complete"
    );
    outcome
}

/// Fetch one candidate and assemble its dataset record.
async fn fetch_and_extract<F: FetchText>(
    fetcher: &F,
    section: &str,
    entry: &SitemapEntry,
) -> Result<ArticleRecord, Box<dyn Error>> {
    let html = fetch_with_fast_retry(fetcher, &entry.location).await?;
    let article = extract_article(&html, &entry.location);
    let id = extract_id_from_url(&entry.location)
        .unwrap_or_else(|| Utc::now().timestamp().to_string());

    Ok(ArticleRecord {
        agency: AGENCY.to_string(),
        section: section.to_string(),
        id,
        published_iso: article.published_iso.unwrap_or_default(),
        headline: article.headline,
        summary: article.summary,
        content: article.content,
        url: entry.location.clone(),
    })
}

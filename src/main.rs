//! # Thairath Sitemap News
//!
//! Crawls the Thairath news sitemap hierarchy, classifies article URLs into
//! topical sections, extracts article metadata from each page, and writes
//! per-section CSV and JSON datasets.
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Resolve**: expand the sitemap index into page URL entries
//! 2. **Filter**: keep entries matching a requested section, drop duplicate
//!    locations and entries outside the recency window
//! 3. **Fetch**: download each candidate sequentially with a fast-then-slow
//!    retry and a short politeness delay
//! 4. **Extract**: pull headline, summary, body, and publication time out of
//!    the page HTML
//! 5. **Output**: write one CSV and one JSON dataset per section
//!
//! ## Usage
//!
//! ```sh
//! thairath_sitemap_news --sitemap https://www.thairath.co.th/sitemap.xml \
//!     --sections politic,economics --since-days 30
//! ```
//!
//! Per-article failures are logged and counted but never abort a run; the
//! only fatal errors are configuration problems caught before any fetching
//! starts.

use clap::Parser;
use std::error::Error;
use std::path::Path;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};
use url::Url;

mod cli;
mod crawl;
mod extract;
mod fetch;
mod models;
mod outputs;
mod sections;
mod sitemap;
mod utils;

use cli::Cli;
use fetch::HttpFetcher;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    dotenvy::dotenv().ok();

    let start_time = std::time::Instant::now();
    info!("thairath crawl starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.sitemap, ?args.sections, args.since_days, "Parsed CLI arguments");

    // --- Config checks, before any network activity ---
    if let Err(e) = Url::parse(&args.sitemap) {
        error!(sitemap = %args.sitemap, error = %e, "--sitemap is not a valid URL");
        return Err(e.into());
    }

    for out_path in [&args.out_csv, &args.out_json] {
        if let Some(dir) = Path::new(out_path)
            .parent()
            .and_then(|parent| parent.to_str())
            .filter(|dir| !dir.is_empty())
        {
            if let Err(e) = ensure_writable_dir(dir).await {
                error!(
                    path = %dir,
                    error = %e,
                    "Output directory is not writable (fix perms or choose a different path)"
                );
                return Err(e);
            }
        }
    }

    let config = crawl::CrawlConfig {
        sitemap_url: args.sitemap.clone(),
        since_days: args.since_days,
        sections: args.section_names(),
        limit: args.limit,
        max_sitemap_docs: args.max_sitemaps,
    };

    // ---- Crawl ----
    let fetcher = HttpFetcher::new()?;
    let outcome = crawl::run(&fetcher, &config, sections::builtin_rules()).await;

    // ---- Write per-section datasets ----
    for section in &config.sections {
        let records = match outcome.sections.get(section) {
            Some(records) if !records.is_empty() => records,
            _ => continue,
        };
        if let Err(e) = outputs::csv::write_section_csv(&args.out_csv, section, records).await {
            error!(%section, error = %e, "Failed to write section CSV");
        }
        if let Err(e) = outputs::json::write_section_json(&args.out_json, section, records).await {
            error!(%section, error = %e, "Failed to write section JSON");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ok = outcome.ok,
        skipped = outcome.skipped,
        failed = outcome.failed,
        ?elapsed,
        "Execution complete"
    );

    Ok(())
}

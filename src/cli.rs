//! Command-line interface definitions for the Thairath sitemap crawler.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The sitemap URL can also be provided via environment variable (and so via
//! a `.env` file), which suits scheduled runs.

use clap::Parser;

/// Command-line arguments for the Thairath sitemap crawler.
///
/// # Examples
///
/// ```sh
/// # Crawl the default sections
/// thairath_sitemap_news --sitemap https://www.thairath.co.th/sitemap.xml
///
/// # Politics only, last 30 days, at most 200 articles
/// thairath_sitemap_news --sitemap https://www.thairath.co.th/sitemap.xml \
///     --sections politic --since-days 30 --limit 200
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Root sitemap URL (a sitemap index or a url-set document)
    #[arg(long, env = "THAIRATH_SITEMAP")]
    pub sitemap: String,

    /// Skip articles last modified more than this many days ago
    #[arg(long, default_value_t = 1825)]
    pub since_days: i64,

    /// Comma-separated section names to crawl
    #[arg(long, default_value = "economics,investment,tech_innovation,politic")]
    pub sections: String,

    /// Maximum number of articles to fetch (unlimited when omitted)
    #[arg(long)]
    pub limit: Option<usize>,

    /// CSV output path template; `.csv` becomes `_{section}.csv`
    #[arg(long, default_value = "data/thairath_dataset.csv")]
    pub out_csv: String,

    /// JSON output path template; `.json` becomes `_{section}.json`
    #[arg(long, default_value = "data/thairath_dataset.json")]
    pub out_json: String,

    /// Maximum number of sitemap index documents to follow
    #[arg(long, default_value_t = 500)]
    pub max_sitemaps: usize,
}

impl Cli {
    /// The requested section names, trimmed, in the order given.
    pub fn section_names(&self) -> Vec<String> {
        self.sections
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from([
            "thairath_sitemap_news",
            "--sitemap",
            "https://www.thairath.co.th/sitemap.xml",
        ]);

        assert_eq!(cli.sitemap, "https://www.thairath.co.th/sitemap.xml");
        assert_eq!(cli.since_days, 1825);
        assert_eq!(cli.limit, None);
        assert_eq!(cli.max_sitemaps, 500);
        assert_eq!(cli.out_csv, "data/thairath_dataset.csv");
        assert_eq!(cli.out_json, "data/thairath_dataset.json");
        assert_eq!(
            cli.section_names(),
            vec!["economics", "investment", "tech_innovation", "politic"]
        );
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "thairath_sitemap_news",
            "--sitemap",
            "https://x/sitemap.xml",
            "--since-days",
            "30",
            "--sections",
            "politic, personal_finance",
            "--limit",
            "200",
        ]);

        assert_eq!(cli.since_days, 30);
        assert_eq!(cli.limit, Some(200));
        assert_eq!(cli.section_names(), vec!["politic", "personal_finance"]);
    }

    #[test]
    fn test_cli_section_names_drops_empty_pieces() {
        let cli = Cli::parse_from([
            "thairath_sitemap_news",
            "--sitemap",
            "https://x/sitemap.xml",
            "--sections",
            "politic,,economics,",
        ]);

        assert_eq!(cli.section_names(), vec!["politic", "economics"]);
    }
}

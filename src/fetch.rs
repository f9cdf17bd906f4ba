//! HTTP fetch client with a fast-then-slow retry policy.
//!
//! The crawl makes many small page fetches against one site, so instead of a
//! general backoff loop the policy is exactly two attempts: a short-timeout
//! attempt to keep the common case fast, then after a brief cooldown one
//! longer-timeout attempt. The second failure propagates to the caller.
//!
//! # Architecture
//!
//! The module uses a trait-based design for flexibility:
//! - [`FetchText`]: core trait for fetching a URL's body with a timeout
//! - [`HttpFetcher`]: wraps a configured `reqwest::Client`
//! - [`fetch_with_fast_retry`]: applies the two-attempt policy to any
//!   [`FetchText`] implementation
//!
//! Tests substitute in-memory fetchers for [`HttpFetcher`], so nothing above
//! this module ever touches the network directly.

use reqwest::Client;
use std::error::Error;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

/// Timeout for the first article fetch attempt.
pub const FAST_TIMEOUT: Duration = Duration::from_secs(2);
/// Timeout for the single retry attempt.
pub const SLOW_TIMEOUT: Duration = Duration::from_secs(3);
/// Timeout for sitemap document fetches, which can be large.
pub const SITEMAP_TIMEOUT: Duration = Duration::from_secs(10);
/// Pause between the two attempts.
const RETRY_COOLDOWN: Duration = Duration::from_millis(200);

/// Trait for fetching the text body of a URL.
///
/// Timeouts, non-2xx statuses, and transport failures all collapse into the
/// single error case; callers only distinguish success from failure.
pub trait FetchText {
    /// Fetch `url` and return its body as text.
    async fn fetch_text(&self, url: &str, timeout: Duration) -> Result<String, Box<dyn Error>>;
}

/// HTTP implementation of [`FetchText`] over a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher with the client configuration the crawl uses
    /// throughout: a browser-like user agent, per-request timeouts.
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent("Mozilla/5.0").build()?;
        Ok(Self { client })
    }
}

impl FetchText for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch_text(&self, url: &str, timeout: Duration) -> Result<String, Box<dyn Error>> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        debug!(bytes = body.len(), "fetched page");
        Ok(body)
    }
}

/// Fetch an article page, retrying once with a longer timeout.
///
/// # Retry Behavior
///
/// 1. Attempt with [`FAST_TIMEOUT`]
/// 2. On any failure: wait [`RETRY_COOLDOWN`], attempt with [`SLOW_TIMEOUT`]
/// 3. A second failure is returned to the caller; no further retries
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn fetch_with_fast_retry<F: FetchText>(
    fetcher: &F,
    url: &str,
) -> Result<String, Box<dyn Error>> {
    match fetcher.fetch_text(url, FAST_TIMEOUT).await {
        Ok(body) => Ok(body),
        Err(e) => {
            warn!(%url, error = %e, "fast attempt failed; retrying with longer timeout");
            sleep(RETRY_COOLDOWN).await;
            fetcher.fetch_text(url, SLOW_TIMEOUT).await
        }
    }
}

//! HTTP client for DK Oldies: the sell page and the storefront search API.

use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};
use wreq::Client;
use wreq_util::Emulation;

const DKOLDIES_BASE: &str = "https://www.dkoldies.com";

/// Challenge-page marker; the sell page sits behind bot protection that
/// serves an interstitial with this phrase instead of a hard status code.
const CHALLENGE_MARKER: &str = "just a moment";

/// Why a live buy-list acquisition attempt failed. Every variant triggers
/// the bundled-snapshot fallback; none of them surface to callers.
#[derive(Debug, thiserror::Error)]
pub enum AcquireError {
    #[error("sell page returned status {0}")]
    BadStatus(u16),
    #[error("bot challenge page detected")]
    Blocked,
    #[error("sell page request failed: {0}")]
    Request(String),
    #[error("sell page yielded no buy rows")]
    NoRows,
}

/// Trait for DK Oldies fetching - enables mocking for tests.
#[async_trait]
pub trait BuylistSource: Send + Sync {
    /// Fetches the sell-page HTML. Detects challenge pages and bad statuses.
    async fn sell_page(&self) -> Result<String, AcquireError>;

    /// Queries the storefront search API, returning the raw JSON body.
    async fn retail_search(&self, query: &str) -> Result<String>;
}

/// DK Oldies HTTP client.
///
/// Two inner clients because the two endpoints want very different budgets:
/// the sell page is a slow, challenge-prone full-page load (20s), the search
/// API is a fast JSON endpoint (8s).
pub struct DkOldiesClient {
    sell: Client,
    api: Client,
    base_url: String,
    api_url: String,
}

impl DkOldiesClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_urls(config, None, None)
    }

    /// Creates a new client with custom base URLs (for testing).
    pub fn with_base_urls(
        config: &Config,
        base_url: Option<String>,
        api_url: Option<String>,
    ) -> Result<Self> {
        let sell = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(20))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let api = Client::builder()
            .gzip(true)
            .timeout(Duration::from_secs(8))
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            sell,
            api,
            base_url: base_url.unwrap_or_else(|| DKOLDIES_BASE.to_string()),
            api_url: api_url.unwrap_or_else(|| {
                format!("https://{}.a.searchspring.io", config.searchspring_site_id)
            }),
        })
    }

    fn site_id(&self) -> &str {
        // The site id is baked into the api_url host; keep the query param in
        // sync with whatever id the URL was built from.
        self.api_url
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .split('.')
            .next()
            .unwrap_or_default()
    }
}

#[async_trait]
impl BuylistSource for DkOldiesClient {
    async fn sell_page(&self) -> Result<String, AcquireError> {
        let url = format!("{}/sell-video-games/", self.base_url);
        info!("Fetching buy-list: {}", url);

        let response = self
            .sell
            .get(&url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Accept-Language", "en-US,en;q=0.5")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await
            .map_err(|e| AcquireError::Request(e.to_string()))?;

        let status = response.status();
        debug!("Sell page status: {}", status);
        if !status.is_success() {
            return Err(AcquireError::BadStatus(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| AcquireError::Request(e.to_string()))?;

        if body.to_lowercase().contains(CHALLENGE_MARKER) {
            return Err(AcquireError::Blocked);
        }

        Ok(body)
    }

    async fn retail_search(&self, query: &str) -> Result<String> {
        let url = format!(
            "{}/api/search/search.json?siteId={}&q={}&resultsFormat=json&resultsPerPage=5",
            self.api_url,
            self.site_id(),
            urlencoding::encode(query)
        );
        debug!("GET {}", url);

        let response = self
            .api
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send search API request")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Search API returned status: {}", status);
        }

        response.text().await.context("Failed to read search API response")
    }
}

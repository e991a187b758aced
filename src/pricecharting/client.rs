//! HTTP client for PriceCharting using wreq for TLS fingerprint emulation.

use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::RngExt;
use std::time::Duration;
use tracing::{debug, info};
use wreq::Client;
use wreq_util::Emulation;

const PRICECHARTING_BASE: &str = "https://www.pricecharting.com";

/// Trait for PriceCharting page fetching - enables mocking for tests.
#[async_trait]
pub trait MarketSource: Send + Sync {
    /// Fetches the search results page for a query.
    async fn search_page(&self, query: &str) -> Result<String>;

    /// Fetches the game page for (platform id, slug).
    async fn game_page(&self, platform_id: &str, slug: &str) -> Result<String>;

    /// Returns the canonical game page URL for (platform id, slug).
    fn game_url(&self, platform_id: &str, slug: &str) -> String;
}

/// PriceCharting HTTP client with browser impersonation.
///
/// The site serves challenge pages to clients that don't look like browsers,
/// hence the TLS emulation and full browser header set.
pub struct PriceChartingClient {
    client: Client,
    delay_ms: u64,
    delay_jitter_ms: u64,
    base_url: String,
}

impl PriceChartingClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, None)
    }

    /// Creates a new client with an optional custom base URL (for testing).
    pub fn with_base_url(config: &Config, base_url: Option<String>) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(12))
            .connect_timeout(Duration::from_secs(8));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            delay_ms: config.delay_ms,
            delay_jitter_ms: config.delay_jitter_ms,
            base_url: base_url.unwrap_or_else(|| PRICECHARTING_BASE.to_string()),
        })
    }

    /// Performs a GET request with the browser identity headers.
    async fn get(&self, url: &str) -> Result<String> {
        self.delay().await;

        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Accept-Language", "en-US,en;q=0.5")
            .header("Accept-Encoding", "gzip, deflate, br")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            anyhow::bail!("Request failed with status: {}", status);
        }

        response.text().await.context("Failed to read response body")
    }

    /// Adds a random delay to mimic human behavior.
    async fn delay(&self) {
        if self.delay_ms == 0 {
            return;
        }

        let jitter = if self.delay_jitter_ms > 0 {
            rand::rng().random_range(0..=self.delay_jitter_ms)
        } else {
            0
        };

        let total_delay = self.delay_ms + jitter;
        debug!("Delaying {}ms", total_delay);
        tokio::time::sleep(Duration::from_millis(total_delay)).await;
    }
}

#[async_trait]
impl MarketSource for PriceChartingClient {
    async fn search_page(&self, query: &str) -> Result<String> {
        let url = format!(
            "{}/search-products?q={}&type=videogames",
            self.base_url,
            urlencoding::encode(query)
        );

        info!("Searching PriceCharting: {}", query);
        self.get(&url).await
    }

    async fn game_page(&self, platform_id: &str, slug: &str) -> Result<String> {
        let url = self.game_url(platform_id, slug);

        info!("Fetching prices: {}/{}", platform_id, slug);
        self.get(&url).await
    }

    fn game_url(&self, platform_id: &str, slug: &str) -> String {
        format!("{}/game/{}/{}", self.base_url, platform_id, slug)
    }
}

//! Catalog search command.

use crate::config::Config;
use crate::format::Formatter;
use crate::pricecharting::{self, MarketSource, Platform, PriceChartingClient};
use anyhow::{Context, Result};
use tracing::info;

/// Searches the market catalog for games by title.
pub struct SearchCommand {
    config: Config,
}

impl SearchCommand {
    /// Creates a new search command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the search and returns formatted output.
    pub async fn execute(&self, query: &str, platform: Option<Platform>) -> Result<String> {
        let client =
            PriceChartingClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client, query, platform).await
    }

    /// Executes the search with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl MarketSource,
        query: &str,
        platform: Option<Platform>,
    ) -> Result<String> {
        if query.trim().is_empty() {
            anyhow::bail!("Search query must not be empty");
        }

        info!("Searching for: {}", query);

        let results = pricecharting::search(client, query, platform).await;
        info!("Found {} results", results.len());

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_catalog(&results))
    }
}

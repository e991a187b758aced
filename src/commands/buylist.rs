//! Buy-list inspection commands: show the current list, match a name.

use crate::config::Config;
use crate::dkoldies::{self, BuylistCache, BuylistSource, DkOldiesClient};
use crate::format::Formatter;
use anyhow::{Context, Result};
use std::time::Duration;

/// Inspects the retailer buy-list.
pub struct BuylistCommand {
    config: Config,
}

impl BuylistCommand {
    /// Creates a new buy-list command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn make_cache(&self) -> BuylistCache {
        BuylistCache::with_ttl(Duration::from_secs(self.config.buylist_ttl_secs))
            .with_snapshot_path(self.config.buylist_snapshot.clone())
    }

    /// Shows the current buy-list, truncated to `limit` entries.
    pub async fn show(&self, limit: usize) -> Result<String> {
        let client =
            DkOldiesClient::new(&self.config).context("Failed to create HTTP client")?;
        let cache = self.make_cache();

        self.show_with_client(&client, &cache, limit).await
    }

    /// Shows the buy-list with a provided client (for testing).
    pub async fn show_with_client(
        &self,
        client: &impl BuylistSource,
        cache: &BuylistCache,
        limit: usize,
    ) -> Result<String> {
        let buylist = cache.get(client).await;
        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_buylist(&buylist, limit))
    }

    /// Matches a free-form name against the buy-list.
    pub async fn match_name(&self, name: &str) -> Result<String> {
        let client =
            DkOldiesClient::new(&self.config).context("Failed to create HTTP client")?;
        let cache = self.make_cache();

        self.match_with_client(&client, &cache, name).await
    }

    /// Matches with a provided client (for testing).
    pub async fn match_with_client(
        &self,
        client: &impl BuylistSource,
        cache: &BuylistCache,
        name: &str,
    ) -> Result<String> {
        if name.trim().is_empty() {
            anyhow::bail!("A game name is required");
        }

        let buylist = cache.get(client).await;
        let entry = dkoldies::match_buy_price(name, &buylist);

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_buy_match(name, entry))
    }
}

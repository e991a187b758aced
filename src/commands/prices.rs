//! Full price lookup command: market prices, retail price, buy-list match,
//! and an optional deal sheet.

use crate::config::Config;
use crate::deal;
use crate::dkoldies::{BuylistCache, BuylistSource, DkOldiesClient};
use crate::format::Formatter;
use crate::identify::IdentifiedGame;
use crate::lookup::{self, LookupRequest};
use crate::price::dollars_to_cents;
use crate::pricecharting::{MarketSource, PriceChartingClient};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Arguments for one lookup.
#[derive(Debug, Clone, Default)]
pub struct PricesArgs {
    /// PriceCharting platform identifier ("nintendo-64")
    pub platform_id: String,
    /// PriceCharting item slug
    pub slug: String,
    /// Explicit display name for retailer queries
    pub name: Option<String>,
    /// Path to an external identifier result JSON; its game name is used
    /// instead of `name`
    pub identified: Option<PathBuf>,
    /// Cost in dollars being considered; adds a deal sheet to the output
    pub cost: Option<f64>,
    /// Bypass any cached lookup
    pub refresh: bool,
}

/// Executes a full price lookup.
pub struct PricesCommand {
    config: Config,
}

impl PricesCommand {
    /// Creates a new prices command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Builds the buy-list cache configured for this command.
    pub fn make_cache(&self) -> BuylistCache {
        BuylistCache::with_ttl(Duration::from_secs(self.config.buylist_ttl_secs))
            .with_snapshot_path(self.config.buylist_snapshot.clone())
    }

    /// Executes the lookup and returns formatted output.
    pub async fn execute(&self, args: &PricesArgs) -> Result<String> {
        let market =
            PriceChartingClient::new(&self.config).context("Failed to create HTTP client")?;
        let retailer =
            DkOldiesClient::new(&self.config).context("Failed to create HTTP client")?;
        let cache = self.make_cache();

        self.execute_with_clients(&market, &retailer, &cache, args).await
    }

    /// Executes the lookup with provided clients (for testing).
    pub async fn execute_with_clients(
        &self,
        market: &impl MarketSource,
        retailer: &impl BuylistSource,
        cache: &BuylistCache,
        args: &PricesArgs,
    ) -> Result<String> {
        if args.platform_id.trim().is_empty() || args.slug.trim().is_empty() {
            anyhow::bail!("Both a platform id and an item slug are required");
        }
        if let Some(cost) = args.cost {
            if cost <= 0.0 {
                anyhow::bail!("Cost must be positive");
            }
        }

        let name = match &args.identified {
            Some(path) => Some(load_identified_name(path)?),
            None => args.name.clone(),
        };

        let request = LookupRequest {
            platform_id: args.platform_id.clone(),
            slug: args.slug.clone(),
            name,
            force_refresh: args.refresh,
        };

        let result = lookup::lookup(market, retailer, cache, None, &request).await;

        let formatter = Formatter::new(self.config.format);
        let mut output = formatter.format_lookup(&result);

        if let Some(cost) = args.cost {
            let cost_cents = dollars_to_cents(cost);
            let deals = deal::rate_prices(cost_cents, &result.prices);
            output.push_str("\n\n");
            output.push_str(&formatter.format_deals(cost_cents, &deals));
        }

        Ok(output)
    }
}

/// Reads an identifier result file and extracts a usable game name.
///
/// An unidentified or nameless result is an error — the lookup refuses to
/// proceed rather than invent a title.
fn load_identified_name(path: &Path) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read identifier result: {}", path.display()))?;

    let identified: IdentifiedGame = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse identifier result: {}", path.display()))?;

    identified
        .usable_name()
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("Identifier did not produce a confident game name"))
}

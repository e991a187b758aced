//! PriceCharting integration: catalog search and per-condition market prices.

pub mod client;
pub mod models;
pub mod parser;
pub mod platforms;
pub mod selectors;

pub use client::{MarketSource, PriceChartingClient};
pub use models::{CatalogEntry, Condition, PriceSnapshot};
pub use platforms::Platform;

use tracing::warn;

/// Searches the catalog, optionally restricted to one platform.
///
/// A failed request is a soft failure: logged, empty result. Returns at most
/// [`parser::MAX_SEARCH_RESULTS`] entries in source order.
pub async fn search(
    source: &impl MarketSource,
    query: &str,
    platform: Option<Platform>,
) -> Vec<CatalogEntry> {
    match source.search_page(query).await {
        Ok(html) => parser::parse_search(&html, platform),
        Err(e) => {
            warn!("search request failed: {:#}", e);
            Vec::new()
        }
    }
}

/// Fetches the full price breakdown for a catalog item.
///
/// Never fails: a request error yields a degraded snapshot with no prices,
/// a slug-derived title, and the error recorded.
pub async fn fetch_prices(
    source: &impl MarketSource,
    platform_id: &str,
    slug: &str,
) -> PriceSnapshot {
    let url = source.game_url(platform_id, slug);

    match source.game_page(platform_id, slug).await {
        Ok(html) => parser::parse_game_page(&html, slug, &url),
        Err(e) => {
            warn!("price fetch failed for {}/{}: {:#}", platform_id, slug, e);
            PriceSnapshot::degraded(slug, url, e.to_string())
        }
    }
}

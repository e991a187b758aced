//! Assembled price lookup: market snapshot, retail price, and buy-list match
//! for one catalog item.

use crate::dkoldies::{self, BuylistCache, BuylistEntry, BuylistSource, RetailPrice};
use crate::pricecharting::models::Condition;
use crate::pricecharting::{self, MarketSource, Platform};
use crate::store::PriceStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// What to look up.
#[derive(Debug, Clone)]
pub struct LookupRequest {
    /// PriceCharting platform identifier ("nintendo-64")
    pub platform_id: String,
    /// PriceCharting item slug
    pub slug: String,
    /// Display name to match against the buy-list; falls back to the
    /// fetched page title
    pub name: Option<String>,
    /// Bypass the price store and fetch live
    pub force_refresh: bool,
}

/// The assembled result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lookup {
    pub platform_id: String,
    pub slug: String,
    pub title: String,
    pub market_url: String,
    /// Market prices in cents by condition tier
    #[serde(default)]
    pub prices: BTreeMap<Condition, i64>,
    /// Market fetch error, when the snapshot is degraded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Retailer's current listing price, when found
    pub retail: Option<RetailPrice>,
    /// Best buy-list match, when one clears the score threshold
    pub buy: Option<BuylistEntry>,
}

/// Performs a full lookup.
///
/// The market snapshot is fetched first (its title feeds the two retailer
/// queries when the caller didn't name the game); the retail price and the
/// buy-list acquisition then run concurrently. When a store is supplied and
/// holds the item, that entry is returned untouched unless `force_refresh`
/// is set. Every leg is best-effort: a failed leg leaves its field absent.
pub async fn lookup(
    market: &impl MarketSource,
    retailer: &impl BuylistSource,
    cache: &BuylistCache,
    store: Option<&dyn PriceStore>,
    request: &LookupRequest,
) -> Lookup {
    if !request.force_refresh {
        if let Some(cached) = store.and_then(|s| s.get(&request.platform_id, &request.slug)) {
            debug!("store hit for {}/{}", request.platform_id, request.slug);
            return cached;
        }
    }

    let snapshot = pricecharting::fetch_prices(market, &request.platform_id, &request.slug).await;

    let name = request.name.clone().unwrap_or_else(|| snapshot.title.clone());
    let console_display = Platform::from_market_id(&request.platform_id)
        .map(|p| p.display_name())
        .unwrap_or_default();

    let (retail, buylist) = tokio::join!(
        dkoldies::retail_price(retailer, &name, console_display),
        cache.get(retailer),
    );

    let buy = dkoldies::match_buy_price(&name, &buylist).cloned();

    let result = Lookup {
        platform_id: request.platform_id.clone(),
        slug: request.slug.clone(),
        title: snapshot.title,
        market_url: snapshot.url,
        prices: snapshot.prices,
        error: snapshot.error,
        retail,
        buy,
    };

    if let Some(store) = store {
        store.put(&result);
    }

    result
}

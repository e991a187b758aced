//! Data models for DK Oldies buy-list and retail lookups.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One buy-list record: what the retailer pays for a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuylistEntry {
    /// Display name as published on the sell page
    pub name: String,
    /// Offered buy price in cents
    pub cents: i64,
}

/// The full buy-list, keyed by normalized name.
///
/// Keys come from [`crate::text::normalize`] and are not guaranteed unique
/// across source rows; collisions silently overwrite (last write wins). The
/// sorted key order also makes fuzzy-match tie-breaking deterministic.
pub type BuylistMap = BTreeMap<String, BuylistEntry>;

/// A retail listing price from the storefront search API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetailPrice {
    /// Listing name
    pub name: String,
    /// Listing price in cents
    pub cents: i64,
    /// Product page URL
    pub url: String,
}

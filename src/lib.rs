//! retro-pricer - Point-of-sale price checker for used video games
//!
//! Looks up market prices from PriceCharting, retail and buy-list prices
//! from DK Oldies, and rates a considered cost against both.

pub mod commands;
pub mod config;
pub mod deal;
pub mod dkoldies;
pub mod format;
pub mod identify;
pub mod lookup;
pub mod price;
pub mod pricecharting;
pub mod store;
pub mod text;

pub use config::Config;
pub use deal::{DealRating, DealTier};
pub use dkoldies::{BuylistCache, BuylistEntry, BuylistMap};
pub use lookup::{Lookup, LookupRequest};
pub use pricecharting::{CatalogEntry, Condition, Platform, PriceSnapshot};

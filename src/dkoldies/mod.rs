//! DK Oldies integration: buy-list acquisition, fuzzy buy-price matching,
//! and retail listing prices.

pub mod buylist;
pub mod client;
pub mod matcher;
pub mod models;
pub mod parser;
pub mod retail;
pub mod snapshot;

pub use buylist::{BuylistCache, BUYLIST_TTL};
pub use client::{AcquireError, BuylistSource, DkOldiesClient};
pub use matcher::{match_buy_price, MIN_MATCH_SCORE};
pub use models::{BuylistEntry, BuylistMap, RetailPrice};
pub use retail::retail_price;

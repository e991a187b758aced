//! CLI command implementations.

pub mod buylist;
pub mod deal;
pub mod prices;
pub mod search;

pub use buylist::BuylistCommand;
pub use deal::DealCommand;
pub use prices::{PricesArgs, PricesCommand};
pub use search::SearchCommand;

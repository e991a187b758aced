//! CSS selectors for PriceCharting HTML parsing.
//!
//! All selectors used for parsing PriceCharting pages live here. Update this
//! file when the upstream markup changes.
//!
//! **Update process**: when parsing fails, capture an HTML sample, update
//! selectors, and add a test fixture.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for the search results page.
pub mod search {
    use super::*;

    /// Results table. The id form is current; the class form is the older
    /// markup that still shows up on some cached pages.
    pub static GAMES_TABLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("#games_table, table.games").unwrap());

    /// One result row.
    pub static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tbody tr").unwrap());

    /// Title cell link; href carries the /game/{platform}/{slug} path.
    pub static TITLE_LINK: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("td.title a").unwrap());

    /// Console label cell.
    pub static CONSOLE_CELL: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("td.console").unwrap());

    /// Price cells, in loose/CIB column order.
    pub static PRICE_CELL: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("td.price").unwrap());
}

/// Selectors for an individual game page (HTML fallback tier).
pub mod game {
    use super::*;

    /// Page heading holding the game title.
    pub static HEADING: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());

    /// Loose price element.
    pub static USED_PRICE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("#used-price").unwrap());

    /// Complete-in-box price element.
    pub static COMPLETE_PRICE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("#complete-price").unwrap());

    /// New/sealed price element.
    pub static NEW_PRICE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("#new-price").unwrap());
}

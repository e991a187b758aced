//! HTML parser for the DK Oldies sell page.

use crate::dkoldies::models::{BuylistEntry, BuylistMap};
use crate::price;
use crate::text::normalize;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

// Selectors for the sell-page buy rows
mod selectors {
    use super::*;

    pub static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".pd_row").unwrap());

    /// Label cell; older markup used a bare <label>.
    pub static LABEL: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".pd_label, label").unwrap());

    pub static PRICE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".pd_price").unwrap());
}

/// Parses the sell page into a buy-list mapping.
///
/// Rows missing either cell are skipped, as are rows whose price doesn't
/// parse to something strictly positive. The price cell carries ▲/▼ trend
/// arrows next to the amount; those are stripped before parsing.
pub fn parse_buylist(html: &str) -> BuylistMap {
    let document = Html::parse_document(html);
    let mut buylist = BuylistMap::new();

    for row in document.select(&selectors::ROW) {
        let Some(label) = row.select(&selectors::LABEL).next() else {
            continue;
        };
        let Some(price_el) = row.select(&selectors::PRICE).next() else {
            continue;
        };

        let name = label
            .text()
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            continue;
        }

        let price_text: String =
            price_el.text().collect::<String>().replace(['▲', '▼'], "");
        let Some(cents) = price::parse_cents(&price_text) else {
            continue;
        };
        if cents <= 0 {
            continue;
        }

        buylist.insert(normalize(&name), BuylistEntry { name, cents });
    }

    debug!("parsed {} buy-list rows", buylist.len());
    buylist
}

#[cfg(test)]
mod tests {
    use super::*;

    const SELL_PAGE: &str = r#"
        <html><body>
        <div class="pd_row">
            <span class="pd_label">Super Mario 64</span>
            <span class="pd_price">▲ $35.00</span>
        </div>
        <div class="pd_row">
            <label>Zelda: Ocarina of Time</label>
            <span class="pd_price">$60.00 ▼</span>
        </div>
        <div class="pd_row">
            <span class="pd_label">Broken Row</span>
        </div>
        <div class="pd_row">
            <span class="pd_label">Free Game</span>
            <span class="pd_price">$0.00</span>
        </div>
        <div class="pd_row">
            <span class="pd_label">Unpriced Game</span>
            <span class="pd_price">call us</span>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_buylist() {
        let buylist = parse_buylist(SELL_PAGE);
        assert_eq!(buylist.len(), 2);

        let entry = &buylist[&normalize("Super Mario 64")];
        assert_eq!(entry.name, "Super Mario 64");
        assert_eq!(entry.cents, 3500);

        let entry = &buylist[&normalize("Zelda: Ocarina of Time")];
        assert_eq!(entry.name, "Zelda: Ocarina of Time");
        assert_eq!(entry.cents, 6000);
    }

    #[test]
    fn test_parse_buylist_skips_bad_rows() {
        let buylist = parse_buylist(SELL_PAGE);
        // Missing price cell, zero price, and unparseable price all skipped
        assert!(!buylist.values().any(|e| e.name == "Broken Row"));
        assert!(!buylist.values().any(|e| e.name == "Free Game"));
        assert!(!buylist.values().any(|e| e.name == "Unpriced Game"));
    }

    #[test]
    fn test_parse_buylist_label_text_joined() {
        let html = r#"
            <div class="pd_row">
                <span class="pd_label">Pokemon <b>Crystal</b> Version</span>
                <span class="pd_price">$95.00</span>
            </div>
        "#;
        let buylist = parse_buylist(html);
        let entry = buylist.values().next().unwrap();
        assert_eq!(entry.name, "Pokemon Crystal Version");
    }

    #[test]
    fn test_parse_buylist_empty() {
        assert!(parse_buylist("").is_empty());
        assert!(parse_buylist("<html><body><p>nothing here</p></body></html>").is_empty());
    }
}

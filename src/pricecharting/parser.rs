//! HTML and embedded-JSON parsing for PriceCharting pages.

use crate::price;
use crate::pricecharting::models::{humanize_slug, CatalogEntry, Condition, PriceSnapshot};
use crate::pricecharting::platforms::Platform;
use crate::pricecharting::selectors::{game, search};
use regex_lite::Regex;
use scraper::{ElementRef, Html};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::{debug, trace, warn};

/// Search results are capped after platform filtering.
pub const MAX_SEARCH_RESULTS: usize = 15;

/// Heading suffix PriceCharting appends to game titles.
const TITLE_SUFFIX: &str = " Prices";

/// Inline script assignment holding the per-condition price history.
static CHART_DATA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)VGPC\.chart_data\s*=\s*(\{.*?\});").unwrap());

/// Chart series key to condition tier mapping.
const CHART_KEYS: &[(&str, Condition)] = &[
    ("used", Condition::Loose),
    ("cib", Condition::Cib),
    ("new", Condition::New),
    ("graded", Condition::Graded),
    ("boxonly", Condition::BoxOnly),
    ("manualonly", Condition::ManualOnly),
];

/// Parses the search results table into catalog entries.
///
/// Rows that don't carry a parseable /game/{platform}/{slug} link are
/// skipped, as are rows filtered out by `platform`. Source row order is
/// preserved; at most [`MAX_SEARCH_RESULTS`] entries are returned.
pub fn parse_search(html: &str, platform: Option<Platform>) -> Vec<CatalogEntry> {
    let document = Html::parse_document(html);

    let Some(table) = document.select(&search::GAMES_TABLE).next() else {
        warn!("no games table found in search response");
        return Vec::new();
    };

    let filter_id = platform.map(|p| p.market_id());
    let mut entries = Vec::new();

    for row in table.select(&search::ROW) {
        let Some(entry) = parse_search_row(row, filter_id) else {
            continue;
        };
        trace!("parsed result: {} [{}]", entry.name, entry.platform_id);
        entries.push(entry);
    }

    entries.truncate(MAX_SEARCH_RESULTS);
    debug!("parsed {} search results", entries.len());
    entries
}

fn parse_search_row(row: ElementRef, filter_id: Option<&str>) -> Option<CatalogEntry> {
    let link = row.select(&search::TITLE_LINK).next()?;
    let href = link.value().attr("href")?;

    // "/game/nintendo-64/zelda-ocarina-of-time" -> (platform_id, slug)
    let game_path = href.split_once("/game/")?.1;
    let (platform_id, slug) = game_path.split_once('/')?;
    let slug = slug.split(['/', '?']).next().unwrap_or(slug);
    if platform_id.is_empty() || slug.is_empty() {
        return None;
    }

    if let Some(filter_id) = filter_id {
        if platform_id != filter_id {
            return None;
        }
    }

    let name = link.text().collect::<String>().trim().to_string();

    let console_name = row
        .select(&search::CONSOLE_CELL)
        .next()
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| humanize_slug(platform_id));

    let price_cells: Vec<_> = row.select(&search::PRICE_CELL).collect();
    let loose_cents =
        price_cells.first().and_then(|cell| price::parse_cents(&cell.text().collect::<String>()));
    let cib_cents =
        price_cells.get(1).and_then(|cell| price::parse_cents(&cell.text().collect::<String>()));

    Some(CatalogEntry {
        name,
        console_name,
        platform_id: platform_id.to_string(),
        slug: slug.to_string(),
        loose_cents,
        cib_cents,
    })
}

/// Parses a game page into a price snapshot.
///
/// Extraction is two-tier: the embedded `VGPC.chart_data` JSON wins when it
/// yields anything; the per-id HTML price elements are the fallback. Every
/// step degrades field-by-field — this function always returns a snapshot.
pub fn parse_game_page(html: &str, slug: &str, url: &str) -> PriceSnapshot {
    let document = Html::parse_document(html);

    let mut prices = extract_chart_prices(html);
    if prices.is_empty() {
        debug!("no chart data for {}, trying HTML price elements", slug);
        prices = extract_html_prices(&document);
    }

    let title = extract_title(&document).unwrap_or_else(|| humanize_slug(slug));

    PriceSnapshot { title, url: url.to_string(), prices, error: None }
}

/// Pulls the most recent price point per condition out of the embedded chart
/// JSON. Absent or malformed JSON yields an empty map; a malformed single
/// series only loses that series.
fn extract_chart_prices(html: &str) -> BTreeMap<Condition, i64> {
    let mut prices = BTreeMap::new();

    let Some(captures) = CHART_DATA_RE.captures(html) else {
        return prices;
    };
    let raw = captures.get(1).map(|m| m.as_str()).unwrap_or_default();

    let chart: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            debug!("chart data JSON did not parse: {}", e);
            return prices;
        }
    };

    for (key, condition) in CHART_KEYS {
        let Some(series) = chart.get(*key) else {
            continue;
        };
        // Each series is [[timestamp, cents], ...]; the last point is current.
        let Ok(points) = serde_json::from_value::<Vec<(f64, f64)>>(series.clone()) else {
            debug!("chart series '{}' has unexpected shape", key);
            continue;
        };
        if let Some(point) = points.last() {
            prices.insert(*condition, point.1 as i64);
        }
    }

    prices
}

/// HTML fallback: three known price elements, structured attribute first,
/// visible text second.
fn extract_html_prices(document: &Html) -> BTreeMap<Condition, i64> {
    let mut prices = BTreeMap::new();

    let elements = [
        (&game::USED_PRICE, Condition::Loose),
        (&game::COMPLETE_PRICE, Condition::Cib),
        (&game::NEW_PRICE, Condition::New),
    ];

    for (selector, condition) in elements {
        let Some(element) = document.select(selector).next() else {
            continue;
        };
        let cents = match element.value().attr("data-price") {
            Some(attr) => price::parse_cents(attr),
            None => price::parse_cents(&element.text().collect::<String>()),
        };
        if let Some(cents) = cents {
            prices.insert(condition, cents);
        }
    }

    prices
}

/// Takes the first non-empty text fragment inside the page heading, so nested
/// console-name spans don't pollute the title, and strips the " Prices"
/// suffix PriceCharting appends.
fn extract_title(document: &Html) -> Option<String> {
    let heading = document.select(&game::HEADING).next()?;

    let title = heading.text().map(str::trim).find(|fragment| !fragment.is_empty())?;
    let title = title.strip_suffix(TITLE_SUFFIX).unwrap_or(title);

    Some(title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_HTML: &str = r#"
        <html><body>
        <table id="games_table"><tbody>
            <tr>
                <td class="title"><a href="/game/nintendo-64/zelda-ocarina-of-time">Zelda Ocarina of Time</a></td>
                <td class="console">Nintendo 64</td>
                <td class="price">$45.00</td>
                <td class="price">$89.99</td>
            </tr>
            <tr>
                <td class="title"><a href="/game/super-nintendo/chrono-trigger">Chrono Trigger</a></td>
                <td class="console">Super Nintendo</td>
                <td class="price">$95.50</td>
                <td class="price">-</td>
            </tr>
            <tr>
                <td class="title"><a href="/console/nintendo-64">Nintendo 64 System</a></td>
            </tr>
        </tbody></table>
        </body></html>
    "#;

    #[test]
    fn test_parse_search_rows() {
        let entries = parse_search(SEARCH_HTML, None);
        assert_eq!(entries.len(), 2);

        let entry = &entries[0];
        assert_eq!(entry.name, "Zelda Ocarina of Time");
        assert_eq!(entry.console_name, "Nintendo 64");
        assert_eq!(entry.platform_id, "nintendo-64");
        assert_eq!(entry.slug, "zelda-ocarina-of-time");
        assert_eq!(entry.loose_cents, Some(4500));
        assert_eq!(entry.cib_cents, Some(8999));

        // Second row: malformed CIB column degrades to None, not an error
        assert_eq!(entries[1].loose_cents, Some(9550));
        assert_eq!(entries[1].cib_cents, None);
    }

    #[test]
    fn test_parse_search_platform_filter() {
        let entries = parse_search(SEARCH_HTML, Some(Platform::Snes));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].slug, "chrono-trigger");

        let entries = parse_search(SEARCH_HTML, Some(Platform::Wii));
        assert!(entries.is_empty());
    }

    #[test]
    fn test_parse_search_no_table() {
        assert!(parse_search("<html><body><p>Down for maintenance</p></body></html>", None)
            .is_empty());
        assert!(parse_search("", None).is_empty());
    }

    #[test]
    fn test_parse_search_missing_console_cell() {
        let html = r#"
            <table id="games_table"><tbody>
                <tr><td class="title"><a href="/game/sega-genesis/sonic-2">Sonic 2</a></td></tr>
            </tbody></table>
        "#;
        let entries = parse_search(html, None);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].console_name, "Sega Genesis");
        assert!(entries[0].loose_cents.is_none());
    }

    #[test]
    fn test_parse_search_truncates() {
        let mut rows = String::new();
        for i in 0..30 {
            rows.push_str(&format!(
                r#"<tr><td class="title"><a href="/game/nes/game-{i}">Game {i}</a></td></tr>"#
            ));
        }
        let html = format!(r#"<table id="games_table"><tbody>{rows}</tbody></table>"#);

        let entries = parse_search(&html, None);
        assert_eq!(entries.len(), MAX_SEARCH_RESULTS);
        // Source order preserved
        assert_eq!(entries[0].slug, "game-0");
        assert_eq!(entries[14].slug, "game-14");
    }

    fn game_html(chart_data: &str, fallback: &str) -> String {
        format!(
            r#"<html><head><script>
            var VGPC = VGPC || {{}};
            VGPC.chart_data = {chart_data};
            </script></head><body>
            <h1>
                Zelda Ocarina of Time Prices
                <span class="console">Nintendo 64</span>
            </h1>
            {fallback}
            </body></html>"#
        )
    }

    #[test]
    fn test_parse_game_page_chart_data() {
        let html = game_html(
            r#"{"used": [[1700000000, 4200], [1710000000, 4500]],
                "cib": [[1710000000, 8999]],
                "new": [],
                "graded": [[1710000000, 45000]],
                "boxonly": [[1710000000, 2100]],
                "manualonly": [[1710000000, 900]]}"#,
            "",
        );

        let snapshot = parse_game_page(&html, "zelda-ocarina-of-time", "http://x/game");
        assert_eq!(snapshot.title, "Zelda Ocarina of Time");
        // Most recent point per series
        assert_eq!(snapshot.price(Condition::Loose), Some(4500));
        assert_eq!(snapshot.price(Condition::Cib), Some(8999));
        assert_eq!(snapshot.price(Condition::Graded), Some(45000));
        assert_eq!(snapshot.price(Condition::BoxOnly), Some(2100));
        assert_eq!(snapshot.price(Condition::ManualOnly), Some(900));
        // Empty series stays absent
        assert!(snapshot.price(Condition::New).is_none());
        assert!(snapshot.error.is_none());
    }

    #[test]
    fn test_parse_game_page_chart_beats_html_fallback() {
        let html = game_html(
            r#"{"used": [[1710000000, 4500]]}"#,
            r#"<table><tr><td id="used-price" data-price="99.00">$99.00</td></tr></table>"#,
        );

        let snapshot = parse_game_page(&html, "zelda-ocarina-of-time", "http://x/game");
        assert_eq!(snapshot.price(Condition::Loose), Some(4500));
    }

    #[test]
    fn test_parse_game_page_html_fallback() {
        let html = r#"
            <html><body>
            <h1>Chrono Trigger Prices</h1>
            <table>
                <tr><td id="used-price" data-price="95.50">$95.50</td></tr>
                <tr><td id="complete-price">$189.99</td></tr>
                <tr><td id="new-price">n/a</td></tr>
            </table>
            </body></html>
        "#;

        let snapshot = parse_game_page(html, "chrono-trigger", "http://x/game");
        assert_eq!(snapshot.price(Condition::Loose), Some(9550));
        assert_eq!(snapshot.price(Condition::Cib), Some(18999));
        assert!(snapshot.price(Condition::New).is_none());
    }

    #[test]
    fn test_parse_game_page_malformed_chart_falls_through() {
        let html = game_html(
            r#"{"used": [[1710000000, 4500]"#, // truncated, never matches the regex
            r#"<table><tr><td id="used-price">$12.00</td></tr></table>"#,
        );

        let snapshot = parse_game_page(&html, "some-game", "http://x/game");
        assert_eq!(snapshot.price(Condition::Loose), Some(1200));
    }

    #[test]
    fn test_parse_game_page_bad_series_shape() {
        let html = game_html(
            r#"{"used": {"oops": true}, "cib": [[1710000000, 8999]]}"#,
            "",
        );

        let snapshot = parse_game_page(&html, "some-game", "http://x/game");
        assert!(snapshot.price(Condition::Loose).is_none());
        assert_eq!(snapshot.price(Condition::Cib), Some(8999));
    }

    #[test]
    fn test_parse_game_page_no_heading() {
        let snapshot = parse_game_page("<html><body></body></html>", "super-mario-64", "http://x");
        assert_eq!(snapshot.title, "Super Mario 64");
        assert!(!snapshot.has_prices());
    }

    #[test]
    fn test_extract_title_first_fragment() {
        let document = Html::parse_document(
            "<h1>  Earthbound Prices <span>Super Nintendo</span></h1>",
        );
        assert_eq!(extract_title(&document), Some("Earthbound".to_string()));
    }

    #[test]
    fn test_extract_title_no_suffix() {
        let document = Html::parse_document("<h1>Earthbound</h1>");
        assert_eq!(extract_title(&document), Some("Earthbound".to_string()));
    }
}

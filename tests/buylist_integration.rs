//! Integration tests for buy-list acquisition, fallback, and matching.

use retro_pricer::config::Config;
use retro_pricer::dkoldies::{self, BuylistCache, DkOldiesClient};
use std::io::Write;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SELL_PAGE: &str = r#"
    <html><body>
    <div class="pd_row">
        <span class="pd_label">Super Mario 64</span>
        <span class="pd_price">▲ $35.00</span>
    </div>
    <div class="pd_row">
        <span class="pd_label">Zelda: Ocarina of Time</span>
        <span class="pd_price">$48.00 ▼</span>
    </div>
    <div class="pd_row">
        <span class="pd_label">Worthless Sports Game</span>
        <span class="pd_price">$0.00</span>
    </div>
    </body></html>
"#;

fn make_client(server: &MockServer) -> DkOldiesClient {
    let config = Config::default();
    DkOldiesClient::with_base_urls(
        &config,
        Some(server.uri()),
        Some(server.uri()),
    )
    .unwrap()
}

#[tokio::test]
async fn live_scrape_builds_buylist() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sell-video-games/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SELL_PAGE))
        .mount(&server)
        .await;

    let client = make_client(&server);
    let cache = BuylistCache::new();

    let buylist = cache.get(&client).await;
    // Zero-priced row is dropped
    assert_eq!(buylist.len(), 2);

    let entry = dkoldies::match_buy_price("Super Mario 64", &buylist).unwrap();
    assert_eq!(entry.cents, 3500);
}

#[tokio::test]
async fn challenge_page_falls_back_to_snapshot() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sell-video-games/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><title>Just a moment...</title><body>Checking your browser \
             before accessing the site.</body></html>",
        ))
        .mount(&server)
        .await;

    let mut snapshot = tempfile::NamedTempFile::new().unwrap();
    write!(snapshot, r#"[{{"name": "Earthbound", "cents": 17500}}]"#).unwrap();

    let client = make_client(&server);
    let cache =
        BuylistCache::new().with_snapshot_path(Some(snapshot.path().to_path_buf()));

    let buylist = cache.get(&client).await;
    assert_eq!(buylist.len(), 1);

    let entry = dkoldies::match_buy_price("Earthbound (SNES)", &buylist).unwrap();
    assert_eq!(entry.name, "Earthbound");
    assert_eq!(entry.cents, 17500);
}

#[tokio::test]
async fn http_error_falls_back_to_snapshot() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sell-video-games/"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let mut snapshot = tempfile::NamedTempFile::new().unwrap();
    write!(
        snapshot,
        r#"[{{"name": "Chrono Trigger", "cents": 9800}},
            {{"name": "Super Metroid", "cents": 5700}}]"#
    )
    .unwrap();

    let client = make_client(&server);
    let cache =
        BuylistCache::new().with_snapshot_path(Some(snapshot.path().to_path_buf()));

    let buylist = cache.get(&client).await;
    assert_eq!(buylist.len(), 2);
}

#[tokio::test]
async fn cache_skips_refetch_inside_ttl() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sell-video-games/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SELL_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let client = make_client(&server);
    let cache = BuylistCache::with_ttl(Duration::from_secs(3600));

    for _ in 0..3 {
        let buylist = cache.get(&client).await;
        assert_eq!(buylist.len(), 2);
    }

    // The mock's expect(1) verifies a single outbound request on drop
}

#[tokio::test]
async fn retail_price_comes_from_search_api() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/search.json"))
        .and(query_param("resultsFormat", "json"))
        .and(query_param("q", "Super Mario 64 N64"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"results": [
                {"name": "Super Mario 64 - Authentic", "price": "39.99",
                 "url": "https://example.com/sm64"},
                {"name": "Super Mario 64 - Box Only", "price": "24.99"}
            ]}"#,
        ))
        .mount(&server)
        .await;

    let client = make_client(&server);

    let retail = dkoldies::retail_price(&client, "Super Mario 64", "N64").await.unwrap();
    // First result wins
    assert_eq!(retail.name, "Super Mario 64 - Authentic");
    assert_eq!(retail.cents, 3999);
    assert_eq!(retail.url, "https://example.com/sm64");
}

#[tokio::test]
async fn retail_price_soft_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/search.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = make_client(&server);
    assert!(dkoldies::retail_price(&client, "Anything", "NES").await.is_none());
}

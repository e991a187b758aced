//! Retail listing price lookup via the storefront search API.

use crate::dkoldies::client::BuylistSource;
use crate::dkoldies::models::RetailPrice;
use crate::price;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Narrow view of the search API response. The API returns far more fields;
/// everything else is ignored, and every field here is optional so a schema
/// drift degrades softly instead of failing the deserialize.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    results: Vec<ApiResult>,
}

#[derive(Debug, Deserialize)]
struct ApiResult {
    #[serde(default)]
    name: String,
    url: Option<String>,
    // Price fields arrive as strings or numbers depending on the listing
    price: Option<Value>,
    ss_sale_price: Option<Value>,
    msrp: Option<Value>,
    ss_price: Option<Value>,
}

impl ApiResult {
    /// First usable price field, coerced to cents.
    fn price_cents(&self) -> Option<i64> {
        [&self.price, &self.ss_sale_price, &self.msrp, &self.ss_price]
            .into_iter()
            .flatten()
            .find_map(value_to_cents)
    }
}

/// Coerces a heterogeneous JSON price value to cents.
fn value_to_cents(value: &Value) -> Option<i64> {
    match value {
        Value::String(text) => price::parse_cents(text),
        Value::Number(number) => {
            let cents = (number.as_f64()? * 100.0).round() as i64;
            (cents > 0).then_some(cents)
        }
        _ => None,
    }
}

/// Looks up what the retailer currently charges for a game.
///
/// The query is "{name} {platform display}" and the first result wins.
/// Any failure — request, JSON shape, no results, no usable price — is a
/// soft `None`.
pub async fn retail_price(
    source: &impl BuylistSource,
    name: &str,
    console_display: &str,
) -> Option<RetailPrice> {
    let query = format!("{} {}", name, console_display);
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    let body = match source.retail_search(query).await {
        Ok(body) => body,
        Err(e) => {
            debug!("retail search failed: {:#}", e);
            return None;
        }
    };

    let response: ApiResponse = match serde_json::from_str(&body) {
        Ok(response) => response,
        Err(e) => {
            debug!("retail search response did not parse: {}", e);
            return None;
        }
    };

    let first = response.results.into_iter().next()?;
    let cents = first.price_cents()?;

    Some(RetailPrice { name: first.name, cents, url: first.url.unwrap_or_default() })
}

//! Data models for PriceCharting search results and price breakdowns.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Physical completeness/condition tiers PriceCharting tracks prices for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Loose,
    Cib,
    New,
    Graded,
    BoxOnly,
    ManualOnly,
}

impl Condition {
    /// Display label for the condition tier.
    pub fn label(&self) -> &'static str {
        match self {
            Condition::Loose => "Loose",
            Condition::Cib => "CIB",
            Condition::New => "New",
            Condition::Graded => "Graded",
            Condition::BoxOnly => "Box Only",
            Condition::ManualOnly => "Manual Only",
        }
    }

    /// Returns all condition tiers in display order.
    pub fn all() -> &'static [Condition] {
        &[
            Condition::Loose,
            Condition::Cib,
            Condition::New,
            Condition::Graded,
            Condition::BoxOnly,
            Condition::ManualOnly,
        ]
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single row from the PriceCharting search results table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Display name of the game
    pub name: String,
    /// Human-readable platform label from the results table
    pub console_name: String,
    /// PriceCharting platform identifier ("nintendo-64")
    pub platform_id: String,
    /// PriceCharting item slug ("zelda-ocarina-of-time")
    pub slug: String,
    /// Loose price in cents, when the table shows one
    pub loose_cents: Option<i64>,
    /// Complete-in-box price in cents, when the table shows one
    pub cib_cents: Option<i64>,
}

/// Per-condition price breakdown for one catalog item.
///
/// Constructed fresh on every fetch. Always a best-effort value: a fetch that
/// fails outright still yields a snapshot, with `prices` empty and `error`
/// set, so callers never deal with a hard failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSnapshot {
    /// Game title as shown on the page (or humanized from the slug)
    pub title: String,
    /// Canonical PriceCharting URL for the item
    pub url: String,
    /// Prices in cents, keyed by condition; only known tiers present
    #[serde(default)]
    pub prices: BTreeMap<Condition, i64>,
    /// Set when the underlying fetch failed and the snapshot is degraded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PriceSnapshot {
    /// Creates an empty snapshot for the given title and URL.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self { title: title.into(), url: url.into(), prices: BTreeMap::new(), error: None }
    }

    /// Creates the degraded snapshot returned when the fetch itself failed:
    /// no prices, title humanized from the slug, error marker set.
    pub fn degraded(slug: &str, url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            title: humanize_slug(slug),
            url: url.into(),
            prices: BTreeMap::new(),
            error: Some(error.into()),
        }
    }

    /// Returns the price in cents for a condition tier, if known.
    pub fn price(&self, condition: Condition) -> Option<i64> {
        self.prices.get(&condition).copied()
    }

    /// Returns true if at least one condition tier has a price.
    pub fn has_prices(&self) -> bool {
        !self.prices.is_empty()
    }
}

/// Turns a URL slug into a display title: "zelda-ocarina-of-time" becomes
/// "Zelda Ocarina Of Time".
pub fn humanize_slug(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

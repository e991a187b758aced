//! Deal rating: how favorable is an acquisition cost against market price.

use crate::pricecharting::models::{Condition, PriceSnapshot};
use serde::Serialize;

/// Discrete deal tiers, best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DealTier {
    Steal,
    Good,
    Fair,
    Pass,
}

impl DealTier {
    /// Short display label for the tier.
    pub fn label(&self) -> &'static str {
        match self {
            DealTier::Steal => "STEAL",
            DealTier::Good => "GOOD DEAL",
            DealTier::Fair => "FAIR",
            DealTier::Pass => "PASS",
        }
    }
}

/// Rating of a single cost-vs-market comparison. Computed fresh per call,
/// never stored.
#[derive(Debug, Clone, Serialize)]
pub struct DealRating {
    pub tier: DealTier,
    pub label: &'static str,
    /// Market price minus cost; negative when overpaying.
    pub profit_cents: i64,
    /// Profit as a percentage of market price, one decimal.
    pub margin_pct: f64,
}

/// Rates paying `cost_cents` for an item worth `market_cents`.
///
/// Returns `None` when either side is missing or zero — there is nothing to
/// rate, and the zero market price would divide.
pub fn rate(cost_cents: i64, market_cents: i64) -> Option<DealRating> {
    if cost_cents <= 0 || market_cents <= 0 {
        return None;
    }

    let ratio = cost_cents as f64 / market_cents as f64;
    let profit_cents = market_cents - cost_cents;
    let margin_pct = (profit_cents as f64 / market_cents as f64 * 1000.0).round() / 10.0;

    let tier = if ratio < 0.40 {
        DealTier::Steal
    } else if ratio < 0.65 {
        DealTier::Good
    } else if ratio < 0.85 {
        DealTier::Fair
    } else {
        DealTier::Pass
    };

    Some(DealRating { tier, label: tier.label(), profit_cents, margin_pct })
}

/// Rates a cost against every condition tier in a price mapping.
pub fn rate_prices(
    cost_cents: i64,
    prices: &std::collections::BTreeMap<Condition, i64>,
) -> Vec<(Condition, DealRating)> {
    prices
        .iter()
        .filter_map(|(condition, market)| rate(cost_cents, *market).map(|r| (*condition, r)))
        .collect()
}

/// Rates a cost against every condition tier a snapshot has a price for.
pub fn rate_snapshot(cost_cents: i64, snapshot: &PriceSnapshot) -> Vec<(Condition, DealRating)> {
    rate_prices(cost_cents, &snapshot.prices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_good_boundary() {
        // ratio exactly 0.40 is not < 0.40, so it lands in "good"
        let rating = rate(4000, 10000).unwrap();
        assert_eq!(rating.tier, DealTier::Good);
        assert_eq!(rating.label, "GOOD DEAL");
        assert_eq!(rating.profit_cents, 6000);
        assert_eq!(rating.margin_pct, 60.0);
    }

    #[test]
    fn test_rate_steal() {
        let rating = rate(2000, 10000).unwrap();
        assert_eq!(rating.tier, DealTier::Steal);
        assert_eq!(rating.profit_cents, 8000);
        assert_eq!(rating.margin_pct, 80.0);
    }

    #[test]
    fn test_rate_fair_boundaries() {
        assert_eq!(rate(6500, 10000).unwrap().tier, DealTier::Fair);
        assert_eq!(rate(8499, 10000).unwrap().tier, DealTier::Fair);
    }

    #[test]
    fn test_rate_pass() {
        let rating = rate(9000, 10000).unwrap();
        assert_eq!(rating.tier, DealTier::Pass);
        assert_eq!(rating.profit_cents, 1000);
        assert_eq!(rating.margin_pct, 10.0);

        assert_eq!(rate(8500, 10000).unwrap().tier, DealTier::Pass);
    }

    #[test]
    fn test_rate_negative_profit() {
        let rating = rate(12000, 10000).unwrap();
        assert_eq!(rating.tier, DealTier::Pass);
        assert_eq!(rating.profit_cents, -2000);
        assert_eq!(rating.margin_pct, -20.0);
    }

    #[test]
    fn test_rate_margin_one_decimal() {
        let rating = rate(3333, 9999).unwrap();
        assert_eq!(rating.margin_pct, 66.7);
    }

    #[test]
    fn test_rate_absent_inputs() {
        assert!(rate(0, 10000).is_none());
        assert!(rate(10000, 0).is_none());
        assert!(rate(0, 0).is_none());
        assert!(rate(-500, 10000).is_none());
    }

    #[test]
    fn test_rate_snapshot() {
        let mut snapshot = PriceSnapshot::new("Test Game", "http://example.com/game");
        snapshot.prices.insert(Condition::Loose, 10000);
        snapshot.prices.insert(Condition::Cib, 20000);

        let ratings = rate_snapshot(4000, &snapshot);
        assert_eq!(ratings.len(), 2);

        let (condition, rating) = &ratings[0];
        assert_eq!(*condition, Condition::Loose);
        assert_eq!(rating.tier, DealTier::Good);

        let (condition, rating) = &ratings[1];
        assert_eq!(*condition, Condition::Cib);
        assert_eq!(rating.tier, DealTier::Steal);
    }

    #[test]
    fn test_rate_snapshot_empty() {
        let snapshot = PriceSnapshot::new("Test Game", "http://example.com/game");
        assert!(rate_snapshot(4000, &snapshot).is_empty());
    }
}

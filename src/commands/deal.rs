//! Standalone deal rating command: no network, just cost vs known prices.

use crate::config::Config;
use crate::deal;
use crate::format::Formatter;
use crate::price::dollars_to_cents;
use crate::pricecharting::models::Condition;
use anyhow::Result;
use std::collections::BTreeMap;

/// Rates a considered cost against explicitly supplied market prices.
pub struct DealCommand {
    config: Config,
}

impl DealCommand {
    /// Creates a new deal command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Rates `cost` (dollars) against the supplied per-tier prices (dollars).
    pub fn execute(
        &self,
        cost: f64,
        loose: Option<f64>,
        cib: Option<f64>,
        new: Option<f64>,
    ) -> Result<String> {
        if cost <= 0.0 {
            anyhow::bail!("Cost must be positive");
        }
        if loose.is_none() && cib.is_none() && new.is_none() {
            anyhow::bail!("Supply at least one market price (--loose, --cib, --new)");
        }

        let cost_cents = dollars_to_cents(cost);

        let mut prices = BTreeMap::new();
        for (condition, dollars) in
            [(Condition::Loose, loose), (Condition::Cib, cib), (Condition::New, new)]
        {
            if let Some(dollars) = dollars {
                prices.insert(condition, dollars_to_cents(dollars));
            }
        }

        let deals = deal::rate_prices(cost_cents, &prices);
        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_deals(cost_cents, &deals))
    }
}

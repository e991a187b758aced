//! Output formatting for search results, lookups, and deal sheets.

use crate::config::OutputFormat;
use crate::deal::DealRating;
use crate::dkoldies::models::{BuylistEntry, BuylistMap};
use crate::lookup::Lookup;
use crate::price::format_cents;
use crate::pricecharting::models::{CatalogEntry, Condition};
use std::collections::BTreeMap;

/// Formats results for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats catalog search results.
    pub fn format_catalog(&self, entries: &[CatalogEntry]) -> String {
        if entries.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Table => "No results found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => json_pretty(entries),
            OutputFormat::Table => self.catalog_table(entries),
        }
    }

    /// Formats an assembled lookup.
    pub fn format_lookup(&self, lookup: &Lookup) -> String {
        match self.format {
            OutputFormat::Json => json_pretty(lookup),
            OutputFormat::Table => self.lookup_table(lookup),
        }
    }

    /// Formats a deal sheet: one rating per condition tier.
    pub fn format_deals(&self, cost_cents: i64, deals: &[(Condition, DealRating)]) -> String {
        if deals.is_empty() {
            return match self.format {
                OutputFormat::Json => "{}".to_string(),
                OutputFormat::Table => "No market prices to rate against.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => {
                let map: BTreeMap<Condition, &DealRating> =
                    deals.iter().map(|(c, r)| (*c, r)).collect();
                json_pretty(&map)
            }
            OutputFormat::Table => {
                let mut lines = vec![format!("Paying {}:", format_cents(cost_cents))];
                for (condition, rating) in deals {
                    lines.push(format!(
                        "  {:<12} {:<10} profit {:>9}  margin {:>6.1}%",
                        condition.label(),
                        rating.label,
                        format_cents(rating.profit_cents),
                        rating.margin_pct
                    ));
                }
                lines.join("\n")
            }
        }
    }

    /// Formats a buy-price match result.
    pub fn format_buy_match(&self, query: &str, entry: Option<&BuylistEntry>) -> String {
        match self.format {
            OutputFormat::Json => match entry {
                Some(entry) => json_pretty(entry),
                None => "null".to_string(),
            },
            OutputFormat::Table => match entry {
                Some(entry) => {
                    format!("{} -> {} ({})", query, entry.name, format_cents(entry.cents))
                }
                None => format!("{} -> no match on the buy-list", query),
            },
        }
    }

    /// Formats the buy-list itself, truncated to `limit` entries.
    pub fn format_buylist(&self, buylist: &BuylistMap, limit: usize) -> String {
        match self.format {
            OutputFormat::Json => {
                let entries: Vec<&BuylistEntry> = buylist.values().take(limit).collect();
                json_pretty(&entries)
            }
            OutputFormat::Table => {
                if buylist.is_empty() {
                    return "Buy-list is empty.".to_string();
                }
                let mut lines = vec![format!("{} entries", buylist.len())];
                for entry in buylist.values().take(limit) {
                    lines.push(format!("  {:<40} {:>9}", entry.name, format_cents(entry.cents)));
                }
                if buylist.len() > limit {
                    lines.push(format!("  ... and {} more", buylist.len() - limit));
                }
                lines.join("\n")
            }
        }
    }

    fn catalog_table(&self, entries: &[CatalogEntry]) -> String {
        let mut lines = Vec::with_capacity(entries.len() + 2);
        lines.push(format!(
            "{:<3} {:<40} {:<16} {:>9} {:>9}  {}",
            "#", "Name", "Console", "Loose", "CIB", "Item"
        ));
        lines.push("-".repeat(100));

        for (index, entry) in entries.iter().enumerate() {
            lines.push(format!(
                "{:<3} {:<40} {:<16} {:>9} {:>9}  {}/{}",
                index + 1,
                truncate(&entry.name, 40),
                truncate(&entry.console_name, 16),
                opt_cents(entry.loose_cents),
                opt_cents(entry.cib_cents),
                entry.platform_id,
                entry.slug
            ));
        }

        lines.join("\n")
    }

    fn lookup_table(&self, lookup: &Lookup) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Title:   {}", lookup.title));
        lines.push(format!("Item:    {}/{}", lookup.platform_id, lookup.slug));
        lines.push(format!("URL:     {}", lookup.market_url));

        if lookup.prices.is_empty() {
            lines.push("Prices:  none available".to_string());
        } else {
            lines.push("Prices:".to_string());
            for (condition, cents) in &lookup.prices {
                lines.push(format!("  {:<12} {:>9}", condition.label(), format_cents(*cents)));
            }
        }

        match &lookup.retail {
            Some(retail) => lines.push(format!(
                "Retail:  {} ({})",
                format_cents(retail.cents),
                retail.name
            )),
            None => lines.push("Retail:  not listed".to_string()),
        }

        match &lookup.buy {
            Some(buy) => lines.push(format!(
                "Buy:     {} (matched \"{}\")",
                format_cents(buy.cents),
                buy.name
            )),
            None => lines.push("Buy:     no buy-list match".to_string()),
        }

        if let Some(error) = &lookup.error {
            lines.push(format!("Note:    market fetch degraded ({})", error));
        }

        lines.join("\n")
    }
}

fn json_pretty<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}

fn opt_cents(cents: Option<i64>) -> String {
    cents.map(format_cents).unwrap_or_else(|| "-".to_string())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

//! Bundled buy-list snapshot, the fallback when the live scrape is blocked.
//!
//! Format contract: a flat JSON array of `{"name": string, "cents": integer}`
//! records. Any producer of a replacement snapshot file must emit exactly
//! this shape.

use crate::dkoldies::models::{BuylistEntry, BuylistMap};
use crate::text::normalize;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Snapshot shipped with the binary, scraped while the sell page was
/// reachable without a challenge.
const BUNDLED: &str = include_str!("../../data/buylist_snapshot.json");

/// One snapshot record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub name: String,
    pub cents: i64,
}

/// Loads the snapshot into a buy-list mapping.
///
/// `path` points at an operator-provided replacement file; when it is absent
/// or unreadable the bundled copy is used. A snapshot that doesn't parse
/// yields an empty mapping — acquisition never fails outright.
pub fn load(path: Option<&Path>) -> BuylistMap {
    let raw = match path {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("snapshot file {} unreadable ({}), using bundled copy", path.display(), e);
                BUNDLED.to_string()
            }
        },
        None => BUNDLED.to_string(),
    };

    parse_records(&raw)
}

/// Parses snapshot JSON into the normalized-key mapping.
pub fn parse_records(raw: &str) -> BuylistMap {
    let entries: Vec<SnapshotEntry> = match serde_json::from_str(raw) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("buy-list snapshot did not parse: {}", e);
            return BuylistMap::new();
        }
    };

    let mut buylist = BuylistMap::new();
    for entry in entries {
        buylist
            .insert(normalize(&entry.name), BuylistEntry { name: entry.name, cents: entry.cents });
    }

    debug!("loaded {} snapshot entries", buylist.len());
    buylist
}

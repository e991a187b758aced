//! Fuzzy buy-price matching over normalized token overlap.

use crate::dkoldies::models::{BuylistEntry, BuylistMap};
use crate::text::normalize;
use std::collections::HashSet;
use tracing::debug;

/// Minimum token-overlap score for a buy-list entry to count as a match.
pub const MIN_MATCH_SCORE: f64 = 0.5;

/// Finds the buy-list entry best matching a free-form game name.
///
/// Both sides reduce to token sets via [`normalize`]; the score is
/// `|query ∩ key| / max(|query|, |key|)`, so a perfect subset is judged from
/// the larger side rather than rewarded outright. The highest score wins;
/// exact ties go to the first key in map order. Below [`MIN_MATCH_SCORE`]
/// there is no match.
///
/// Known limit of the token-overlap design: titles sharing many common words
/// (sequel numbers, "collection", "edition") can score above threshold
/// against the wrong entry.
pub fn match_buy_price<'a>(game_name: &str, buylist: &'a BuylistMap) -> Option<&'a BuylistEntry> {
    let normalized = normalize(game_name);
    let query: HashSet<&str> = normalized.split_whitespace().collect();
    if query.is_empty() {
        return None;
    }

    let mut best_key: Option<&str> = None;
    let mut best_score = 0.0_f64;

    for key in buylist.keys() {
        let key_tokens: HashSet<&str> = key.split_whitespace().collect();
        if key_tokens.is_empty() {
            continue;
        }

        let overlap = query.intersection(&key_tokens).count();
        let score = overlap as f64 / query.len().max(key_tokens.len()) as f64;

        if score > best_score {
            best_score = score;
            best_key = Some(key);
        }
    }

    if best_score >= MIN_MATCH_SCORE {
        let key = best_key?;
        debug!("matched '{}' to '{}' (score {:.2})", game_name, key, best_score);
        buylist.get(key)
    } else {
        None
    }
}

//! Title normalization for fuzzy matching.
//!
//! Buy-list labels and search queries both pass through [`normalize`] before
//! comparison, so "Pokémon: Crystal Version (GBC)" and "pokemon crystal
//! version" reduce to the same token string.

use crate::pricecharting::platforms::Platform;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Filler words that carry no matching signal in game titles.
const FILLER_WORDS: &[&str] = &["the", "a", "an", "for", "in", "of", "and", "with", "w"];

/// Filler words plus every platform key the system knows. Retailers suffix
/// listings with the platform name ("Super Mario 64 N64"); the catalog side
/// usually doesn't.
static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let mut words: HashSet<&'static str> = FILLER_WORDS.iter().copied().collect();
    words.extend(Platform::all().iter().map(|p| p.key()));
    words
});

/// Canonicalizes a free-form title into a space-joined lowercase token string.
///
/// Folds diacritics to ASCII, lowercases, turns everything outside
/// `[a-z0-9 ]` into spaces, drops stop words, and collapses whitespace.
/// Pure and idempotent; empty input yields an empty string.
pub fn normalize(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for c in text.chars() {
        let Some(c) = fold_char(c) else { continue };
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            folded.push(c);
        } else {
            folded.push(' ');
        }
    }

    folded
        .split_whitespace()
        .filter(|word| !STOP_WORDS.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Maps a character to its lowercase ASCII equivalent, folding common Latin
/// diacritics. Characters with no ASCII equivalent are dropped.
fn fold_char(c: char) -> Option<char> {
    if c.is_ascii() {
        return Some(c.to_ascii_lowercase());
    }

    let folded = match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' | 'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => 'a',
        'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' | 'Í' | 'Ì' | 'Î' | 'Ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' | 'Ú' | 'Ù' | 'Û' | 'Ü' => 'u',
        'ý' | 'ÿ' | 'Ý' => 'y',
        'ñ' | 'Ñ' => 'n',
        'ç' | 'Ç' => 'c',
        _ => return None,
    };
    Some(folded)
}

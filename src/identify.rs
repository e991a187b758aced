//! Interface to the external AI image identifier.
//!
//! The identifier itself is a separate service; this crate only consumes its
//! output. The matcher and price fetcher treat the identified name as
//! ordinary free text — no special-casing downstream.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result of identifying a game from a photo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifiedGame {
    /// Whether the identifier recognized a game at all
    pub identified: bool,
    /// Exact game title, when identified
    pub game_name: Option<String>,
    /// Internal platform key ("n64"), when determinable
    pub console_key: Option<String>,
    /// Human-readable console name
    pub console_display: Option<String>,
    /// Assessed condition ("loose", "cib", "new_sealed", ...)
    pub condition: Option<String>,
    /// Free-text condition notes
    pub condition_notes: Option<String>,
    /// Identifier confidence ("high" | "medium" | "low")
    pub confidence: Option<String>,
    /// Whether the identifier wants another photo before committing
    #[serde(default)]
    pub needs_more_photos: bool,
    /// What photo to take next, when requested
    pub photo_request: Option<String>,
}

impl IdentifiedGame {
    /// Returns the identified name, or `None` when the result is unusable.
    ///
    /// An unidentified or nameless result must be rejected by the caller —
    /// never papered over with a guessed title.
    pub fn usable_name(&self) -> Option<&str> {
        if !self.identified {
            return None;
        }
        self.game_name.as_deref().filter(|name| !name.trim().is_empty())
    }
}

/// An opaque image-to-game classifier.
///
/// Implementations live outside this crate. When the backing service is
/// unavailable or unconfigured, `identify` must return an error — "cannot
/// proceed" propagates; a fabricated result does not.
#[async_trait]
pub trait GameIdentifier: Send + Sync {
    async fn identify(&self, image: &[u8], mime_type: &str) -> Result<IdentifiedGame>;
}

//! Buy-list acquisition and the process-wide cache around it.

use crate::dkoldies::client::{AcquireError, BuylistSource};
use crate::dkoldies::models::BuylistMap;
use crate::dkoldies::{parser, snapshot};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// How long an acquired buy-list stays fresh.
pub const BUYLIST_TTL: Duration = Duration::from_secs(3600);

/// Process-wide buy-list cache.
///
/// Owned by the service and passed into request handlers by reference. The
/// async mutex serializes the check-and-refresh sequence, so concurrent
/// callers hitting a stale cache produce one outbound scrape, not a stampede.
///
/// Invariant: acquisition runs at most once per TTL window — unless the
/// cache is empty, in which case it is forced regardless of elapsed time.
pub struct BuylistCache {
    state: Mutex<CacheState>,
    ttl: Duration,
    snapshot_path: Option<PathBuf>,
}

struct CacheState {
    entries: BuylistMap,
    fetched_at: Option<Instant>,
}

impl BuylistCache {
    /// Creates an empty cache with the default TTL.
    pub fn new() -> Self {
        Self::with_ttl(BUYLIST_TTL)
    }

    /// Creates an empty cache with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            state: Mutex::new(CacheState { entries: BuylistMap::new(), fetched_at: None }),
            ttl,
            snapshot_path: None,
        }
    }

    /// Points the fallback at an operator-provided snapshot file instead of
    /// the bundled copy.
    pub fn with_snapshot_path(mut self, path: Option<PathBuf>) -> Self {
        self.snapshot_path = path;
        self
    }

    /// Returns the current buy-list, refreshing it first when the TTL has
    /// lapsed or the cache is empty. Never fails; a refresh with both
    /// sources down yields an empty mapping.
    pub async fn get(&self, source: &impl BuylistSource) -> BuylistMap {
        let mut state = self.state.lock().await;

        let expired = match state.fetched_at {
            Some(fetched_at) => fetched_at.elapsed() > self.ttl,
            None => true,
        };

        if expired || state.entries.is_empty() {
            state.entries = acquire(source, self.snapshot_path.as_deref()).await;
            state.fetched_at = Some(Instant::now());
            info!("buy-list refreshed: {} entries", state.entries.len());
        } else {
            debug!("buy-list cache hit: {} entries", state.entries.len());
        }

        state.entries.clone()
    }
}

impl Default for BuylistCache {
    fn default() -> Self {
        Self::new()
    }
}

/// One acquisition attempt: live scrape first, bundled snapshot second.
/// Never raises; the worst case is an empty mapping.
async fn acquire(source: &impl BuylistSource, snapshot_path: Option<&std::path::Path>) -> BuylistMap {
    match live_buylist(source).await {
        Ok(buylist) => buylist,
        Err(e) => {
            warn!("live buy-list fetch failed ({}), using bundled snapshot", e);
            snapshot::load(snapshot_path)
        }
    }
}

async fn live_buylist(source: &impl BuylistSource) -> Result<BuylistMap, AcquireError> {
    let html = source.sell_page().await?;
    let buylist = parser::parse_buylist(&html);
    if buylist.is_empty() {
        return Err(AcquireError::NoRows);
    }
    Ok(buylist)
}

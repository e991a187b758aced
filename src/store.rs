//! Price store interface — the persistence layer is an external collaborator.

use crate::lookup::Lookup;
use std::collections::HashMap;
use std::sync::Mutex;

/// Storage for assembled lookups, keyed by (platform id, slug).
///
/// Freshness and retention policy belong to the implementor; the core only
/// distinguishes "present" from "absent" and honors the caller's
/// force-refresh toggle.
pub trait PriceStore: Send + Sync {
    /// Returns the stored lookup for a catalog item, if any.
    fn get(&self, platform_id: &str, slug: &str) -> Option<Lookup>;

    /// Stores a lookup, replacing any previous entry for its item.
    fn put(&self, lookup: &Lookup);
}

/// In-memory store; entries live as long as the store does. Used by tests
/// and single-run CLI invocations.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<(String, String), Lookup>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored lookups.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PriceStore for MemoryStore {
    fn get(&self, platform_id: &str, slug: &str) -> Option<Lookup> {
        self.entries
            .lock()
            .expect("store lock poisoned")
            .get(&(platform_id.to_string(), slug.to_string()))
            .cloned()
    }

    fn put(&self, lookup: &Lookup) {
        self.entries
            .lock()
            .expect("store lock poisoned")
            .insert((lookup.platform_id.clone(), lookup.slug.clone()), lookup.clone());
    }
}

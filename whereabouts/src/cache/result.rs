//! Single-slot cache for the last resolution result.

use super::store::KeyValueStore;
use super::types::{CacheError, CachedEntry, StoredEntry};
use crate::coord::Coordinates;
use std::sync::Arc;
use tracing::{debug, warn};

/// Storage key for the single cached entry.
pub const LAST_RESULT_KEY: &str = "lastResult";

/// Coordinate delta below which two fixes count as the same physical spot.
///
/// Consumer geolocation hardware jitters within roughly ten meters even
/// when the device has not moved; re-querying the server for sub-jitter
/// movement wastes a round trip and a spinner cycle. 0.00009 degrees of
/// latitude is about ten meters.
pub const FRESHNESS_EPSILON_DEG: f64 = 0.00009;

/// Persists the most recent resolution result through a [`KeyValueStore`].
///
/// Single-slot: `write` always overwrites, and `read` returns the one entry
/// or nothing. An entry that fails the validity check (missing coordinates
/// or location, or unparseable) is evicted during the read and reported as
/// a miss, so a corrupt store heals itself.
#[derive(Clone)]
pub struct ResultCache {
    store: Arc<dyn KeyValueStore>,
}

impl ResultCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The cached entry, if a valid one exists.
    pub fn read(&self) -> Option<CachedEntry> {
        let raw = self.store.get(LAST_RESULT_KEY)?;

        let stored: StoredEntry = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(error) => {
                warn!(%error, "cached result is unreadable, evicting");
                self.store.remove(LAST_RESULT_KEY);
                return None;
            }
        };

        match stored.into_entry() {
            Some(entry) => Some(entry),
            None => {
                warn!("cached result is missing coordinates or location, evicting");
                self.store.remove(LAST_RESULT_KEY);
                None
            }
        }
    }

    /// Overwrite the slot with a new entry.
    pub fn write(&self, entry: &CachedEntry) -> Result<(), CacheError> {
        let encoded = serde_json::to_string(entry)?;
        self.store.set(LAST_RESULT_KEY, encoded);
        debug!(location = %entry.location.id, "cached resolution result");
        Ok(())
    }

    /// Whether a new fix is close enough to a cached one to reuse the
    /// cached lookup.
    ///
    /// Both axis deltas must be strictly below [`FRESHNESS_EPSILON_DEG`].
    /// Freshness is necessary but not sufficient for reuse; the entry must
    /// also have passed the validity check in [`read`](Self::read).
    pub fn is_fresh(candidate: Coordinates, cached: Coordinates) -> bool {
        (candidate.latitude - cached.latitude).abs() < FRESHNESS_EPSILON_DEG
            && (candidate.longitude - cached.longitude).abs() < FRESHNESS_EPSILON_DEG
    }
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache").finish_non_exhaustive()
    }
}

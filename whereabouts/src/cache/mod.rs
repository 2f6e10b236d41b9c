//! Persistence of the last resolution result.
//!
//! A single-slot cache keyed by [`LAST_RESULT_KEY`]: the most recent
//! successful resolution is mirrored here so a reload (or a fix within GPS
//! jitter of the cached one) can be served without a remote lookup. The
//! storage backend is the [`KeyValueStore`] collaborator trait.

mod result;
mod store;
mod types;

pub use result::{ResultCache, FRESHNESS_EPSILON_DEG, LAST_RESULT_KEY};
pub use store::{KeyValueStore, MemoryStore};
pub use types::{CacheError, CachedEntry};

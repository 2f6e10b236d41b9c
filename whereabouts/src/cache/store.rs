//! Persistent key/value store collaborator.

use std::collections::HashMap;
use std::sync::Mutex;

/// String key/value store with a single logical namespace.
///
/// The library only ever touches the `"lastResult"` key, but the trait is
/// deliberately generic so hosts can back it with whatever session-scoped
/// storage they have.
pub trait KeyValueStore: Send + Sync {
    /// The stored value, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store or overwrite a value.
    fn set(&self, key: &str, value: String);

    /// Remove a value. Removing an absent key is a no-op.
    fn remove(&self, key: &str);
}

/// In-memory store for tests and headless embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.entries.lock().unwrap().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

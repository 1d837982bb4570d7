//! Backing store contract and the in-memory reference store.

use alloc::string::{String, ToString};
use hashbrown::HashMap;
use tether_core::Result;

/// A keyed backing store for property values.
///
/// Implementations decide durability; the observation layer only requires
/// that a successful `save` is visible to a later `load` of the same key.
pub trait BackingStore<T> {
    /// Loads the value stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<T>>;

    /// Saves `value` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, value: &T) -> Result<()>;
}

/// A volatile in-memory store, mostly useful for tests and defaults.
pub struct MemoryStore<T> {
    values: HashMap<String, T>,
}

impl<T: Clone> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<T: Clone> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> BackingStore<T> for MemoryStore<T> {
    fn load(&self, key: &str) -> Result<Option<T>> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &T) -> Result<()> {
        self.values.insert(key.to_string(), value.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load("a").unwrap(), None);

        store.save("a", &1i64).unwrap();
        store.save("b", &2i64).unwrap();
        assert_eq!(store.load("a").unwrap(), Some(1));
        assert_eq!(store.load("b").unwrap(), Some(2));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_save_replaces() {
        let mut store = MemoryStore::new();
        store.save("a", &1i64).unwrap();
        store.save("a", &9i64).unwrap();
        assert_eq!(store.load("a").unwrap(), Some(9));
        assert_eq!(store.len(), 1);
    }
}

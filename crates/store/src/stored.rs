//! Store-backed observable property slots.
//!
//! A `StoredProperty` keeps a cached copy of the value in memory and
//! writes through to a shared backing store. Observation behaves exactly
//! like an in-memory `Property`: the dispatch carries the cached old value
//! and the new one, and fires only after the store accepted the write.

use crate::store::BackingStore;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;
use core::mem;
use tether_core::{ChangeEvent, PropertyId, Result};
use tether_observe::{PropertySlot, Registry};

/// An observable property slot persisted under a fixed key.
pub struct StoredProperty<T, S> {
    id: PropertyId,
    key: String,
    cache: T,
    store: Rc<RefCell<S>>,
}

impl<T, S> StoredProperty<T, S>
where
    T: Clone + 'static,
    S: BackingStore<T>,
{
    /// Opens the slot, loading the stored value or falling back to
    /// `default` when the key is absent. Load failures propagate.
    pub fn open(store: Rc<RefCell<S>>, key: impl Into<String>, default: T) -> Result<Self> {
        let key = key.into();
        let cache = store.borrow().load(&key)?.unwrap_or(default);
        Ok(Self {
            id: PropertyId::next(),
            key,
            cache,
            store,
        })
    }

    /// Stable identity of this slot.
    #[inline]
    pub fn id(&self) -> PropertyId {
        self.id
    }

    /// The store key this slot persists under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the cached value, signalling the touch diagnostic.
    pub fn get(&self, registry: &Registry) -> &T {
        registry.note_touch(self.id);
        &self.cache
    }

    /// Reads the cached value without any diagnostic signal.
    #[inline]
    pub fn peek(&self) -> &T {
        &self.cache
    }

    /// Persists and writes the value, dispatching synchronously after the
    /// store accepted it. On store failure nothing changes and no event
    /// fires.
    pub fn set(&mut self, registry: &Registry, value: T) -> Result<()> {
        self.store.borrow_mut().save(&self.key, &value)?;
        let old = mem::replace(&mut self.cache, value.clone());
        registry.note_write(self.id);
        registry.dispatch(self.id, &ChangeEvent::changed(old, value));
        Ok(())
    }

    /// Swaps in a new value without dispatching and returns the old one.
    ///
    /// The store write is best-effort here: the cache always takes the new
    /// value so proxies stay coherent, and a save failure is logged.
    pub fn replace(&mut self, value: T) -> T {
        if let Err(err) = self.store.borrow_mut().save(&self.key, &value) {
            log::warn!("store write failed, keeping cached value: {}", err);
        }
        mem::replace(&mut self.cache, value)
    }
}

impl<T, S> PropertySlot<T> for StoredProperty<T, S>
where
    T: Clone + 'static,
    S: BackingStore<T>,
{
    fn id(&self) -> PropertyId {
        self.id
    }

    fn peek(&self) -> &T {
        &self.cache
    }

    fn replace(&mut self, value: T) -> T {
        StoredProperty::replace(self, value)
    }
}

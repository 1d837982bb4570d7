//! Store-backed property slots.
//!
//! [`StoredProperty`] is an observable slot that persists writes through a
//! [`BackingStore`] and caches the value in memory. It implements the same
//! slot contract as the in-memory property, so proxies bind over both
//! without knowing which one they got.

#![no_std]

extern crate alloc;

mod store;
mod stored;

pub use store::{BackingStore, MemoryStore};
pub use stored::StoredProperty;

//! Property identity tokens.
//!
//! A `PropertyId` names one property slot on one container instance. Two
//! ids compare equal iff they were minted by the same call to
//! [`PropertyId::next`], so they behave like a pointer to a specific field
//! of a specific object without holding an actual reference.

use core::sync::atomic::{AtomicU64, Ordering};

/// Global identity counter for minting unique property ids.
static NEXT_PROPERTY_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque token uniquely identifying one observed property slot.
///
/// Ids are never reused and carry no ordering; only equality and hashing
/// are meaningful.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PropertyId(u64);

impl PropertyId {
    /// Mints a fresh identity, distinct from every id minted before it.
    pub fn next() -> Self {
        PropertyId(NEXT_PROPERTY_ID.fetch_add(1, Ordering::SeqCst))
    }

    /// Returns the raw numeric value, for diagnostics only.
    #[inline]
    pub fn raw(&self) -> u64 {
        self.0
    }
}

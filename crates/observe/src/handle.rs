//! Observation handles and handle collections.
//!
//! A handle is the strong side of a subscription: the registry only indexes
//! the entry, and the handle severs it on disposal. Dropping the handle is
//! the normal way to unsubscribe; `dispose` does the same thing explicitly
//! and is idempotent. Disposal only prevents future deliveries, it never
//! interrupts a dispatch already in progress.

use crate::registry::{EntryId, RegistryInner};
use alloc::rc::Weak;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::mem;

enum HandleKind {
    /// A live registry entry.
    Entry {
        registry: Weak<RefCell<RegistryInner>>,
        entry: EntryId,
    },
    /// Several handles disposed together as one, e.g. the per-source
    /// entries behind a compound observable.
    Group(Vec<ObservationHandle>),
    /// Fires nothing and releases nothing. Returned when registration
    /// against a dead source degrades gracefully.
    Inert,
}

/// Disposable token returned to a subscriber.
pub struct ObservationHandle {
    kind: HandleKind,
}

impl ObservationHandle {
    pub(crate) fn for_entry(registry: Weak<RefCell<RegistryInner>>, entry: EntryId) -> Self {
        Self {
            kind: HandleKind::Entry { registry, entry },
        }
    }

    /// A handle bound to nothing.
    pub fn inert() -> Self {
        Self {
            kind: HandleKind::Inert,
        }
    }

    /// Wraps several handles into one that disposes them all together.
    pub fn group(handles: Vec<ObservationHandle>) -> Self {
        Self {
            kind: HandleKind::Group(handles),
        }
    }

    /// Severs the underlying entry (or entries). Idempotent; a disposed
    /// handle behaves like [`ObservationHandle::inert`].
    pub fn dispose(&mut self) {
        match mem::replace(&mut self.kind, HandleKind::Inert) {
            HandleKind::Entry { registry, entry } => {
                if let Some(inner) = registry.upgrade() {
                    inner.borrow_mut().release(entry);
                }
            }
            HandleKind::Group(mut handles) => {
                for handle in &mut handles {
                    handle.dispose();
                }
            }
            HandleKind::Inert => {}
        }
    }

    /// Whether this handle still holds at least one live entry.
    pub fn is_active(&self) -> bool {
        match &self.kind {
            HandleKind::Entry { registry, entry } => registry
                .upgrade()
                .map(|inner| inner.borrow().is_live(*entry))
                .unwrap_or(false),
            HandleKind::Group(handles) => handles.iter().any(|h| h.is_active()),
            HandleKind::Inert => false,
        }
    }

    /// Moves this handle into a bag that keeps it alive.
    pub fn add_to(self, bag: &mut HandleBag) {
        bag.insert(self);
    }
}

impl Drop for ObservationHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// An ordered collection of retained handles.
///
/// Dropping the bag (or calling [`HandleBag::clear`]) disposes every handle
/// it holds. The usual pattern is one bag per owning component, filled via
/// [`ObservationHandle::add_to`].
#[derive(Default)]
pub struct HandleBag {
    handles: Vec<ObservationHandle>,
}

impl HandleBag {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self {
            handles: Vec::new(),
        }
    }

    /// Retains a handle for the life of the bag.
    pub fn insert(&mut self, handle: ObservationHandle) {
        self.handles.push(handle);
    }

    /// Returns the number of retained handles.
    #[inline]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Returns true if the bag holds no handles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Disposes and removes every retained handle.
    pub fn clear(&mut self) {
        self.handles.clear();
    }
}

//! Observer registry and identity-keyed dispatch.
//!
//! The registry owns the active subscription entries for one container
//! instance and routes change events to the entries whose identity matches.
//! Entries are kept alive by the [`ObservationHandle`] returned to the
//! subscriber; dropping the handle releases the entry, so a long-lived
//! container never accumulates dead subscriptions.

use crate::handle::ObservationHandle;
use crate::handler::UpdateHandler;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::any::Any;
use core::cell::RefCell;
use hashbrown::{HashMap, HashSet};
use tether_core::{ChangeEvent, PropertyId};

/// Unique identifier for a registered entry.
pub type EntryId = u64;

/// An active subscription record.
struct Entry {
    identity: PropertyId,
    /// Type-erased delivery closure; downcasts the event back to the
    /// registered type and applies the handler's filter policy.
    invoke: Rc<dyn Fn(&dyn Any)>,
}

pub(crate) struct RegistryInner {
    /// Entry id -> entry.
    entries: HashMap<EntryId, Entry>,
    /// Identity -> entry ids, in registration order.
    by_identity: HashMap<PropertyId, Vec<EntryId>>,
    /// Identities that have signalled a write pulse or a getter touch.
    instrumented: HashSet<PropertyId>,
    /// Identities already warned about, so the not-instrumented diagnostic
    /// fires once per identity.
    warned: HashSet<PropertyId>,
    /// Next entry id to assign.
    next_id: EntryId,
}

impl RegistryInner {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            by_identity: HashMap::new(),
            instrumented: HashSet::new(),
            warned: HashSet::new(),
            next_id: 1,
        }
    }

    /// Removes an entry and its identity index slot. Called from handle
    /// disposal; releasing an already-released entry is a no-op.
    pub(crate) fn release(&mut self, id: EntryId) {
        if let Some(entry) = self.entries.remove(&id) {
            if let Some(ids) = self.by_identity.get_mut(&entry.identity) {
                ids.retain(|e| *e != id);
                if ids.is_empty() {
                    self.by_identity.remove(&entry.identity);
                }
            }
        }
    }

    pub(crate) fn is_live(&self, id: EntryId) -> bool {
        self.entries.contains_key(&id)
    }
}

/// Per-container observation registry.
///
/// Cheap to clone; clones share the same entry collection. One registry is
/// created per container instance and never shared across instances.
///
/// # Example
///
/// ```rust
/// use tether_core::{ChangeEvent, PropertyId};
/// use tether_observe::{Registry, UpdateHandler};
///
/// let registry = Registry::new();
/// let identity = PropertyId::next();
/// registry.note_write(identity);
///
/// let handle = registry.register(identity, UpdateHandler::update(false, |v: &i32| {
///     assert_eq!(*v, 2);
/// }));
///
/// registry.dispatch(identity, &ChangeEvent::changed(1, 2));
/// drop(handle);
/// ```
#[derive(Clone)]
pub struct Registry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(RegistryInner::new())),
        }
    }

    /// Registers a handler for the given identity and returns the handle
    /// that keeps the entry alive.
    ///
    /// Subscribing to an identity that has never signalled a write or a
    /// getter touch emits a one-time warning for that identity: the entry
    /// stays registered but will never fire from real writes unless the
    /// underlying property is instrumented.
    pub fn register<T: 'static>(
        &self,
        identity: PropertyId,
        handler: UpdateHandler<T>,
    ) -> ObservationHandle {
        let invoke: Rc<dyn Fn(&dyn Any)> = Rc::new(move |any: &dyn Any| {
            let event = any.downcast_ref::<ChangeEvent<T>>().unwrap_or_else(|| {
                panic!(
                    "identity collision: entry for property {} received an event of a different type",
                    identity.raw()
                )
            });
            handler.deliver(event);
        });

        let mut inner = self.inner.borrow_mut();
        if !inner.instrumented.contains(&identity) && inner.warned.insert(identity) {
            log::warn!(
                "property {} has never signalled a write; the field may not be instrumented \
                 and this subscription will never fire",
                identity.raw()
            );
        }
        let id = inner.next_id;
        inner.next_id += 1;
        inner.entries.insert(id, Entry { identity, invoke });
        inner.by_identity.entry(identity).or_default().push(id);
        drop(inner);

        ObservationHandle::for_entry(Rc::downgrade(&self.inner), id)
    }

    /// Dispatches an event to every live entry registered for the identity,
    /// in registration order.
    ///
    /// Entries released while the dispatch loop runs (including releases
    /// performed by earlier callbacks in the same loop) are skipped, not
    /// invoked.
    pub fn dispatch<T: 'static>(&self, identity: PropertyId, event: &ChangeEvent<T>) {
        let live: Vec<(EntryId, Rc<dyn Fn(&dyn Any)>)> = {
            let inner = self.inner.borrow();
            match inner.by_identity.get(&identity) {
                Some(ids) => ids
                    .iter()
                    .filter_map(|id| inner.entries.get(id).map(|e| (*id, Rc::clone(&e.invoke))))
                    .collect(),
                None => Vec::new(),
            }
        };
        // The borrow is released before invoking callbacks, so a callback
        // may register, release, or re-dispatch without conflict.
        for (id, invoke) in live {
            let still_live = self.inner.borrow().is_live(id);
            if still_live {
                invoke(event);
            }
        }
    }

    /// Records a well-formed write pulse for the identity.
    pub fn note_write(&self, identity: PropertyId) {
        self.inner.borrow_mut().instrumented.insert(identity);
    }

    /// Records a getter touch for the identity. Used solely to back the
    /// one-time not-instrumented warning.
    pub fn note_touch(&self, identity: PropertyId) {
        self.inner.borrow_mut().instrumented.insert(identity);
    }

    /// Whether the identity has ever signalled a write pulse or touch.
    pub fn has_pulsed(&self, identity: PropertyId) -> bool {
        self.inner.borrow().instrumented.contains(&identity)
    }

    /// Returns the number of live entries.
    pub fn entry_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Returns the number of live entries for a specific identity.
    pub fn entries_for(&self, identity: PropertyId) -> usize {
        self.inner
            .borrow()
            .by_identity
            .get(&identity)
            .map(|ids| ids.len())
            .unwrap_or(0)
    }

    /// Returns true if there are no live entries.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }
}

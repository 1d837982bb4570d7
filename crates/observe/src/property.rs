//! Instrumented property slots and the owning-container contract.
//!
//! A `Property` is the in-memory instrumented field: it owns a stable
//! identity and a value, and its `set` notifies the container's registry
//! synchronously with the old/new pair before returning. Containers opt in
//! per field; a plain field has no identity and cannot be observed.
//!
//! The `Model` trait is the owning-container contract: the registry is a
//! constructor-initialized member, created with the model instance and torn
//! down with it.

use crate::registry::Registry;
use core::mem;
use tether_core::{ChangeEvent, PropertyId};

/// Contract implemented by model objects that host observable properties.
pub trait Model {
    /// The observation registry owned by this instance.
    fn registry(&self) -> &Registry;
}

/// Contract of one observable storage slot, implemented by [`Property`] and
/// by store-backed slots.
///
/// `replace` is the silent primitive: it swaps the value without
/// dispatching, for callers that must release their own borrows before
/// notifying (proxies do this to keep synchronous re-entrant callbacks
/// safe).
pub trait PropertySlot<T> {
    /// Stable identity of this slot.
    fn id(&self) -> PropertyId;

    /// Reads the value without signalling the touch diagnostic.
    fn peek(&self) -> &T;

    /// Swaps in a new value and returns the old one. No dispatch.
    fn replace(&mut self, value: T) -> T;

    /// Signals the getter-touch diagnostic for this slot.
    fn touch(&self, registry: &Registry) {
        registry.note_touch(self.id());
    }
}

/// An instrumented in-memory property slot.
///
/// # Example
///
/// ```rust
/// use tether_observe::{Model, Property, Registry, UpdateHandler};
///
/// struct Counter {
///     registry: Registry,
///     value: Property<i64>,
/// }
///
/// impl Model for Counter {
///     fn registry(&self) -> &Registry {
///         &self.registry
///     }
/// }
///
/// let mut counter = Counter {
///     registry: Registry::new(),
///     value: Property::new(0),
/// };
///
/// let registry = counter.registry.clone();
/// let _handle = registry.register(counter.value.id(), UpdateHandler::update(false, |v: &i64| {
///     assert_eq!(*v, 7);
/// }));
///
/// counter.value.set(&registry, 7);
/// ```
pub struct Property<T> {
    id: PropertyId,
    value: T,
}

impl<T: Clone + 'static> Property<T> {
    /// Creates a slot with a fresh identity holding the initial value.
    pub fn new(value: T) -> Self {
        Self {
            id: PropertyId::next(),
            value,
        }
    }

    /// Stable identity of this slot.
    #[inline]
    pub fn id(&self) -> PropertyId {
        self.id
    }

    /// Reads the value, signalling the touch diagnostic.
    pub fn get(&self, registry: &Registry) -> &T {
        registry.note_touch(self.id);
        &self.value
    }

    /// Reads the value without any diagnostic signal.
    #[inline]
    pub fn peek(&self) -> &T {
        &self.value
    }

    /// Writes the value and dispatches `Changed { old, new }` synchronously
    /// before returning. Callbacks run on the caller's stack; a callback
    /// that writes an observed property causes re-entrant dispatch.
    pub fn set(&mut self, registry: &Registry, value: T) {
        let old = mem::replace(&mut self.value, value.clone());
        registry.note_write(self.id);
        registry.dispatch(self.id, &ChangeEvent::changed(old, value));
    }

    /// Swaps in a new value without dispatching and returns the old one.
    pub fn replace(&mut self, value: T) -> T {
        mem::replace(&mut self.value, value)
    }
}

impl<T: Clone + 'static> PropertySlot<T> for Property<T> {
    fn id(&self) -> PropertyId {
        self.id
    }

    fn peek(&self) -> &T {
        &self.value
    }

    fn replace(&mut self, value: T) -> T {
        Property::replace(self, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::UpdateHandler;
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    #[test]
    fn test_set_dispatches_old_new_pair() {
        let registry = Registry::new();
        let mut prop = Property::new(10);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        let _handle = registry.register(
            prop.id(),
            UpdateHandler::update_full(false, move |old: Option<&i32>, new, _| {
                s.borrow_mut().push((old.copied(), *new));
            }),
        );

        prop.set(&registry, 20);
        prop.set(&registry, 20);

        assert_eq!(*seen.borrow(), vec![(Some(10), 20), (Some(20), 20)]);
        assert_eq!(*prop.peek(), 20);
    }

    #[test]
    fn test_set_marks_identity_instrumented() {
        let registry = Registry::new();
        let mut prop = Property::new(0);
        assert!(!registry.has_pulsed(prop.id()));

        prop.set(&registry, 1);
        assert!(registry.has_pulsed(prop.id()));
    }

    #[test]
    fn test_get_signals_touch() {
        let registry = Registry::new();
        let prop = Property::new(0);
        assert!(!registry.has_pulsed(prop.id()));

        let _ = prop.get(&registry);
        assert!(registry.has_pulsed(prop.id()));
    }

    #[test]
    fn test_replace_is_silent() {
        let registry = Registry::new();
        let mut prop = Property::new(1);

        let count = Rc::new(RefCell::new(0));
        let c = count.clone();
        let _handle = registry.register(prop.id(), UpdateHandler::update(false, move |_: &i32| {
            *c.borrow_mut() += 1
        }));

        let old = prop.replace(5);
        assert_eq!(old, 1);
        assert_eq!(*prop.peek(), 5);
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_two_properties_have_distinct_identities() {
        let a: Property<i32> = Property::new(0);
        let b: Property<i32> = Property::new(0);
        assert_ne!(a.id(), b.id());
    }
}

//! Weakly bound proxies.
//!
//! A `WeakProxy` holds its container through `Weak`, so handing the proxy
//! to long-lived UI code never extends the container's lifetime. Once the
//! container drops, reads fall back to the last value seen through this
//! proxy and writes become no-ops.

use crate::observable::Observable;
use crate::projection::ReadOnlyProjection;
use alloc::rc::{Rc, Weak};
use core::cell::RefCell;
use tether_core::{ChangeEvent, Error, Result};
use tether_observe::{Model, ObservationHandle, PropertySlot, UpdateHandler};

/// A read/write binding that does not keep its container alive.
pub struct WeakProxy<T> {
    cache: Rc<RefCell<T>>,
    read: Rc<dyn Fn() -> Option<T>>,
    write: Rc<dyn Fn(T) -> bool>,
    register: Rc<dyn Fn(UpdateHandler<T>) -> ObservationHandle>,
}

impl<T> Clone for WeakProxy<T> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            read: self.read.clone(),
            write: self.write.clone(),
            register: self.register.clone(),
        }
    }
}

impl<T: Clone + 'static> WeakProxy<T> {
    /// Binds a weak proxy to a property slot of a shared model.
    ///
    /// The current value is snapshotted into the fallback cache at bind
    /// time, so a proxy bound to a container that dies immediately still
    /// reads something sensible.
    pub fn bind<M, P, FR, FW>(model: &Rc<RefCell<M>>, prop: FR, prop_mut: FW) -> Self
    where
        M: Model + 'static,
        P: PropertySlot<T> + 'static,
        FR: for<'a> Fn(&'a M) -> &'a P + 'static,
        FW: for<'a> Fn(&'a mut M) -> &'a mut P + 'static,
    {
        let cache = Rc::new(RefCell::new(prop(&model.borrow()).peek().clone()));
        let prop = Rc::new(prop);
        let weak = Rc::downgrade(model);

        let read = {
            let weak = Weak::clone(&weak);
            let prop = Rc::clone(&prop);
            move || {
                let model = weak.upgrade()?;
                let m = model.borrow();
                let registry = m.registry().clone();
                let slot = prop(&m);
                slot.touch(&registry);
                Some(slot.peek().clone())
            }
        };

        let write = {
            let weak = Weak::clone(&weak);
            move |value: T| {
                let Some(model) = weak.upgrade() else {
                    return false;
                };
                let (registry, id, old) = {
                    let mut m = model.borrow_mut();
                    let registry = m.registry().clone();
                    let slot = prop_mut(&mut m);
                    let old = slot.replace(value.clone());
                    (registry, slot.id(), old)
                };
                registry.note_write(id);
                registry.dispatch(id, &ChangeEvent::changed(old, value));
                true
            }
        };

        let register = {
            let weak = Weak::clone(&weak);
            let cache = Rc::clone(&cache);
            move |handler: UpdateHandler<T>| {
                let Some(model) = weak.upgrade() else {
                    // Dead source: the subscription can never fire. Honor the
                    // snapshot request from the fallback cache and hand back
                    // a handle with nothing to release.
                    log::warn!("observer registered on a dropped binding source");
                    if handler.include_current() {
                        handler.deliver(&ChangeEvent::current(cache.borrow().clone()));
                    }
                    return ObservationHandle::inert();
                };
                let (registry, id, current) = {
                    let m = model.borrow();
                    let registry = m.registry().clone();
                    let slot = prop(&m);
                    let current = if handler.include_current() {
                        Some(slot.peek().clone())
                    } else {
                        None
                    };
                    (registry, slot.id(), current)
                };
                if let Some(current) = current {
                    handler.deliver(&ChangeEvent::current(current));
                }
                registry.register(id, handler)
            }
        };

        Self {
            cache,
            read: Rc::new(read),
            write: Rc::new(write),
            register: Rc::new(register),
        }
    }

    /// Reads the bound property, falling back to the last value this proxy
    /// saw once the container is gone.
    pub fn get(&self) -> T {
        match (self.read)() {
            Some(value) => {
                *self.cache.borrow_mut() = value.clone();
                value
            }
            None => self.cache.borrow().clone(),
        }
    }

    /// Writes the bound property. Silently a no-op once the container is
    /// gone; the fallback cache still tracks the attempted value so
    /// subsequent reads stay coherent with the caller's view.
    pub fn set(&self, value: T) {
        *self.cache.borrow_mut() = value.clone();
        (self.write)(value);
    }

    /// Like [`set`](Self::set), but reports a detached container.
    pub fn try_set(&self, value: T) -> Result<()> {
        *self.cache.borrow_mut() = value.clone();
        if (self.write)(value) {
            Ok(())
        } else {
            Err(Error::detached("write through weak proxy"))
        }
    }

    /// Whether the container is still alive.
    pub fn is_live(&self) -> bool {
        (self.read)().is_some()
    }

    /// Read-only view of this proxy, with the same fallback behavior.
    pub fn read_only(&self) -> ReadOnlyProjection<T> {
        let this = self.clone();
        ReadOnlyProjection::new(move || this.get(), {
            let register = self.register.clone();
            move |handler| register(handler)
        })
    }
}

impl<T: Clone + 'static> Observable for WeakProxy<T> {
    type Value = T;

    fn current(&self) -> T {
        self.get()
    }

    fn register(&self, handler: UpdateHandler<T>) -> ObservationHandle {
        (self.register)(handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_observe::{Property, Registry};

    struct Counter {
        registry: Registry,
        value: Property<i64>,
    }

    impl Model for Counter {
        fn registry(&self) -> &Registry {
            &self.registry
        }
    }

    fn counter(initial: i64) -> Rc<RefCell<Counter>> {
        Rc::new(RefCell::new(Counter {
            registry: Registry::new(),
            value: Property::new(initial),
        }))
    }

    fn value_prop(m: &Counter) -> &Property<i64> {
        &m.value
    }

    fn value_prop_mut(m: &mut Counter) -> &mut Property<i64> {
        &mut m.value
    }

    fn bind(model: &Rc<RefCell<Counter>>) -> WeakProxy<i64> {
        WeakProxy::bind(model, value_prop, value_prop_mut)
    }

    #[test]
    fn test_live_reads_and_writes() {
        let model = counter(1);
        let proxy = bind(&model);

        assert!(proxy.is_live());
        proxy.set(8);
        assert_eq!(proxy.get(), 8);
        assert_eq!(*model.borrow().value.peek(), 8);
    }

    #[test]
    fn test_does_not_keep_container_alive() {
        let model = counter(1);
        let weak = Rc::downgrade(&model);
        let proxy = bind(&model);

        drop(model);
        assert!(weak.upgrade().is_none());
        assert!(!proxy.is_live());
    }

    #[test]
    fn test_dead_read_falls_back_to_last_seen() {
        let model = counter(1);
        let proxy = bind(&model);

        proxy.set(42);
        assert_eq!(proxy.get(), 42);

        drop(model);
        assert_eq!(proxy.get(), 42);
    }

    #[test]
    fn test_dead_write_is_noop_but_try_set_reports() {
        let model = counter(1);
        let proxy = bind(&model);
        drop(model);

        proxy.set(9);
        assert!(proxy.try_set(10).is_err());
        // The fallback cache follows the attempted writes.
        assert_eq!(proxy.get(), 10);
    }

    #[test]
    fn test_dead_registration_delivers_cached_snapshot_only() {
        let model = counter(3);
        let proxy = bind(&model);
        drop(model);

        let seen = Rc::new(RefCell::new(alloc::vec::Vec::new()));
        let s = seen.clone();
        let handle = proxy.subscribe(true, move |v| s.borrow_mut().push(*v));

        assert_eq!(*seen.borrow(), alloc::vec![3]);
        assert!(!handle.is_active());
    }

    #[test]
    fn test_live_subscription_then_container_drop() {
        let model = counter(0);
        let proxy = bind(&model);

        let count = Rc::new(RefCell::new(0));
        let c = count.clone();
        let _handle = proxy.subscribe(false, move |_| *c.borrow_mut() += 1);

        proxy.set(1);
        assert_eq!(*count.borrow(), 1);

        drop(model);
        proxy.set(2);
        assert_eq!(*count.borrow(), 1);
    }
}

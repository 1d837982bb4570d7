//! Bidirectional value proxies.
//!
//! A `ValueProxy` is a value-type bundle of three closures captured at
//! construction time: read, write, and register-observer. It is not owned
//! by the registry; cloning a proxy clones the closures, and every clone
//! addresses the same underlying property.
//!
//! The strongly-bound constructor captures the container via `Rc`, which
//! keeps the container alive as long as the proxy exists. Use
//! [`WeakProxy`](crate::WeakProxy) when a proxy is handed to a component
//! that may outlive the container.

use crate::observable::Observable;
use crate::projection::ReadOnlyProjection;
use crate::selector::FieldSelector;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};
use tether_core::ChangeEvent;
use tether_observe::{Model, ObservationHandle, PropertySlot, UpdateHandler};

/// A read/write binding to one observable property.
pub struct ValueProxy<T> {
    read: Rc<dyn Fn() -> T>,
    write: Rc<dyn Fn(T)>,
    register: Rc<dyn Fn(UpdateHandler<T>) -> ObservationHandle>,
}

impl<T> Clone for ValueProxy<T> {
    fn clone(&self) -> Self {
        Self {
            read: self.read.clone(),
            write: self.write.clone(),
            register: self.register.clone(),
        }
    }
}

impl<T: Clone + 'static> ValueProxy<T> {
    /// Creates a proxy from raw closures. The register closure is
    /// responsible for delivering the `Current` snapshot when the handler
    /// requests one.
    pub fn new(
        read: impl Fn() -> T + 'static,
        write: impl Fn(T) + 'static,
        register: impl Fn(UpdateHandler<T>) -> ObservationHandle + 'static,
    ) -> Self {
        Self {
            read: Rc::new(read),
            write: Rc::new(write),
            register: Rc::new(register),
        }
    }

    /// Binds a proxy to a property slot of a shared model.
    ///
    /// The accessors are usually plain functions, one per field. The write
    /// closure swaps the value while the model is borrowed, then releases
    /// the borrow before dispatching, so callbacks may read the model
    /// re-entrantly on the same stack.
    pub fn bind<M, P, FR, FW>(model: &Rc<RefCell<M>>, prop: FR, prop_mut: FW) -> Self
    where
        M: Model + 'static,
        P: PropertySlot<T> + 'static,
        FR: for<'a> Fn(&'a M) -> &'a P + 'static,
        FW: for<'a> Fn(&'a mut M) -> &'a mut P + 'static,
    {
        let prop = Rc::new(prop);

        let read = {
            let model = Rc::clone(model);
            let prop = Rc::clone(&prop);
            move || {
                let m = model.borrow();
                let registry = m.registry().clone();
                let slot = prop(&m);
                slot.touch(&registry);
                slot.peek().clone()
            }
        };

        let write = {
            let model = Rc::clone(model);
            move |value: T| {
                let (registry, id, old) = {
                    let mut m = model.borrow_mut();
                    let registry = m.registry().clone();
                    let slot = prop_mut(&mut m);
                    let old = slot.replace(value.clone());
                    (registry, slot.id(), old)
                };
                registry.note_write(id);
                registry.dispatch(id, &ChangeEvent::changed(old, value));
            }
        };

        let register = {
            let model = Rc::clone(model);
            move |handler: UpdateHandler<T>| {
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

        Self::new(read, write, register)
    }

    /// Reads the bound property.
    pub fn get(&self) -> T {
        (self.read)()
    }

    /// Writes the bound property, dispatching synchronously.
    pub fn set(&self, value: T) {
        (self.write)(value)
    }

    /// Derives a proxy for one field of the bound value.
    ///
    /// O(1) to construct and lazy: nothing is read until the derived proxy
    /// is used. Subscriptions on the derived proxy are re-keyed through the
    /// selector and ride on this proxy's registration, so a chain of any
    /// depth owns exactly one registry entry per subscription.
    pub fn derive<S: Clone + 'static>(&self, selector: FieldSelector<T, S>) -> ValueProxy<S> {
        let read = {
            let parent = self.read.clone();
            let selector = selector.clone();
            move || selector.read(&parent())
        };

        let write = {
            let parent_read = self.read.clone();
            let parent_write = self.write.clone();
            let selector = selector.clone();
            move |field: S| {
                let mut value = parent_read();
                selector.write(&mut value, field);
                parent_write(value);
            }
        };

        let register = {
            let parent = self.register.clone();
            let getter = selector.getter();
            move |handler: UpdateHandler<S>| {
                let getter = getter.clone();
                parent(handler.pass_through(move |value: &T| getter(value)))
            }
        };

        ValueProxy::new(read, write, register)
    }

    /// Read-only view of this proxy.
    pub fn read_only(&self) -> ReadOnlyProjection<T> {
        ReadOnlyProjection::from_parts(self.read.clone(), self.register.clone())
    }

    /// Echo-guarded view: writes through the returned proxy suppress
    /// deliveries to subscriptions registered through it while the write is
    /// in flight. This breaks the feedback loop between two mutually bound
    /// proxies; mutual bindings across more than two parties remain
    /// unsupported.
    pub fn suppressing_echo(&self) -> ValueProxy<T> {
        let updating = Rc::new(Cell::new(false));

        let write = {
            let parent = self.write.clone();
            let updating = updating.clone();
            move |value: T| {
                updating.set(true);
                parent(value);
                updating.set(false);
            }
        };

        let register = {
            let parent = self.register.clone();
            move |handler: UpdateHandler<T>| {
                let updating = updating.clone();
                parent(handler.filtered(move |_| !updating.get()))
            }
        };

        ValueProxy {
            read: self.read.clone(),
            write: Rc::new(write),
            register: Rc::new(register),
        }
    }

    /// Whether two proxies are the same binding (share the same closure
    /// bundle). Proxy equality is identity-based; two distinct proxies
    /// over equal values are not the same binding.
    pub fn same_binding(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.register, &other.register)
    }
}

impl<T: Clone + 'static> Observable for ValueProxy<T> {
    type Value = T;

    fn current(&self) -> T {
        self.get()
    }

    fn register(&self, handler: UpdateHandler<T>) -> ObservationHandle {
        (self.register)(handler)
    }
}

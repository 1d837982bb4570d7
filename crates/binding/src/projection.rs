//! Read-only projections over observable values.

use crate::observable::Observable;
use alloc::rc::Rc;
use tether_observe::{ObservationHandle, UpdateHandler};

/// A read-only view of an observable value, optionally transformed.
pub struct ReadOnlyProjection<T> {
    read: Rc<dyn Fn() -> T>,
    register: Rc<dyn Fn(UpdateHandler<T>) -> ObservationHandle>,
}

impl<T> Clone for ReadOnlyProjection<T> {
    fn clone(&self) -> Self {
        Self {
            read: self.read.clone(),
            register: self.register.clone(),
        }
    }
}

impl<T: Clone + 'static> ReadOnlyProjection<T> {
    /// Creates a projection from raw closures.
    pub fn new(
        read: impl Fn() -> T + 'static,
        register: impl Fn(UpdateHandler<T>) -> ObservationHandle + 'static,
    ) -> Self {
        Self {
            read: Rc::new(read),
            register: Rc::new(register),
        }
    }

    pub(crate) fn from_parts(
        read: Rc<dyn Fn() -> T>,
        register: Rc<dyn Fn(UpdateHandler<T>) -> ObservationHandle>,
    ) -> Self {
        Self { read, register }
    }

    /// Reads the projected value.
    pub fn get(&self) -> T {
        (self.read)()
    }

    /// Maps the projected value through a pure transform.
    ///
    /// Subscriptions on the mapped projection see both sides of each change
    /// through the transform, so change filtering compares transformed
    /// values.
    pub fn map<U: Clone + 'static>(&self, transform: impl Fn(&T) -> U + 'static) -> ReadOnlyProjection<U> {
        let transform = Rc::new(transform);

        let read = {
            let parent = self.read.clone();
            let transform = transform.clone();
            move || transform(&parent())
        };

        let register = {
            let parent = self.register.clone();
            move |handler: UpdateHandler<U>| {
                let transform = transform.clone();
                parent(handler.mapped(move |value: &T| transform(value)))
            }
        };

        ReadOnlyProjection::new(read, register)
    }
}

impl<T: Clone + 'static> Observable for ReadOnlyProjection<T> {
    type Value = T;

    fn current(&self) -> T {
        self.get()
    }

    fn register(&self, handler: UpdateHandler<T>) -> ObservationHandle {
        (self.register)(handler)
    }
}

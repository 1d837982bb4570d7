//! Update handlers and filter policies.
//!
//! An `UpdateHandler` wraps a user callback with an optional predicate that
//! decides whether an event is delivered, plus a flag requesting an
//! immediate `Current` snapshot at subscription time.
//!
//! The "update" family has no predicate and fires on every write, including
//! writes that reassign an equal value. The "change" family filters on
//! equality: a `Current` always passes, a `Changed` passes iff old != new.

use alloc::rc::Rc;
use alloc::vec::Vec;
use tether_core::ChangeEvent;

/// Callback invoked with an accepted event.
pub type Callback<T> = Rc<dyn Fn(&ChangeEvent<T>)>;

/// Predicate deciding whether an event is delivered.
pub type Predicate<T> = Rc<dyn Fn(&ChangeEvent<T>) -> bool>;

/// Comparison over two values of the observed type, returning true when a
/// projected field differs between them.
pub type FieldComparer<T> = Rc<dyn Fn(&T, &T) -> bool>;

/// A filter policy plus user callback for one subscription.
pub struct UpdateHandler<T> {
    /// Deliver a `Current` snapshot immediately at subscription time.
    include_current: bool,
    /// Absent predicate means every event is delivered.
    predicate: Option<Predicate<T>>,
    callback: Callback<T>,
}

impl<T> Clone for UpdateHandler<T> {
    fn clone(&self) -> Self {
        Self {
            include_current: self.include_current,
            predicate: self.predicate.clone(),
            callback: self.callback.clone(),
        }
    }
}

impl<T: 'static> UpdateHandler<T> {
    /// Unconditional policy: fires on every write.
    pub fn update<F>(include_current: bool, f: F) -> Self
    where
        F: Fn(&T) + 'static,
    {
        Self {
            include_current,
            predicate: None,
            callback: Rc::new(move |event| f(event.new_value())),
        }
    }

    /// Unconditional policy with the full call shape: old value (absent for
    /// snapshots), new value, and whether this is a snapshot delivery.
    pub fn update_full<F>(include_current: bool, f: F) -> Self
    where
        F: Fn(Option<&T>, &T, bool) + 'static,
    {
        Self {
            include_current,
            predicate: None,
            callback: Rc::new(move |event| match event {
                ChangeEvent::Current(value) => f(None, value, true),
                ChangeEvent::Changed { old, new } => f(Some(old), new, false),
            }),
        }
    }

    /// Equality-filtered policy: fires only for observable differences.
    pub fn change<F>(include_current: bool, f: F) -> Self
    where
        T: PartialEq,
        F: Fn(&T) + 'static,
    {
        Self {
            include_current,
            predicate: Some(Rc::new(|event: &ChangeEvent<T>| event.has_changed())),
            callback: Rc::new(move |event| f(event.new_value())),
        }
    }

    /// Field-comparison policy: fires when ANY of the projected fields
    /// differs between old and new. Snapshots always pass.
    pub fn change_comparing<F>(comparers: Vec<FieldComparer<T>>, include_current: bool, f: F) -> Self
    where
        F: Fn(&T) + 'static,
    {
        Self {
            include_current,
            predicate: Some(Rc::new(move |event: &ChangeEvent<T>| match event {
                ChangeEvent::Current(_) => true,
                ChangeEvent::Changed { old, new } => {
                    comparers.iter().any(|differs| differs(old, new))
                }
            })),
            callback: Rc::new(move |event| f(event.new_value())),
        }
    }

    /// Whether this handler requested an immediate snapshot delivery.
    #[inline]
    pub fn include_current(&self) -> bool {
        self.include_current
    }

    /// Returns this handler with the snapshot request cleared.
    pub fn without_current(mut self) -> Self {
        self.include_current = false;
        self
    }

    /// Whether the predicate accepts the event.
    pub fn accepts(&self, event: &ChangeEvent<T>) -> bool {
        self.predicate.as_ref().map_or(true, |p| p(event))
    }

    /// Applies the predicate and, if accepted, invokes the callback.
    pub fn deliver(&self, event: &ChangeEvent<T>) {
        if self.accepts(event) {
            (self.callback)(event);
        }
    }

    /// Re-keys this handler to an outer type via a field projection.
    ///
    /// Both predicate and callback first convert the outer event to an
    /// inner one, then delegate. This is what lets a derived proxy's
    /// subscription ride on its parent's registry entry.
    pub fn pass_through<Outer: 'static>(
        self,
        project: impl Fn(&Outer) -> T + 'static,
    ) -> UpdateHandler<Outer> {
        let project = Rc::new(project);
        let predicate = self.predicate.map(|pred| {
            let project = project.clone();
            let p: Predicate<Outer> =
                Rc::new(move |event: &ChangeEvent<Outer>| pred(&event.map(|v| project(v))));
            p
        });
        let callback = self.callback;
        let callback: Callback<Outer> =
            Rc::new(move |event: &ChangeEvent<Outer>| callback(&event.map(|v| project(v))));
        UpdateHandler {
            include_current: self.include_current,
            predicate,
            callback,
        }
    }

    /// Pure-function analogue of [`pass_through`](Self::pass_through), used
    /// by read-only projections: transforms the value instead of selecting
    /// a field.
    pub fn mapped<Outer: 'static>(
        self,
        transform: impl Fn(&Outer) -> T + 'static,
    ) -> UpdateHandler<Outer> {
        self.pass_through(transform)
    }

    /// ANDs an extra predicate onto this handler. Used by the echo guard to
    /// suppress self-triggered deliveries.
    pub fn filtered(self, keep: impl Fn(&ChangeEvent<T>) -> bool + 'static) -> Self {
        let keep = Rc::new(keep);
        let predicate: Predicate<T> = match self.predicate {
            Some(pred) => Rc::new(move |event: &ChangeEvent<T>| keep(event) && pred(event)),
            None => Rc::new(move |event: &ChangeEvent<T>| keep(event)),
        };
        Self {
            include_current: self.include_current,
            predicate: Some(predicate),
            callback: self.callback,
        }
    }
}

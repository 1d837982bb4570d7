//! Field selectors (lenses) for deriving bindings into nested fields.
//!
//! A selector is a getter/setter pair for one field of a container type.
//! Selectors compose, which is what makes proxy derivation chains
//! associative: deriving by `a` then `b` observes identically to deriving
//! once by `a.compose(b)`.

use alloc::rc::Rc;
use tether_observe::FieldComparer;

/// A getter/setter pair selecting one field of `T`.
pub struct FieldSelector<T, S> {
    get: Rc<dyn Fn(&T) -> S>,
    set: Rc<dyn Fn(&mut T, S)>,
}

impl<T, S> Clone for FieldSelector<T, S> {
    fn clone(&self) -> Self {
        Self {
            get: self.get.clone(),
            set: self.set.clone(),
        }
    }
}

impl<T: 'static, S: Clone + 'static> FieldSelector<T, S> {
    /// Creates a selector from a clone-out getter and a write-back setter.
    pub fn new(get: impl Fn(&T) -> S + 'static, set: impl Fn(&mut T, S) + 'static) -> Self {
        Self {
            get: Rc::new(get),
            set: Rc::new(set),
        }
    }

    /// Reads the field out of a container value.
    pub fn read(&self, value: &T) -> S {
        (self.get)(value)
    }

    /// Writes the field back into a container value.
    pub fn write(&self, value: &mut T, field: S) {
        (self.set)(value, field)
    }

    /// Returns the getter closure, shared.
    pub fn getter(&self) -> Rc<dyn Fn(&T) -> S> {
        self.get.clone()
    }

    /// Composes this selector with one that selects into its field type.
    pub fn compose<R: Clone + 'static>(&self, next: &FieldSelector<S, R>) -> FieldSelector<T, R> {
        let outer_get = self.get.clone();
        let read_for_set = self.get.clone();
        let outer_set = self.set.clone();
        let inner_get = next.get.clone();
        let inner_set = next.set.clone();
        FieldSelector {
            get: Rc::new(move |value: &T| inner_get(&outer_get(value))),
            set: Rc::new(move |value: &mut T, field: R| {
                let mut mid = read_for_set(value);
                inner_set(&mut mid, field);
                outer_set(value, mid);
            }),
        }
    }

    /// Returns a comparer that is true when this field differs between two
    /// container values. Feeds the field-comparison filter policy.
    pub fn comparer(&self) -> FieldComparer<T>
    where
        S: PartialEq,
    {
        let get = self.get.clone();
        Rc::new(move |a: &T, b: &T| get(a) != get(b))
    }

    /// Lifts this selector over optional containers.
    ///
    /// The projected comparison then happens on `Option<S>`:
    /// absence-to-absence compares equal, absence-to-presence differs.
    pub fn lifted(&self) -> FieldSelector<Option<T>, Option<S>> {
        let get = self.get.clone();
        let set = self.set.clone();
        FieldSelector {
            get: Rc::new(move |value: &Option<T>| value.as_ref().map(|v| get(v))),
            set: Rc::new(move |value: &mut Option<T>, field: Option<S>| {
                if let (Some(value), Some(field)) = (value.as_mut(), field) {
                    set(value, field);
                }
            }),
        }
    }
}

/// Builds a [`FieldSelector`] for a named struct field.
///
/// ```rust
/// use tether_binding::{field_selector, FieldSelector};
///
/// #[derive(Clone)]
/// struct Size { width: i64, height: i64 }
///
/// let width: FieldSelector<Size, i64> = field_selector!(Size, width);
/// let mut size = Size { width: 1, height: 2 };
/// width.write(&mut size, 10);
/// assert_eq!(width.read(&size), 10);
/// ```
#[macro_export]
macro_rules! field_selector {
    ($container:ty, $field:ident) => {
        $crate::FieldSelector::new(
            |value: &$container| value.$field.clone(),
            |value: &mut $container, field| value.$field = field,
        )
    };
}

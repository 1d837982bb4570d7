//! Change events delivered to observers.
//!
//! An event is either a synthetic snapshot of the current value or a real
//! old-to-new transition. Every derivation (field selection, pure mapping)
//! preserves the variant: a `Current` maps to a `Current`, a `Changed` maps
//! to a `Changed` with both sides transformed individually.

/// A value delivery for one observed property.
#[derive(Clone, Debug, PartialEq)]
pub enum ChangeEvent<T> {
    /// Synthetic snapshot of the current value, delivered at subscription
    /// time rather than from a real write.
    Current(T),
    /// A real transition caused by a write.
    Changed {
        /// Value before the write.
        old: T,
        /// Value after the write.
        new: T,
    },
}

impl<T> ChangeEvent<T> {
    /// Creates a snapshot event.
    #[inline]
    pub fn current(value: T) -> Self {
        ChangeEvent::Current(value)
    }

    /// Creates a transition event.
    #[inline]
    pub fn changed(old: T, new: T) -> Self {
        ChangeEvent::Changed { old, new }
    }

    /// Returns true for snapshot events.
    #[inline]
    pub fn is_current(&self) -> bool {
        matches!(self, ChangeEvent::Current(_))
    }

    /// Returns the value after the event: the snapshot for `Current`, the
    /// new value for `Changed`.
    pub fn new_value(&self) -> &T {
        match self {
            ChangeEvent::Current(value) => value,
            ChangeEvent::Changed { new, .. } => new,
        }
    }

    /// Returns the value before the event, if there was one.
    pub fn old_value(&self) -> Option<&T> {
        match self {
            ChangeEvent::Current(_) => None,
            ChangeEvent::Changed { old, .. } => Some(old),
        }
    }

    /// Maps the event through `f`, preserving the variant. For `Changed`,
    /// old and new are transformed individually.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> ChangeEvent<U> {
        match self {
            ChangeEvent::Current(value) => ChangeEvent::Current(f(value)),
            ChangeEvent::Changed { old, new } => ChangeEvent::Changed {
                old: f(old),
                new: f(new),
            },
        }
    }
}

impl<T: PartialEq> ChangeEvent<T> {
    /// Whether this event represents an observable difference.
    ///
    /// A `Current` is always considered different from nothing and passes
    /// every equality filter; a `Changed` passes iff old != new.
    pub fn has_changed(&self) -> bool {
        match self {
            ChangeEvent::Current(_) => true,
            ChangeEvent::Changed { old, new } => old != new,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let ev = ChangeEvent::current(5);
        assert!(ev.is_current());
        assert_eq!(*ev.new_value(), 5);
        assert_eq!(ev.old_value(), None);

        let ev = ChangeEvent::changed(1, 2);
        assert!(!ev.is_current());
        assert_eq!(*ev.new_value(), 2);
        assert_eq!(ev.old_value(), Some(&1));
    }

    #[test]
    fn test_map_preserves_variant() {
        let ev = ChangeEvent::current(2).map(|v| v * 10);
        assert_eq!(ev, ChangeEvent::Current(20));

        let ev = ChangeEvent::changed(1, 3).map(|v| v * 10);
        assert_eq!(ev, ChangeEvent::Changed { old: 10, new: 30 });
    }

    #[test]
    fn test_has_changed() {
        assert!(ChangeEvent::current(1).has_changed());
        assert!(ChangeEvent::changed(1, 2).has_changed());
        assert!(!ChangeEvent::changed(2, 2).has_changed());
    }

    #[test]
    fn test_has_changed_on_options() {
        // Absence-to-absence compares equal, absence-to-presence differs.
        assert!(!ChangeEvent::changed(None::<i32>, None).has_changed());
        assert!(ChangeEvent::changed(None, Some(1)).has_changed());
        assert!(ChangeEvent::changed(Some(1), None).has_changed());
        assert!(!ChangeEvent::changed(Some(1), Some(1)).has_changed());
    }
}

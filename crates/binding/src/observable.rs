//! The observable surface shared by proxies and projections.
//!
//! `register` is the single primitive a concrete binding must implement;
//! every named subscription method is built on top of it by constructing
//! the matching filter policy.

use alloc::vec::Vec;
use tether_observe::{FieldComparer, ObservationHandle, UpdateHandler};

/// A readable source of values that can be observed.
pub trait Observable {
    /// The observed value type.
    type Value: Clone + 'static;

    /// Reads the current value.
    fn current(&self) -> Self::Value;

    /// Registers a handler and returns the handle keeping it alive.
    ///
    /// If the handler requests it, a `Current` snapshot is delivered
    /// synchronously before this returns.
    fn register(&self, handler: UpdateHandler<Self::Value>) -> ObservationHandle;

    /// Fires on every write, including writes reassigning an equal value.
    fn subscribe<F>(&self, include_current: bool, f: F) -> ObservationHandle
    where
        F: Fn(&Self::Value) + 'static,
    {
        self.register(UpdateHandler::update(include_current, f))
    }

    /// Like [`subscribe`](Self::subscribe), with the full call shape:
    /// old value (absent for snapshots), new value, and a snapshot flag.
    fn subscribe_full<F>(&self, include_current: bool, f: F) -> ObservationHandle
    where
        F: Fn(Option<&Self::Value>, &Self::Value, bool) + 'static,
    {
        self.register(UpdateHandler::update_full(include_current, f))
    }

    /// Fires only for observable differences (old != new). Snapshots
    /// always fire.
    fn on_change<F>(&self, include_current: bool, f: F) -> ObservationHandle
    where
        Self::Value: PartialEq,
        F: Fn(&Self::Value) + 'static,
    {
        self.register(UpdateHandler::change(include_current, f))
    }

    /// Fires when ANY of the projected fields differs between old and new,
    /// even if the value type as a whole is not comparable.
    fn on_change_comparing<F>(
        &self,
        comparers: Vec<FieldComparer<Self::Value>>,
        include_current: bool,
        f: F,
    ) -> ObservationHandle
    where
        F: Fn(&Self::Value) + 'static,
    {
        self.register(UpdateHandler::change_comparing(comparers, include_current, f))
    }
}

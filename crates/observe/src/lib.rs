//! Tether Observe - observer registry and dispatch engine.
//!
//! This crate implements the observation core: per-container registries
//! keyed by property identity, disposable observation handles, and the
//! update/change filter policies applied before a user callback runs.
//!
//! # Core Concepts
//!
//! - `Registry`: per-container entry collection; dispatches events to the
//!   live entries whose identity matches
//! - `ObservationHandle`: strong side of a subscription; severs the entry
//!   when dropped or disposed
//! - `UpdateHandler`: filter policy (always-fire, equality-filtered, or
//!   field-comparison) plus the user callback
//! - `Property` / `Model`: the instrumented-field and owning-container
//!   contracts
//!
//! Delivery is single-threaded and synchronous: a write dispatches on the
//! caller's stack before the setter returns, and disposal only prevents
//! future deliveries.
//!
//! # Example
//!
//! ```rust
//! use tether_observe::{Property, Registry, UpdateHandler};
//!
//! let registry = Registry::new();
//! let mut width = Property::new(0i64);
//!
//! let handle = registry.register(
//!     width.id(),
//!     UpdateHandler::change(false, |w: &i64| assert_eq!(*w, 20)),
//! );
//!
//! width.set(&registry, 0); // equal value: filtered out
//! width.set(&registry, 20); // fires
//! drop(handle);
//! ```

#![no_std]

extern crate alloc;

pub mod handle;
pub mod handler;
pub mod property;
pub mod registry;

pub use handle::{HandleBag, ObservationHandle};
pub use handler::{Callback, FieldComparer, Predicate, UpdateHandler};
pub use property::{Model, Property, PropertySlot};
pub use registry::{EntryId, Registry};

// Re-export the value types observers interact with.
pub use tether_core::{ChangeEvent, PropertyId};

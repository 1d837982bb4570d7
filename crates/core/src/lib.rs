//! Tether Core - identity, change event, and error types.
//!
//! This crate provides the foundational value types for the Tether
//! observation and binding system:
//!
//! - `PropertyId`: an opaque token naming one property slot on one container
//! - `ChangeEvent`: a snapshot (`Current`) or transition (`Changed`) delivery
//! - `Error`: error types for store-backed and weak-binding operations
//!
//! # Example
//!
//! ```rust
//! use tether_core::{ChangeEvent, PropertyId};
//!
//! let id = PropertyId::next();
//! assert_ne!(id, PropertyId::next());
//!
//! let event = ChangeEvent::changed(1, 2);
//! assert!(event.has_changed());
//! assert_eq!(*event.new_value(), 2);
//! ```

#![no_std]

extern crate alloc;

mod error;
mod event;
mod identity;

pub use error::{Error, Result};
pub use event::ChangeEvent;
pub use identity::PropertyId;

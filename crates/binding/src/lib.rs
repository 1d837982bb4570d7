//! Value proxies and derived bindings.
//!
//! This crate layers keypath-style bindings on top of the observation
//! registry in `tether-observe`:
//!
//! - [`ValueProxy`] is a strongly bound read/write handle to one property.
//! - [`FieldSelector`] derives proxies into nested fields; derivation is
//!   O(1), lazy, and associative.
//! - [`WeakProxy`] is the same binding without keeping the container alive.
//! - [`ReadOnlyProjection`] and the `compound*` joiners build read-only
//!   views over one or several sources.
//!
//! Everything here is single-threaded and dispatches synchronously.

#![no_std]

extern crate alloc;

mod compound;
mod observable;
mod projection;
mod proxy;
mod selector;
mod weak;

pub use compound::{compound2, compound3, compound4};
pub use observable::Observable;
pub use projection::ReadOnlyProjection;
pub use proxy::ValueProxy;
pub use selector::FieldSelector;
pub use weak::WeakProxy;

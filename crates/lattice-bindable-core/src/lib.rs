//! Core systems for Lattice Bindable.
//!
//! This crate provides the foundational pieces the bindable model is built on:
//!
//! - **Signal/Slot System**: Type-safe, synchronous change notification
//! - **Property System**: Change-detecting value slots
//! - **Logging**: `tracing` targets for filtering
//!
//! # Example
//!
//! ```
//! use lattice_bindable_core::{Property, Signal};
//!
//! let name = Property::new(String::new());
//! let name_changed = Signal::<String>::new();
//!
//! let conn_id = name_changed.connect(|value| {
//!     println!("Name changed to: {}", value);
//! });
//!
//! if name.set("Ada".to_string()) {
//!     name_changed.emit(name.get());
//! }
//!
//! name_changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};

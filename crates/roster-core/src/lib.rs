//! Core systems for Roster.
//!
//! This crate provides the foundational pieces the model layer is built on:
//!
//! - **Signal/Slot System**: synchronous, type-safe change notification
//! - **Errors**: the crate-wide [`RosterError`] and [`Result`] alias
//! - **Logging**: `tracing` target names for filtering
//!
//! # Signal/Slot Example
//!
//! ```
//! use roster_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```

mod error;
pub mod logging;
pub mod signal;

pub use error::{Result, RosterError};
pub use signal::{ConnectionGuard, ConnectionId, Signal};

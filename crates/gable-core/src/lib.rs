//! Core object services for Gable.
//!
//! This crate holds the foundational pieces shared by the Gable widget
//! toolkit crates. For now that is the signal/slot system used for change
//! notification: objects own [`Signal`] values and emit them when their
//! state changes, and interested parties connect closures to react.
//!
//! # Example
//!
//! ```
//! use gable_core::Signal;
//!
//! struct Counter {
//!     value: i32,
//!     value_changed: Signal<i32>,
//! }
//!
//! impl Counter {
//!     fn increment(&mut self) {
//!         self.value += 1;
//!         self.value_changed.emit(self.value);
//!     }
//! }
//!
//! let mut counter = Counter { value: 0, value_changed: Signal::new() };
//! let conn = counter.value_changed.connect(|value| {
//!     assert_eq!(*value, 1);
//! });
//! counter.increment();
//! counter.value_changed.disconnect(conn);
//! ```

mod signal;

pub use signal::{ConnectionId, Signal};

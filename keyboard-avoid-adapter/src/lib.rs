//! Adapter utilities for the `keyboard-avoid` crate.
//!
//! The `keyboard-avoid` crate is UI-agnostic and focuses on the positioning logic and state.
//! This crate provides small, framework-neutral helpers a host binding needs around it:
//!
//! - A child instrumentation pass that routes multi-line inputs' selection, content size and
//!   text events into the engine
//! - Capture-phase touch claiming for unfocused text inputs
//! - A scroll view controller tying both to one engine
//!
//! Everything here is single-threaded (`Rc`/`RefCell`): it is meant to live on the UI thread.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod instrument;
mod node;
mod touch;

#[cfg(test)]
mod tests;

pub use controller::{KeyboardAwareScrollView, MeasurementSurface, Rendered};
pub use instrument::{InputEventSink, instrument};
pub use node::{Handler, InputProps, Kind, Node, SelectionChange, TextHandler};
pub use touch::claims_touch_start;

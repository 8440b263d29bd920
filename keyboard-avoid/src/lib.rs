//! A headless engine that keeps the focused text input of a scroll container visible above an
//! on-screen (virtual) keyboard.
//!
//! For adapter-level utilities (child instrumentation, touch capture, a scroll view controller),
//! see the `keyboard-avoid-adapter` crate.
//!
//! The interesting case is a multi-line input whose caret sits in the middle of its text: the
//! engine measures the height of the text before the caret in a hidden text surface and scrolls
//! so the caret's line, not the input's last line, lands above the keyboard.
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - keyboard show/hide notifications
//! - focus, selection, text and content size events for its text inputs
//! - answers to the asynchronous queries the engine emits (container position, ancestry,
//!   measurement surface layout)
//! - one `tick()` per scheduling turn (animation frame)
//!
//! and to execute the [`Command`]s the engine queues.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod command;
mod debounce;
mod engine;
mod key;
mod measure;
mod options;
mod registry;
mod state;
mod types;


pub use command::Command;
pub use debounce::Debounce;
pub use engine::{KeyboardAvoider, caret_offset};
pub use key::InputKey;
pub use measure::{CaretMeasurer, MeasurementRequest};
pub use options::{
    ContainerKind, DEFAULT_CONTENT_SIZE_SETTLE_TURNS, DEFAULT_KEYBOARD_CLEARANCE_MARGIN,
    DEFAULT_MEASURE_SETTLE_TURNS, DEFAULT_SELECTION_SETTLE_TURNS, KeyboardAvoidOptions, TextStyle,
};
pub use registry::{InputInfo, InputRegistry};
pub use state::ScrollState;
pub use types::{ContentSize, KeyboardEvent, ScrollMetrics, Token};

//! Core functionality used by the runner in `main.rs`
//! and also for headless integration tests.
//!
//! Exports `AppBuilder` and `App` to poll a rangefinder,
//! the `Sense` trait to plug in other distance sources,
//! and the `Ultrasonic` driver for the real device.

#[cfg(test)]
mod testutil;

mod result;

pub mod app;
pub mod check;
pub mod log;
pub mod sense;

pub use app::{App, Builder as AppBuilder, Pause, Sleep};
pub use result::Result;
pub use sense::{Address, Reading, Sense, Ultrasonic, Unit};

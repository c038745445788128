//! Tremor detection
//!
//! Turns a stream of 3-axis acceleration samples into a tremor level and a
//! debounced detection flag.

pub mod sample;
pub mod tremor;

pub use sample::Sample;
pub use tremor::{TremorDetector, TremorReading};

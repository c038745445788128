//! Board-agnostic core logic for the tremor watch firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (accelerometer source, reading sink)
//! - Tremor detector (delta magnitude, threshold, duration gate)
//! - Detection session binding a detector to a sensor source
//! - UI state machine for the single tremor screen
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod detector;
pub mod session;
pub mod state;
pub mod traits;

pub use config::DetectorConfig;
pub use detector::{Sample, TremorDetector, TremorReading};
pub use session::{Delivery, DetectionSession, SessionError};

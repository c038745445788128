//! Hardware abstraction traits
//!
//! These traits define the interface between the detection logic
//! and hardware-specific implementations.

pub mod sensor;
pub mod sink;

pub use sensor::{SensorError, SensorSource};
pub use sink::ReadingSink;

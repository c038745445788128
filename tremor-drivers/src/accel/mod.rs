//! Accelerometer implementations

pub mod lsm6dsox;

pub use lsm6dsox::{FullScale, Lsm6dsox, OutputDataRate};

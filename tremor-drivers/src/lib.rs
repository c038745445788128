//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in tremor-core for the watch hardware:
//!
//! - Accelerometers (LSM6DSOX over I2C)

#![no_std]
#![deny(unsafe_code)]

pub mod accel;

//! Configuration loading and parsing
//!
//! The watch configuration is a TOML file compiled into the firmware and
//! parsed at boot by a small no_std parser.

pub mod loader;
pub mod toml;

pub use loader::load_config;

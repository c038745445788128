//! Configuration types
//!
//! Board-agnostic configuration structures. The firmware fills these from
//! the embedded TOML file at boot.

pub mod hardware;
pub mod types;

pub use hardware::*;
pub use types::*;

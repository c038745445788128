//! Display abstraction and tremor screen for the Tremor Watch
//!
//! This crate provides:
//! - `DisplayBackend` trait for the character display the watch drives
//! - `Screen` character buffer with dirty tracking
//! - `TremorView` which lays out the tremor screen from the UI state and
//!   the latest detector reading
//!
//! Nothing here touches hardware. The firmware implements `DisplayBackend`
//! on top of its OLED driver and pushes the screen after every change.

#![no_std]

pub mod backend;
pub mod screen;
pub mod view;

// Re-export key types
pub use backend::{render_screen, DisplayBackend, DisplayError};
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
pub use view::{format_level, TremorView};

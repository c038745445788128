//! UI state machine
//!
//! The tremor screen has exactly three states. Every transition is a pure
//! function of the current state and one event.

pub mod events;
pub mod machine;

pub use events::UiEvent;
pub use machine::UiState;

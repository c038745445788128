//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod button;
pub mod detector;
pub mod display;

pub use button::button_task;
pub use detector::detector_task;
pub use display::display_task;

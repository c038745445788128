//! Inter-task communication channels
//!
//! Defines the statics used for communication between Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use portable_atomic::AtomicBool;

use tremor_core::detector::TremorReading;
use tremor_core::state::UiState;

/// Channel capacity for button presses
const BUTTON_CHANNEL_SIZE: usize = 4;

/// A debounced press of the start/stop button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonPress;

/// What the display task needs to draw one frame
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayUpdate {
    pub state: UiState,
    pub reading: TremorReading,
}

/// Button presses for the detector task
pub static BUTTON_CHANNEL: Channel<CriticalSectionRawMutex, ButtonPress, BUTTON_CHANNEL_SIZE> =
    Channel::new();

/// Latest screen content, older updates are overwritten
pub static DISPLAY_UPDATE: Signal<CriticalSectionRawMutex, DisplayUpdate> = Signal::new();

/// Mirrors whether the detection session is running
pub static DETECTING: AtomicBool = AtomicBool::new(false);

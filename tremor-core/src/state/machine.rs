//! State machine definition
//!
//! Label, colour and button text on the tremor screen are a function of
//! the current state.

use super::events::UiEvent;

/// Screen states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiState {
    /// Sensor stopped, button offers "Start"
    #[default]
    NotDetecting,
    /// Sampling, no tremor flagged
    DetectingClear,
    /// Sampling, tremor flagged
    DetectingTremor,
}

impl UiState {
    /// Check if the sensor should be running
    pub fn is_detecting(&self) -> bool {
        matches!(self, UiState::DetectingClear | UiState::DetectingTremor)
    }

    /// Check if the tremor indicator should be shown
    pub fn shows_tremor(&self) -> bool {
        matches!(self, UiState::DetectingTremor)
    }

    /// Event the start/stop button produces in this state
    pub fn toggle_event(&self) -> UiEvent {
        if self.is_detecting() {
            UiEvent::Stop
        } else {
            UiEvent::Start
        }
    }

    /// Process an event and return the next state
    pub fn transition(self, event: UiEvent) -> Self {
        use UiEvent::*;
        use UiState::*;

        match (self, event) {
            (NotDetecting, Start) => DetectingClear,

            (DetectingClear | DetectingTremor, Stop) => NotDetecting,
            (DetectingClear | DetectingTremor, Reading(true)) => DetectingTremor,
            (DetectingClear | DetectingTremor, Reading(false)) => DetectingClear,

            (_, CapabilityUnavailable) => NotDetecting,

            // Default: stay in current state
            _ => self,
        }
    }
}

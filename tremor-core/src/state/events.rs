//! Events that trigger UI state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiEvent {
    /// User pressed start
    Start,
    /// User pressed stop
    Stop,
    /// Detector published a reading with the given detection flag
    Reading(bool),
    /// Start was refused because the sensor is missing
    CapabilityUnavailable,
}

impl UiEvent {
    /// Check if this event comes from the detector
    pub fn is_detector_event(&self) -> bool {
        matches!(self, UiEvent::Reading(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detector_events() {
        assert!(UiEvent::Reading(false).is_detector_event());
        assert!(UiEvent::Reading(true).is_detector_event());
        assert!(!UiEvent::Start.is_detector_event());
        assert!(!UiEvent::CapabilityUnavailable.is_detector_event());
    }
}

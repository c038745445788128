//! Detector configuration
//!
//! Defaults are tuned for a wrist-worn sensor sampled at 20 Hz.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default magnitude threshold (g)
pub const DEFAULT_THRESHOLD_G: f32 = 0.1;

/// Default duration gate (ms)
pub const DEFAULT_GATE_MS: u32 = 1000;

/// Default sampling interval requested from the sensor (ms, 20 Hz)
pub const DEFAULT_INTERVAL_MS: u32 = 50;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Threshold is not a finite positive number
    InvalidThreshold,
    /// Duration gate of zero would turn the debounce off
    InvalidGate,
    /// Sampling interval must be non-zero
    InvalidInterval,
}

/// Tremor detector configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetectorConfig {
    /// Delta magnitude that counts as shaking (g, strictly greater than)
    pub threshold_g: f32,
    /// Minimum streak length before the flag is raised (ms, strictly greater than)
    pub gate_ms: u32,
    /// Nominal interval between samples requested from the source (ms)
    pub interval_ms: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold_g: DEFAULT_THRESHOLD_G,
            gate_ms: DEFAULT_GATE_MS,
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

impl DetectorConfig {
    /// Create a config with explicit values
    pub const fn new(threshold_g: f32, gate_ms: u32, interval_ms: u32) -> Self {
        Self {
            threshold_g,
            gate_ms,
            interval_ms,
        }
    }

    /// Check that the values describe a usable detector
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.threshold_g.is_finite() || self.threshold_g <= 0.0 {
            return Err(ConfigError::InvalidThreshold);
        }

        if self.gate_ms == 0 {
            return Err(ConfigError::InvalidGate);
        }

        if self.interval_ms == 0 {
            return Err(ConfigError::InvalidInterval);
        }

        Ok(())
    }

    /// Nominal sample rate in Hz implied by the interval
    pub fn sample_rate_hz(&self) -> u32 {
        1000 / self.interval_ms.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DetectorConfig::default();
        assert_eq!(config.threshold_g, 0.1);
        assert_eq!(config.gate_ms, 1000);
        assert_eq!(config.interval_ms, 50);
        assert_eq!(config.sample_rate_hz(), 20);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_bad_threshold() {
        for threshold in [0.0, -0.1, f32::NAN, f32::INFINITY] {
            let config = DetectorConfig::new(threshold, 1000, 50);
            assert_eq!(config.validate(), Err(ConfigError::InvalidThreshold));
        }
    }

    #[test]
    fn test_rejects_zero_gate_and_interval() {
        assert_eq!(
            DetectorConfig::new(0.1, 0, 50).validate(),
            Err(ConfigError::InvalidGate)
        );
        assert_eq!(
            DetectorConfig::new(0.1, 1000, 0).validate(),
            Err(ConfigError::InvalidInterval)
        );
    }
}

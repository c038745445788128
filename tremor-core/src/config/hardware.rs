//! Hardware configuration types
//!
//! These types define the board-level configuration for the accelerometer,
//! the OLED and the start/stop button.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::DetectorConfig;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create an inverted (active-low) pin with pull-up, the usual button wiring
    pub const fn active_low(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: true,
        }
    }
}

/// Accelerometer hardware configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AccelHwConfig {
    /// 7-bit I2C address (0x6A or 0x6B for LSM6DSOX)
    pub address: u8,
    /// Full-scale range in g (2, 4, 8 or 16)
    pub full_scale_g: u8,
    /// I2C SDA pin
    pub sda_pin: u8,
    /// I2C SCL pin
    pub scl_pin: u8,
}

impl Default for AccelHwConfig {
    fn default() -> Self {
        Self {
            address: 0x6A,
            full_scale_g: 2,
            sda_pin: 4,
            scl_pin: 5,
        }
    }
}

/// OLED display hardware configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayHwConfig {
    /// 7-bit I2C address (typically 0x3C)
    pub address: u8,
    /// I2C SDA pin
    pub sda_pin: u8,
    /// I2C SCL pin
    pub scl_pin: u8,
    /// Contrast (0-255)
    pub contrast: u8,
}

impl Default for DisplayHwConfig {
    fn default() -> Self {
        Self {
            address: 0x3C,
            sda_pin: 6,
            scl_pin: 7,
            contrast: 0xCF,
        }
    }
}

/// Start/stop button configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonHwConfig {
    /// Button input pin
    pub pin: PinConfig,
    /// Debounce time in milliseconds
    pub debounce_ms: u32,
}

impl Default for ButtonHwConfig {
    fn default() -> Self {
        Self {
            pin: PinConfig::active_low(15),
            debounce_ms: 40,
        }
    }
}

/// Complete watch configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WatchConfig {
    /// Detector tuning
    pub detector: DetectorConfig,
    /// Accelerometer wiring and range
    pub accelerometer: AccelHwConfig,
    /// OLED wiring
    pub display: DisplayHwConfig,
    /// Start/stop button wiring
    pub button: ButtonHwConfig,
}

impl WatchConfig {
    /// Create a config with all defaults
    pub fn new() -> Self {
        Self::default()
    }
}

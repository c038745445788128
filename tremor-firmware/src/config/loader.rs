//! Boot-time configuration loading
//!
//! Parses the embedded TOML and validates the detector tuning. Any failure
//! is logged and the defaults are used instead, so the watch always boots.

use defmt::*;

use tremor_core::config::{DetectorConfig, WatchConfig};

use super::toml::parse_config;

/// Load the watch configuration from the embedded TOML text
pub fn load_config(input: &str) -> WatchConfig {
    let mut config = match parse_config(input) {
        Ok(config) => {
            info!("Parsed embedded configuration");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using default configuration");
            return WatchConfig::default();
        }
    };

    if let Err(e) = config.detector.validate() {
        error!("Invalid detector config: {:?}, using defaults", e);
        config.detector = DetectorConfig::default();
    }

    info!(
        "Detector: threshold={}g gate={}ms interval={}ms ({} Hz)",
        config.detector.threshold_g,
        config.detector.gate_ms,
        config.detector.interval_ms,
        config.detector.sample_rate_hz()
    );

    config
}

//! Simple TOML parser for the watch configuration
//!
//! Handles only the subset `wearable.toml` uses. It does NOT support the
//! full TOML spec.
//!
//! Supported features:
//! - `[section]` headers for `detector`, `accelerometer`, `display`, `button`
//! - Key = value pairs (string, integer, hex integer, float)
//! - Comments (# ...), including trailing comments
//!
//! Keys that are not present keep their default value.

use tremor_core::config::{PinConfig, WatchConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value could not be parsed for its key
    InvalidValue,
    /// Key not recognised in its section
    UnknownKey,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Detector,
    Accelerometer,
    Display,
    Button,
}

/// Parse TOML configuration into a [`WatchConfig`]
pub fn parse_config(input: &str) -> Result<WatchConfig, ParseError> {
    let mut config = WatchConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        apply_value(&mut config, section, key, value)?;
    }

    Ok(config)
}

/// Parse a header line like "[detector]"
fn parse_section_header(line: &str) -> Result<Section, ParseError> {
    let line = strip_comment(line);
    let name = line
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or(ParseError::InvalidSection)?
        .trim();

    match name {
        "detector" => Ok(Section::Detector),
        "accelerometer" => Ok(Section::Accelerometer),
        "display" => Ok(Section::Display),
        "button" => Ok(Section::Button),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Remove a trailing comment unless the `#` sits inside a string
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(hash_pos) if line[..hash_pos].matches('"').count() % 2 == 0 => {
            line[..hash_pos].trim()
        }
        _ => line,
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(line[eq_pos + 1..].trim());

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(value)
}

/// Parse an integer value, decimal or `0x` hex
fn parse_int<T: TryFrom<u32>>(value: &str) -> Result<T, ParseError> {
    let raw = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse::<u32>(),
    }
    .map_err(|_| ParseError::InvalidValue)?;

    T::try_from(raw).map_err(|_| ParseError::InvalidValue)
}

/// Parse a float value
fn parse_float(value: &str) -> Result<f32, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a pin string like "gpio4", "!gpio15", "^!gpio15"
fn parse_pin(value: &str) -> Result<PinConfig, ParseError> {
    let mut s = parse_string(value);
    let mut pin = PinConfig::default();

    // Check for modifiers
    loop {
        if let Some(rest) = s.strip_prefix('!') {
            pin.inverted = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('^') {
            pin.pull_up = true;
            s = rest;
        } else {
            break;
        }
    }

    let number = s.strip_prefix("gpio").ok_or(ParseError::InvalidValue)?;
    pin.pin = number.parse().map_err(|_| ParseError::InvalidValue)?;

    // RP2040 has GPIO0-29
    if pin.pin > 29 {
        return Err(ParseError::InvalidValue);
    }

    Ok(pin)
}

/// Apply a parsed value to the appropriate config field
fn apply_value(
    config: &mut WatchConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Detector, "threshold_g") => config.detector.threshold_g = parse_float(value)?,
        (Section::Detector, "gate_ms") => config.detector.gate_ms = parse_int(value)?,
        (Section::Detector, "interval_ms") => config.detector.interval_ms = parse_int(value)?,

        (Section::Accelerometer, "address") => config.accelerometer.address = parse_int(value)?,
        (Section::Accelerometer, "full_scale_g") => {
            config.accelerometer.full_scale_g = parse_int(value)?
        }
        (Section::Accelerometer, "sda") => config.accelerometer.sda_pin = parse_pin(value)?.pin,
        (Section::Accelerometer, "scl") => config.accelerometer.scl_pin = parse_pin(value)?.pin,

        (Section::Display, "address") => config.display.address = parse_int(value)?,
        (Section::Display, "sda") => config.display.sda_pin = parse_pin(value)?.pin,
        (Section::Display, "scl") => config.display.scl_pin = parse_pin(value)?.pin,
        (Section::Display, "contrast") => config.display.contrast = parse_int(value)?,

        (Section::Button, "pin") => config.button.pin = parse_pin(value)?,
        (Section::Button, "debounce_ms") => config.button.debounce_ms = parse_int(value)?,

        _ => return Err(ParseError::UnknownKey),
    }

    Ok(())
}

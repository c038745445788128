//! Build script for tremor-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates wearable.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate wearable.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=wearable.toml");

    let config_path = Path::new("wearable.toml");

    if !config_path.exists() {
        fail(
            "wearable.toml not found",
            &["The firmware embeds wearable.toml from the crate directory.".to_string()],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read wearable.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in wearable.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_detector(&config, &mut errors);
    validate_accelerometer(&config, &mut errors);
    validate_display(&config, &mut errors);
    validate_button(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid configuration in wearable.toml", &errors);
    }

    println!("cargo:warning=wearable.toml validated successfully");
}

/// Abort the build with a boxed error message
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<57}║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        lines
            .iter()
            .map(|line| {
                let truncated = if line.len() > 62 {
                    format!("{}...", &line[..59])
                } else {
                    line.clone()
                };
                format!("║  • {:<62}║", truncated)
            })
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Only the sections the firmware parser understands are allowed
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        return;
    };

    for (name, value) in table {
        match name.as_str() {
            "detector" | "accelerometer" | "display" | "button" => {
                if !value.is_table() {
                    errors.push(format!("[{}] must be a table", name));
                }
            }
            _ => errors.push(format!("unknown section or key '{}'", name)),
        }
    }
}

/// Check that every key of a section is known
fn check_keys(config: &toml::Value, section: &str, known: &[&str], errors: &mut Vec<String>) {
    if let Some(table) = config.get(section).and_then(|s| s.as_table()) {
        for key in table.keys() {
            if !known.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", section, key));
            }
        }
    }
}

/// Check an optional integer key against an inclusive range
fn check_int(
    config: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match config.get(section).and_then(|s| s.get(key)) {
        None => {}
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => {}
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max))
        }
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
    }
}

/// Check an optional pin key like "gpio4" or "^!gpio15"
fn check_pin(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) {
    let Some(value) = config.get(section).and_then(|s| s.get(key)) else {
        return;
    };

    let valid = value
        .as_str()
        .map(|s| s.trim_start_matches(['!', '^']))
        .and_then(|s| s.strip_prefix("gpio"))
        .and_then(|n| n.parse::<u8>().ok())
        .is_some_and(|n| n <= 29);

    if !valid {
        errors.push(format!(
            "[{}] {} must be a pin like \"gpio4\" (gpio0-gpio29)",
            section, key
        ));
    }
}

fn validate_detector(config: &toml::Value, errors: &mut Vec<String>) {
    check_keys(
        config,
        "detector",
        &["threshold_g", "gate_ms", "interval_ms"],
        errors,
    );

    match config.get("detector").and_then(|d| d.get("threshold_g")) {
        None => {}
        Some(toml::Value::Float(v)) if v.is_finite() && *v > 0.0 => {}
        Some(_) => errors.push("[detector] threshold_g must be a positive float".to_string()),
    }

    check_int(config, "detector", "gate_ms", 1, 60_000, errors);
    // The accelerometer cannot sample faster than every 2 ms
    check_int(config, "detector", "interval_ms", 2, 10_000, errors);
}

fn validate_accelerometer(config: &toml::Value, errors: &mut Vec<String>) {
    check_keys(
        config,
        "accelerometer",
        &["address", "full_scale_g", "sda", "scl"],
        errors,
    );
    check_int(config, "accelerometer", "address", 0x08, 0x77, errors);
    check_pin(config, "accelerometer", "sda", errors);
    check_pin(config, "accelerometer", "scl", errors);

    if let Some(v) = config
        .get("accelerometer")
        .and_then(|a| a.get("full_scale_g"))
    {
        if !matches!(v.as_integer(), Some(2 | 4 | 8 | 16)) {
            errors.push("[accelerometer] full_scale_g must be 2, 4, 8 or 16".to_string());
        }
    }
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    check_keys(config, "display", &["address", "sda", "scl", "contrast"], errors);
    check_int(config, "display", "address", 0x08, 0x77, errors);
    check_int(config, "display", "contrast", 0, 255, errors);
    check_pin(config, "display", "sda", errors);
    check_pin(config, "display", "scl", errors);
}

fn validate_button(config: &toml::Value, errors: &mut Vec<String>) {
    check_keys(config, "button", &["pin", "debounce_ms"], errors);
    check_pin(config, "button", "pin", errors);
    check_int(config, "button", "debounce_ms", 1, 1000, errors);
}

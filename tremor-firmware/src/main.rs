//! Tremor Watch - wrist-worn tremor detector firmware
//!
//! Samples an LSM6DSOX accelerometer at about 20 Hz, flags shaking that
//! lasts longer than a second and shows the result on a 128x64 OLED. A
//! single button starts and stops detection.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C1;
use embassy_time::Timer;
use portable_atomic::Ordering;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use tremor_core::config::WatchConfig;
use tremor_core::DetectionSession;
use tremor_drivers::accel::{FullScale, Lsm6dsox};

use crate::channels::DETECTING;
use crate::display::{FrameBuffer, Sh1106};

/// Embedded configuration (compiled into firmware)
/// Edit wearable.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../wearable.toml");

/// OLED I2C clock
const DISPLAY_I2C_HZ: u32 = 400_000;

mod channels;
mod config;
mod display;
mod tasks;

bind_interrupts!(struct Irqs {
    I2C1_IRQ => i2c::InterruptHandler<I2C1>;
});

// Frame buffer lives outside the display task future
static FRAME: StaticCell<FrameBuffer> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Tremor Watch firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load_config(EMBEDDED_CONFIG);
    check_pins(&config);

    // Accelerometer on I2C0 (SDA=GPIO4, SCL=GPIO5)
    let accel_i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c::Config::default());
    let mut accel = Lsm6dsox::new(accel_i2c, config.accelerometer.address);
    match FullScale::from_g(config.accelerometer.full_scale_g) {
        Some(range) => accel.set_full_scale(range),
        None => warn!(
            "Unsupported full scale {}g, using +/-2g",
            config.accelerometer.full_scale_g
        ),
    }
    let session = DetectionSession::new(accel, config.detector);

    // OLED on I2C1 (SDA=GPIO6, SCL=GPIO7)
    let mut display_i2c_config = i2c::Config::default();
    display_i2c_config.frequency = DISPLAY_I2C_HZ;
    let display_i2c = I2c::new_async(p.I2C1, p.PIN_7, p.PIN_6, Irqs, display_i2c_config);
    let panel = Sh1106::new(display_i2c, config.display.address);
    let frame = FRAME.init(FrameBuffer::new());

    // Start/stop button (GPIO15)
    let pull = if config.button.pin.pull_up {
        Pull::Up
    } else {
        Pull::None
    };
    let button = Input::new(p.PIN_15, pull);

    // Onboard LED mirrors the detection state
    let mut led = Output::new(p.PIN_25, Level::Low);

    spawner
        .spawn(tasks::display_task(panel, frame, config.display.contrast))
        .unwrap();
    spawner.spawn(tasks::button_task(button, config.button)).unwrap();
    spawner.spawn(tasks::detector_task(session)).unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        Timer::after_millis(250).await;
        let detecting = DETECTING.load(Ordering::Relaxed);
        led.set_level(Level::from(detecting));
    }
}

/// Warn about pin settings that differ from the wiring this build uses
///
/// Peripherals are bound to fixed pins at compile time.
fn check_pins(config: &WatchConfig) {
    let wired = [
        ("accelerometer.sda", config.accelerometer.sda_pin, 4),
        ("accelerometer.scl", config.accelerometer.scl_pin, 5),
        ("display.sda", config.display.sda_pin, 6),
        ("display.scl", config.display.scl_pin, 7),
        ("button.pin", config.button.pin.pin, 15),
    ];

    for (name, configured, actual) in wired {
        if configured != actual {
            warn!(
                "{} = gpio{} ignored, board uses gpio{}",
                name, configured, actual
            );
        }
    }
}

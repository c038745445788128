//! Start/stop button task
//!
//! Waits for an edge, confirms the level after the debounce time and sends
//! one [`ButtonPress`] per press. Holding the button does not repeat.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Timer};

use tremor_core::config::ButtonHwConfig;

use crate::channels::{ButtonPress, BUTTON_CHANNEL};

fn is_pressed(pin: &Input<'static>, active_low: bool) -> bool {
    if active_low {
        pin.is_low()
    } else {
        pin.is_high()
    }
}

async fn wait_for_press(pin: &mut Input<'static>, active_low: bool) {
    if active_low {
        pin.wait_for_falling_edge().await
    } else {
        pin.wait_for_rising_edge().await
    }
}

async fn wait_for_release(pin: &mut Input<'static>, active_low: bool) {
    if active_low {
        pin.wait_for_high().await
    } else {
        pin.wait_for_low().await
    }
}

/// Button task
#[embassy_executor::task]
pub async fn button_task(mut pin: Input<'static>, config: ButtonHwConfig) {
    info!("Button task started");

    let active_low = config.pin.inverted;
    let debounce = Duration::from_millis(u64::from(config.debounce_ms));

    loop {
        wait_for_press(&mut pin, active_low).await;
        Timer::after(debounce).await;

        if !is_pressed(&pin, active_low) {
            trace!("Button bounce ignored");
            continue;
        }

        debug!("Button pressed");
        if BUTTON_CHANNEL.try_send(ButtonPress).is_err() {
            warn!("Button queue full, press dropped");
        }

        wait_for_release(&mut pin, active_low).await;
        Timer::after(debounce).await;
    }
}

//! Detector task
//!
//! Sole owner of the [`DetectionSession`]. Button presses and sample ticks
//! are handled on this one task, so start, stop and sample processing never
//! overlap. Readings and state changes go to the display task.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Instant, Ticker};
use portable_atomic::Ordering;

use tremor_core::detector::TremorReading;
use tremor_core::state::{UiEvent, UiState};
use tremor_core::traits::ReadingSink;
use tremor_core::{Delivery, DetectionSession, SessionError};
use tremor_drivers::accel::Lsm6dsox;

use crate::channels::{DisplayUpdate, BUTTON_CHANNEL, DETECTING, DISPLAY_UPDATE};

/// Accelerometer on the blocking I2C0 bus
pub type Accelerometer = Lsm6dsox<I2c<'static, I2C0, Blocking>>;

/// Tracks the screen state and forwards it with every reading
struct Presenter {
    state: UiState,
}

impl Presenter {
    fn apply(&mut self, event: UiEvent, reading: TremorReading) {
        let next = self.state.transition(event);
        // Readings arrive at the sample rate, only log when they change something
        if next != self.state || !event.is_detector_event() {
            debug!("UI: {:?} + {:?} -> {:?}", self.state, event, next);
        }
        self.state = next;
        DISPLAY_UPDATE.signal(DisplayUpdate {
            state: self.state,
            reading,
        });
    }
}

impl ReadingSink for Presenter {
    fn publish(&mut self, reading: TremorReading) {
        self.apply(UiEvent::Reading(reading.detected), reading);
    }
}

/// Handle a start/stop press
fn toggle(session: &mut DetectionSession<Accelerometer>, presenter: &mut Presenter) {
    match presenter.state.toggle_event() {
        UiEvent::Start => match session.start() {
            Ok(()) => {
                info!("Detection started");
                presenter.apply(UiEvent::Start, session.reading());
            }
            Err(SessionError::CapabilityUnavailable) => {
                warn!("Accelerometer not available, detection not started");
                presenter.apply(UiEvent::CapabilityUnavailable, session.reading());
            }
            Err(SessionError::Sensor(e)) => {
                warn!("Failed to start accelerometer: {:?}", e);
                presenter.apply(UiEvent::CapabilityUnavailable, session.reading());
            }
        },
        _ => {
            session.stop();
            info!("Detection stopped");
            // Idle screen
            presenter.apply(UiEvent::Stop, session.reading());
        }
    }

    DETECTING.store(session.is_active(), Ordering::Relaxed);
}

/// Detector task
#[embassy_executor::task]
pub async fn detector_task(mut session: DetectionSession<Accelerometer>) {
    info!("Detector task started");

    let interval_ms = session.detector().config().interval_ms;
    let mut ticker = Ticker::every(Duration::from_millis(u64::from(interval_ms)));
    let mut presenter = Presenter {
        state: UiState::default(),
    };

    // Idle screen
    presenter.apply(UiEvent::Stop, session.reading());

    loop {
        if !session.is_active() {
            // Nothing to sample, sleep until the button is pressed
            BUTTON_CHANNEL.receive().await;
            toggle(&mut session, &mut presenter);
            ticker.reset();
            continue;
        }

        match select(BUTTON_CHANNEL.receive(), ticker.next()).await {
            Either::First(_) => toggle(&mut session, &mut presenter),
            Either::Second(()) => {
                let now_ms = Instant::now().as_millis();
                match session.poll(now_ms, &mut presenter) {
                    Delivery::Published(reading) => {
                        trace!("level={} detected={}", reading.level, reading.detected);
                    }
                    Delivery::Skipped(e) => {
                        warn!("Sample skipped: {:?}", e);
                    }
                    Delivery::Ignored => {}
                }
            }
        }
    }
}

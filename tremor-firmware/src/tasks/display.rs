//! Display task
//!
//! Renders the tremor screen whenever the detector task publishes an
//! update. Frames are only sent to the panel when the text changed.

use defmt::*;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C1;

use tremor_core::detector::TremorReading;
use tremor_core::state::UiState;
use tremor_display::{render_screen, DisplayError, TremorView};

use crate::channels::DISPLAY_UPDATE;
use crate::display::{FrameBuffer, Sh1106};

/// OLED on the async I2C1 bus
pub type Panel = Sh1106<I2c<'static, I2C1, Async>>;

/// Display task
#[embassy_executor::task]
pub async fn display_task(mut panel: Panel, frame: &'static mut FrameBuffer, contrast: u8) {
    info!("Display task started");

    match panel.init(contrast).await {
        Ok(()) => {
            frame.set_ready(true);
            info!("OLED initialized");
        }
        Err(e) => error!("Failed to initialize display: {:?}", e),
    }

    let mut view = TremorView::new();
    view.render(UiState::default(), TremorReading::default());

    loop {
        match render_screen(frame, view.screen_mut()) {
            Ok(_) => {}
            // Panel missing, keep draining updates
            Err(DisplayError::NotInitialized) => {}
            Err(e) => warn!("Render failed: {:?}", e),
        }

        if frame.take_pending() {
            if let Err(e) = panel.write_frame(frame).await {
                warn!("Display write failed: {:?}", e);
                view.screen_mut().mark_dirty();
            }
        }

        let update = DISPLAY_UPDATE.wait().await;
        view.render(update.state, update.reading);
    }
}

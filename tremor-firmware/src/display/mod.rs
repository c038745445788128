//! OLED output
//!
//! The tremor screen is laid out by `tremor_display::TremorView`, rasterized
//! into a [`FrameBuffer`] and pushed to the SH1106 panel over async I2C.

pub mod framebuffer;
pub mod sh1106;

pub use framebuffer::FrameBuffer;
pub use sh1106::Sh1106;

//! Tremor screen layout
//!
//! The watch shows a single screen:
//!
//! ```text
//! row 0   Tremor Detection
//! row 2   No Tremor Detected | Tremor Detected
//! row 4   Level: 0.0000
//! row 7   [Start Detection] | [Stop Detection]
//! ```
//!
//! Row 7 is drawn inverted and acts as the label for the hardware button.

use core::fmt::Write;

use heapless::String;
use tremor_core::detector::TremorReading;
use tremor_core::state::UiState;

use crate::screen::{Screen, SCREEN_COLS};

const TITLE_ROW: usize = 0;
const STATUS_ROW: usize = 2;
const LEVEL_ROW: usize = 4;
const ACTION_ROW: usize = 7;

/// Formatted level capacity
pub const LEVEL_LEN: usize = 12;

/// Format a tremor level with four decimal digits
pub fn format_level(level: f32) -> String<LEVEL_LEN> {
    let mut s = String::new();
    // Only fails on overflow, which leaves a truncated string
    let _ = write!(s, "{:.4}", level);
    s
}

fn status_label(state: UiState) -> &'static str {
    if state.shows_tremor() {
        "Tremor Detected"
    } else {
        "No Tremor Detected"
    }
}

fn action_label(state: UiState) -> &'static str {
    if state.is_detecting() {
        "Stop Detection"
    } else {
        "Start Detection"
    }
}

/// Left padding that centers `len` characters on a row
fn center_pad(len: usize) -> usize {
    SCREEN_COLS.saturating_sub(len) / 2
}

fn centered(text: &str) -> String<SCREEN_COLS> {
    let mut line = String::new();
    for _ in 0..center_pad(text.len()) {
        let _ = line.push(' ');
    }
    let _ = line.push_str(text);
    line
}

/// Renders the tremor screen
pub struct TremorView {
    screen: Screen,
}

impl Default for TremorView {
    fn default() -> Self {
        Self::new()
    }
}

impl TremorView {
    /// Create a view with an empty screen
    pub fn new() -> Self {
        Self {
            screen: Screen::new(),
        }
    }

    /// Lay out the screen for a state and the latest reading
    ///
    /// The level row always shows `reading.level`, including while stopped,
    /// so the last measured value stays visible.
    pub fn render(&mut self, state: UiState, reading: TremorReading) {
        self.screen.set_line(TITLE_ROW, &centered("Tremor Detection"));
        self.screen.set_line(STATUS_ROW, &centered(status_label(state)));

        let mut level: String<SCREEN_COLS> = String::new();
        let _ = level.push_str("Level: ");
        let _ = level.push_str(&format_level(reading.level));
        self.screen.set_line(LEVEL_ROW, &centered(&level));

        let action = action_label(state);
        self.screen.set_line(ACTION_ROW, &centered(action));

        // One column of margin either side of the label
        let start = center_pad(action.len()).saturating_sub(1);
        let end = (center_pad(action.len()) + action.len() + 1).min(SCREEN_COLS);
        self.screen.set_highlight(ACTION_ROW, start as u8, end as u8);
    }

    /// Get the screen buffer
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Get the screen buffer for rendering
    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }
}

//! Screen buffer types
//!
//! Character buffer sized for a 128x64 OLED with a 6x8 font.

use heapless::String;

/// Number of character rows
pub const SCREEN_ROWS: usize = 8;

/// Number of character columns
pub const SCREEN_COLS: usize = 21;

/// Maximum characters per line
pub const LINE_LEN: usize = SCREEN_COLS;

/// Screen buffer for text-mode displays
///
/// Writes that leave a row unchanged do not mark the screen dirty, so a
/// view can be re-rendered on every reading without forcing a redraw.
#[derive(Clone)]
pub struct Screen {
    /// Current display content
    lines: [String<LINE_LEN>; SCREEN_ROWS],
    /// Highlight state per row (start_col, end_col)
    highlights: [Option<(u8, u8)>; SCREEN_ROWS],
    /// Whether the screen needs to be redrawn
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new empty screen
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            highlights: [None; SCREEN_ROWS],
            dirty: true,
        }
    }

    /// Clear the entire screen
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        for highlight in &mut self.highlights {
            *highlight = None;
        }
        self.dirty = true;
    }

    /// Set the content of a specific row, truncated to the row width
    pub fn set_line(&mut self, row: usize, text: &str) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };

        let end = text
            .char_indices()
            .nth(LINE_LEN)
            .map_or(text.len(), |(i, _)| i);
        let text = &text[..end];

        if line.as_str() != text {
            line.clear();
            let _ = line.push_str(text);
            self.dirty = true;
        }
    }

    /// Get the content of a specific row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Set highlight (invert) region for a row
    pub fn set_highlight(&mut self, row: usize, start_col: u8, end_col: u8) {
        self.update_highlight(row, Some((start_col, end_col)));
    }

    fn update_highlight(&mut self, row: usize, value: Option<(u8, u8)>) {
        if let Some(highlight) = self.highlights.get_mut(row) {
            if *highlight != value {
                *highlight = value;
                self.dirty = true;
            }
        }
    }

    /// Get highlight region for a row
    pub fn get_highlight(&self, row: usize) -> Option<(u8, u8)> {
        self.highlights.get(row).copied().flatten()
    }

    /// Check if screen needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark screen as clean (after rendering)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Mark screen as dirty (needs redraw)
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Get all lines as an iterator
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_screen_is_dirty_and_blank() {
        let screen = Screen::new();
        assert!(screen.is_dirty());
        assert!(screen.lines().all(str::is_empty));
    }

    #[test]
    fn test_set_line_truncates() {
        let mut screen = Screen::new();
        screen.set_line(1, "0123456789012345678901234");
        assert_eq!(screen.get_line(1), Some("012345678901234567890"));
    }

    #[test]
    fn test_out_of_range_row_is_ignored() {
        let mut screen = Screen::new();
        screen.mark_clean();
        screen.set_line(SCREEN_ROWS, "nope");
        screen.set_highlight(SCREEN_ROWS, 0, 3);
        assert!(!screen.is_dirty());
        assert_eq!(screen.get_line(SCREEN_ROWS), None);
    }

    #[test]
    fn test_unchanged_write_stays_clean() {
        let mut screen = Screen::new();
        screen.set_line(0, "Level: 0.1000");
        screen.set_highlight(7, 0, 4);
        screen.mark_clean();

        screen.set_line(0, "Level: 0.1000");
        screen.set_highlight(7, 0, 4);
        assert!(!screen.is_dirty());

        screen.set_line(0, "Level: 0.2000");
        assert!(screen.is_dirty());
    }

    #[test]
    fn test_clear() {
        let mut screen = Screen::new();
        screen.set_line(3, "abc");
        screen.mark_clean();
        screen.clear();
        assert_eq!(screen.get_line(3), Some(""));
        assert!(screen.is_dirty());
    }
}

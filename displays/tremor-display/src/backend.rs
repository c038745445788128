//! Display backend trait
//!
//! Defines the interface between the screen buffer and the panel driver.

use crate::screen::Screen;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
}

/// Display backend trait
///
/// Implementations draw into their own frame buffer and only touch the
/// panel on [`flush`](DisplayBackend::flush).
pub trait DisplayBackend {
    /// Clear the entire display
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text at the specified row and column
    ///
    /// - `row`: Row number (0-based)
    /// - `col`: Column number in characters (0-based)
    /// - `text`: Text to display
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Invert a region on the specified row
    ///
    /// - `row`: Row number
    /// - `start_col`: Starting column
    /// - `end_col`: Ending column (exclusive)
    fn invert_region(&mut self, row: u8, start_col: u8, end_col: u8) -> Result<(), DisplayError>;

    /// Send buffered content to the panel
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Display size as (columns, rows) in character units
    fn dimensions(&self) -> (u8, u8);

    /// Check if the display is ready
    fn is_ready(&self) -> bool;
}

/// Push a screen to a backend if it changed
///
/// Returns `Ok(false)` when the screen was clean and nothing was drawn.
/// The screen is only marked clean once the flush succeeds.
pub fn render_screen<B: DisplayBackend + ?Sized>(
    backend: &mut B,
    screen: &mut Screen,
) -> Result<bool, DisplayError> {
    if !screen.is_dirty() {
        return Ok(false);
    }
    if !backend.is_ready() {
        return Err(DisplayError::NotInitialized);
    }

    let (_, rows) = backend.dimensions();
    backend.clear()?;
    for (row, line) in screen.lines().enumerate().take(rows as usize) {
        if !line.is_empty() {
            backend.draw_text(row as u8, 0, line)?;
        }
        if let Some((start, end)) = screen.get_highlight(row) {
            backend.invert_region(row as u8, start, end)?;
        }
    }
    backend.flush()?;

    screen.mark_clean();
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::{String, Vec};

    #[derive(Debug, PartialEq)]
    enum Call {
        Clear,
        Text(u8, String<24>),
        Invert(u8, u8, u8),
        Flush,
    }

    // Records every backend call
    struct RecordingBackend {
        calls: Vec<Call, 32>,
        ready: bool,
        fail_flush: bool,
    }

    impl RecordingBackend {
        fn new() -> Self {
            Self {
                calls: Vec::new(),
                ready: true,
                fail_flush: false,
            }
        }
    }

    impl DisplayBackend for RecordingBackend {
        fn clear(&mut self) -> Result<(), DisplayError> {
            let _ = self.calls.push(Call::Clear);
            Ok(())
        }

        fn draw_text(&mut self, row: u8, _col: u8, text: &str) -> Result<(), DisplayError> {
            let mut s = String::new();
            let _ = s.push_str(text);
            let _ = self.calls.push(Call::Text(row, s));
            Ok(())
        }

        fn invert_region(&mut self, row: u8, start: u8, end: u8) -> Result<(), DisplayError> {
            let _ = self.calls.push(Call::Invert(row, start, end));
            Ok(())
        }

        fn flush(&mut self) -> Result<(), DisplayError> {
            if self.fail_flush {
                return Err(DisplayError::Communication);
            }
            let _ = self.calls.push(Call::Flush);
            Ok(())
        }

        fn dimensions(&self) -> (u8, u8) {
            (21, 8)
        }

        fn is_ready(&self) -> bool {
            self.ready
        }
    }

    #[test]
    fn test_render_dirty_screen() {
        let mut backend = RecordingBackend::new();
        let mut screen = Screen::new();
        screen.set_line(0, "Hello");
        screen.set_highlight(7, 0, 5);

        assert_eq!(render_screen(&mut backend, &mut screen), Ok(true));
        assert!(!screen.is_dirty());

        assert_eq!(backend.calls.len(), 4);
        assert_eq!(backend.calls[0], Call::Clear);
        assert!(matches!(&backend.calls[1], Call::Text(0, s) if s.as_str() == "Hello"));
        assert_eq!(backend.calls[2], Call::Invert(7, 0, 5));
        assert_eq!(backend.calls[3], Call::Flush);
    }

    #[test]
    fn test_clean_screen_is_skipped() {
        let mut backend = RecordingBackend::new();
        let mut screen = Screen::new();
        screen.mark_clean();

        assert_eq!(render_screen(&mut backend, &mut screen), Ok(false));
        assert!(backend.calls.is_empty());
    }

    #[test]
    fn test_failed_flush_keeps_screen_dirty() {
        let mut backend = RecordingBackend::new();
        backend.fail_flush = true;
        let mut screen = Screen::new();
        screen.set_line(2, "x");

        assert_eq!(
            render_screen(&mut backend, &mut screen),
            Err(DisplayError::Communication)
        );
        assert!(screen.is_dirty());
    }

    #[test]
    fn test_backend_not_ready() {
        let mut backend = RecordingBackend::new();
        backend.ready = false;
        let mut screen = Screen::new();

        assert_eq!(
            render_screen(&mut backend, &mut screen),
            Err(DisplayError::NotInitialized)
        );
    }
}

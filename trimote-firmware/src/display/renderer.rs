//! Screen buffer
//!
//! The controller renders into [`SCREEN_BUFFER`] synchronously; the display
//! TX task copies it out and sends it when [`SCREEN_UPDATE`] fires.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::String;

use trimote_core::traits::DisplaySink;
use trimote_core::view::DisplayView;
use trimote_protocol::{DISPLAY_COLS, DISPLAY_ROWS};

use crate::channels::SCREEN_UPDATE;

/// One display row
pub type Line = String<{ DISPLAY_COLS as usize }>;

/// Shared screen buffer
pub static SCREEN_BUFFER: Mutex<CriticalSectionRawMutex, RefCell<Screen>> =
    Mutex::new(RefCell::new(Screen::new()));

/// Full-screen text buffer, one string per row
#[derive(Clone)]
pub struct Screen {
    lines: [Line; DISPLAY_ROWS as usize],
}

impl Screen {
    /// Create a new empty screen
    pub const fn new() -> Self {
        Self {
            lines: [
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
            ],
        }
    }

    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
    }

    /// Write text into a row starting at `col`
    ///
    /// The row is space-padded up to `col`; anything already past `col` is
    /// replaced. Text is cut at the row width.
    pub fn put(&mut self, row: u8, col: u8, text: &str) {
        let Some(line) = self.lines.get_mut(row as usize) else {
            return;
        };
        let col = (col as usize).min(DISPLAY_COLS as usize);

        line.truncate(col);
        while line.len() < col {
            let _ = line.push(' ');
        }
        for ch in text.chars() {
            if line.push(ch).is_err() {
                break;
            }
        }
    }

    /// Get a line of text
    pub fn line(&self, row: u8) -> &str {
        self.lines
            .get(row as usize)
            .map(|l| l.as_str())
            .unwrap_or("")
    }

    /// Lay out a controller view
    pub fn render_view(&mut self, view: &DisplayView<'_>) {
        self.clear();
        view.for_each_line(|row, col, text| self.put(row, col, text));
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

/// [`DisplaySink`] writing into [`SCREEN_BUFFER`]
pub struct ScreenSink;

impl DisplaySink for ScreenSink {
    fn render(&mut self, view: &DisplayView<'_>) {
        SCREEN_BUFFER.lock(|screen| screen.borrow_mut().render_view(view));
        SCREEN_UPDATE.signal(());
    }
}

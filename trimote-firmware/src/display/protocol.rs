//! Protocol helpers for display communication

use trimote_protocol::{DisplayMessage, Frame, FrameError, DISPLAY_ROWS};

use super::Screen;

/// Encode a screen to a series of frames
///
/// Returns frames for:
/// 1. Clear screen
/// 2. Text for each non-empty line
pub fn encode_screen(screen: &Screen) -> impl Iterator<Item = Frame> + '_ {
    ScreenEncoder {
        screen,
        cleared: false,
        row: 0,
    }
}

/// Iterator that encodes a screen into frames
struct ScreenEncoder<'a> {
    screen: &'a Screen,
    cleared: bool,
    row: u8,
}

impl Iterator for ScreenEncoder<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.cleared {
            self.cleared = true;
            return DisplayMessage::Clear.to_frame().ok();
        }

        while self.row < DISPLAY_ROWS {
            let row = self.row;
            self.row += 1;

            let line = self.screen.line(row);
            if !line.is_empty() {
                let msg = DisplayMessage::Text {
                    row,
                    col: 0,
                    text: line,
                };
                return msg.to_frame().ok();
            }
        }
        None
    }
}

/// Build a PONG response frame
pub fn pong_frame() -> Result<Frame, FrameError> {
    DisplayMessage::Pong.to_frame()
}

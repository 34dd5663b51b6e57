//! Messages for the text display terminal link
//!
//! The display is a dumb terminal: it renders text it is told to render and
//! sends periodic PINGs to check the controller is alive.
//!
//! - Controller → Display: clear, text, heartbeat responses
//! - Display → Controller: heartbeat requests, acknowledgements

use crate::frame::{Frame, FrameError};

// Message type IDs: Display → Controller
pub const MSG_PING: u8 = 0x02;
pub const MSG_ACK: u8 = 0x03;

// Message type IDs: Controller → Display
pub const MSG_CLEAR: u8 = 0x20;
pub const MSG_TEXT: u8 = 0x21;
pub const MSG_PONG: u8 = 0x24;

/// Display dimensions
pub const DISPLAY_ROWS: u8 = 8;
pub const DISPLAY_COLS: u8 = 21;

/// Messages from the controller to the display
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMessage<'a> {
    /// Clear the entire screen
    Clear,
    /// Draw text at a position, truncated to the row width
    Text { row: u8, col: u8, text: &'a str },
    /// Heartbeat response
    Pong,
}

impl DisplayMessage<'_> {
    /// Encode this message into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            DisplayMessage::Clear => Ok(Frame::empty(MSG_CLEAR)),
            DisplayMessage::Text { row, col, text } => {
                if *row >= DISPLAY_ROWS || *col >= DISPLAY_COLS {
                    return Err(FrameError::InvalidFrame);
                }
                // Payload: [row][col][len][chars...]
                let room = (DISPLAY_COLS - col) as usize;
                let bytes = &text.as_bytes()[..text.len().min(room)];
                let header = [*row, *col, bytes.len() as u8];
                Frame::from_parts(MSG_TEXT, &[header.as_slice(), bytes])
            }
            DisplayMessage::Pong => Ok(Frame::empty(MSG_PONG)),
        }
    }
}

/// Messages from the display to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayReply {
    /// Heartbeat request
    Ping,
    /// Acknowledgement of a received command
    Ack { seq: u8 },
}

impl DisplayReply {
    /// Parse a reply from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_PING => Ok(DisplayReply::Ping),
            MSG_ACK => frame
                .payload
                .first()
                .map(|&seq| DisplayReply::Ack { seq })
                .ok_or(FrameError::InvalidFrame),
            other => Err(FrameError::UnknownType(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_frame() {
        let frame = DisplayMessage::Clear.to_frame().unwrap();
        assert_eq!(frame.msg_type, MSG_CLEAR);
        assert!(frame.payload.is_empty());
    }

    #[test]
    fn test_text_frame() {
        let msg = DisplayMessage::Text {
            row: 4,
            col: 0,
            text: "q, Mot.1 Left",
        };
        let frame = msg.to_frame().unwrap();
        assert_eq!(frame.msg_type, MSG_TEXT);
        assert_eq!(&frame.payload[..3], &[4, 0, 13]);
        assert_eq!(&frame.payload[3..], b"q, Mot.1 Left");
    }

    #[test]
    fn test_text_truncated_at_row_end() {
        let msg = DisplayMessage::Text {
            row: 7,
            col: 16,
            text: "1234567",
        };
        let frame = msg.to_frame().unwrap();
        assert_eq!(frame.payload[2], 5);
        assert_eq!(&frame.payload[3..], b"12345");
    }

    #[test]
    fn test_text_outside_screen() {
        let msg = DisplayMessage::Text {
            row: DISPLAY_ROWS,
            col: 0,
            text: "x",
        };
        assert_eq!(msg.to_frame(), Err(FrameError::InvalidFrame));
    }

    #[test]
    fn test_ping_and_ack() {
        let ping = Frame::empty(MSG_PING);
        assert_eq!(DisplayReply::from_frame(&ping), Ok(DisplayReply::Ping));

        let ack = Frame::new(MSG_ACK, &[7]).unwrap();
        assert_eq!(DisplayReply::from_frame(&ack), Ok(DisplayReply::Ack { seq: 7 }));

        let bad_ack = Frame::empty(MSG_ACK);
        assert_eq!(
            DisplayReply::from_frame(&bad_ack),
            Err(FrameError::InvalidFrame)
        );
    }

    #[test]
    fn test_unknown_reply() {
        let frame = Frame::empty(MSG_CLEAR);
        assert_eq!(
            DisplayReply::from_frame(&frame),
            Err(FrameError::UnknownType(MSG_CLEAR))
        );
    }
}

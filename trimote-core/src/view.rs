//! Screen contents and layout
//!
//! ```text
//!      col 0                16
//! row 0 98:A3:16:90:16:90
//! row 1 98:A3:16:8F:7B:20
//! row 2 98:A3:16:8F:7D:70
//! row 3 Spd. 12000
//! row 4 q, Mot.1 Left
//! row 5 a, Mot.2 Left
//! row 6
//! row 7                     42
//! ```

use core::fmt::Write;

use heapless::String;
use trimote_protocol::MacText;

use crate::config::MAX_PEERS;
use crate::status::StatusLine;

/// First address row
pub const ADDRESS_ROW: u8 = 0;
/// Speed row
pub const SPEED_ROW: u8 = 3;
/// First status row
pub const STATUS_ROW: u8 = 4;
/// Heartbeat row and column
pub const HEARTBEAT_ROW: u8 = 7;
pub const HEARTBEAT_COL: u8 = 16;
/// Heartbeat field width (right-aligned)
pub const HEARTBEAT_WIDTH: usize = 5;

pub type HeartbeatText = String<HEARTBEAT_WIDTH>;

/// Everything the display shows, borrowed from the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayView<'a> {
    pub addresses: &'a [MacText; MAX_PEERS],
    pub speed: &'a str,
    pub status: &'a [StatusLine; MAX_PEERS],
    pub heartbeat: u16,
}

impl DisplayView<'_> {
    /// Heartbeat counter right-aligned in its field
    pub fn heartbeat_text(&self) -> HeartbeatText {
        let mut text = HeartbeatText::new();
        // u16 never needs more than 5 digits
        let _ = write!(text, "{:>5}", self.heartbeat);
        text
    }

    /// Visit every text item with its (row, col) position
    pub fn for_each_line(&self, mut f: impl FnMut(u8, u8, &str)) {
        for (row, address) in (ADDRESS_ROW..).zip(self.addresses.iter()) {
            f(row, 0, address);
        }
        f(SPEED_ROW, 0, self.speed);
        for (row, line) in (STATUS_ROW..).zip(self.status.iter()) {
            f(row, 0, line);
        }
        f(HEARTBEAT_ROW, HEARTBEAT_COL, &self.heartbeat_text());
    }
}

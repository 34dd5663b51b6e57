//! Per-device status lines
//!
//! One line per device slot, rewritten by each command aimed at that device.
//! Lines persist until overwritten.

use core::fmt::Write;

use heapless::String;
use trimote_protocol::{DeviceId, MotorCommand, DISPLAY_COLS};

use crate::config::MAX_PEERS;

/// One status line, sized to the display width
pub type StatusLine = String<{ DISPLAY_COLS as usize }>;

/// Status text for every device slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusLines {
    lines: [StatusLine; MAX_PEERS],
}

impl StatusLines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a command sent to a device ("q, Mot.1 Left")
    ///
    /// Ids past the last slot are ignored.
    pub fn record_command(&mut self, symbol: u8, device: DeviceId, command: MotorCommand) {
        if let Some(line) = self.lines.get_mut(device.index()) {
            line.clear();
            // Longest line is "c, Mot.3 Right" (14 chars)
            let _ = write!(
                line,
                "{}, Mot.{} {}",
                symbol as char,
                device.get(),
                command.verb()
            );
        }
    }

    /// Echo an unrecognised byte on the first device's line
    pub fn record_unknown(&mut self, byte: u8) {
        let line = &mut self.lines[0];
        line.clear();
        let _ = line.push(byte as char);
    }

    /// Line for a device slot (0-based)
    pub fn line(&self, index: usize) -> &str {
        self.lines.get(index).map(|l| l.as_str()).unwrap_or("")
    }

    pub fn lines(&self) -> &[StatusLine; MAX_PEERS] {
        &self.lines
    }
}

//! Controller inputs backed by the producer tasks' channels

use trimote_core::traits::{ButtonInput, SerialInput};
use trimote_core::Button;

use crate::channels::{SERIAL_RX, SPEED_DOWN_PRESSED, SPEED_UP_PRESSED};

/// Host serial bytes queued by the USB task
pub struct ChannelSerial;

impl SerialInput for ChannelSerial {
    fn read_byte(&mut self) -> Option<u8> {
        SERIAL_RX.try_receive().ok()
    }
}

/// Press edges signalled by the button task
pub struct SignalButtons;

impl ButtonInput for SignalButtons {
    fn was_pressed(&mut self, button: Button) -> bool {
        let signal = match button {
            Button::SpeedDown => &SPEED_DOWN_PRESSED,
            Button::SpeedUp => &SPEED_UP_PRESSED,
        };
        signal.try_take().is_some()
    }
}

//! Serial and button input traits

use crate::dispatch::Button;

/// Host serial line
pub trait SerialInput {
    /// Take the next received byte, if any; never blocks
    fn read_byte(&mut self) -> Option<u8>;
}

/// Debounced push buttons
pub trait ButtonInput {
    /// Returns true once per press of `button` since the last call
    fn was_pressed(&mut self, button: Button) -> bool;
}

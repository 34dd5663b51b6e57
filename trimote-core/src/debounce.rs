//! Push-button debouncing
//!
//! Sampled counter debouncer: each pressed sample counts up towards the
//! threshold, each released sample counts down. A press is reported once,
//! when the count first reaches the threshold, and re-arms only after the
//! count has decayed back to zero.

/// Debouncer for one active-low push button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonDebouncer {
    threshold: u16,
    counter: u16,
    pressed: bool,
}

impl ButtonDebouncer {
    /// Create a debouncer for a given debounce time and sample interval
    pub fn new(debounce_ms: u16, sample_ms: u16) -> Self {
        let threshold = debounce_ms.checked_div(sample_ms).unwrap_or(0).max(1);
        Self {
            threshold,
            counter: 0,
            pressed: false,
        }
    }

    /// Feed one sample; returns true on a debounced press edge
    pub fn update(&mut self, raw_pressed: bool) -> bool {
        if raw_pressed {
            self.counter = self.counter.saturating_add(1).min(self.threshold);
            if self.counter >= self.threshold && !self.pressed {
                self.pressed = true;
                return true;
            }
        } else {
            self.counter = self.counter.saturating_sub(1);
            if self.counter == 0 {
                self.pressed = false;
            }
        }
        false
    }

    /// Debounced level
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Samples needed to accept a press
    pub fn threshold(&self) -> u16 {
        self.threshold
    }
}

//! Speed button task
//!
//! Samples the two active-low push buttons and signals debounced presses.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};

use trimote_core::debounce::ButtonDebouncer;

use crate::channels::{SPEED_DOWN_PRESSED, SPEED_UP_PRESSED};

/// Sampling interval
const SAMPLE_MS: u16 = 5;

/// The two speed buttons
pub struct ButtonPins {
    pub speed_down: Input<'static>,
    pub speed_up: Input<'static>,
}

/// Button task - samples both buttons and signals press edges
#[embassy_executor::task]
pub async fn button_task(pins: ButtonPins, debounce_ms: u16) {
    info!("Button task started");

    let mut down = ButtonDebouncer::new(debounce_ms, SAMPLE_MS);
    let mut up = ButtonDebouncer::new(debounce_ms, SAMPLE_MS);
    let mut ticker = Ticker::every(Duration::from_millis(SAMPLE_MS as u64));

    loop {
        if down.update(pins.speed_down.is_low()) {
            debug!("Button: SpeedDown");
            SPEED_DOWN_PRESSED.signal(());
        }
        if up.update(pins.speed_up.is_low()) {
            debug!("Button: SpeedUp");
            SPEED_UP_PRESSED.signal(());
        }

        ticker.next().await;
    }
}

//! Tick task
//!
//! The fixed-period source behind the heartbeat. It only advances the shared
//! [`HeartbeatTimer`]; everything else happens in the controller task.

use defmt::*;
use embassy_time::{Duration, Ticker};

use trimote_core::HeartbeatTimer;

/// Tick task - advances the heartbeat timer once per period
#[embassy_executor::task]
pub async fn tick_task(timer: &'static HeartbeatTimer, period_us: u32) {
    info!("Tick task started ({} us)", period_us);

    // Ticker deadlines are absolute, so a late wakeup catches up
    let mut ticker = Ticker::every(Duration::from_micros(period_us as u64));

    loop {
        ticker.next().await;
        timer.on_tick();
    }
}

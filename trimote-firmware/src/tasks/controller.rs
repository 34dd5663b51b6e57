//! Controller task
//!
//! Owns the [`Controller`] and runs its loop: one iteration, then yield.

use defmt::*;
use embassy_time::{Duration, Ticker};

use trimote_core::{Controller, DispatchOutcome, HeartbeatTimer};

use crate::display::ScreenSink;
use crate::inputs::{ChannelSerial, SignalButtons};
use crate::radio::BridgeRadio;

/// Pause between loop iterations
const LOOP_PERIOD_US: u64 = 500;

#[embassy_executor::task]
pub async fn controller_task(
    mut controller: Controller<BridgeRadio>,
    timer: &'static HeartbeatTimer,
) {
    info!("Controller task started");

    let mut buttons = SignalButtons;
    let mut serial = ChannelSerial;
    let mut display = ScreenSink;
    let mut ticker = Ticker::every(Duration::from_micros(LOOP_PERIOD_US));

    loop {
        let summary = controller.run_iteration(&mut buttons, &mut serial, timer, &mut display);

        if summary.buttons > 0 {
            debug!("Speed now {}", controller.speed());
        }
        match summary.serial {
            Some(DispatchOutcome::Sent(record)) => debug!("Sent {:?}", record),
            Some(DispatchOutcome::SendFailed(record, e)) => {
                warn!("Send of {:?} failed: {:?}", record, e)
            }
            Some(DispatchOutcome::Echoed(byte)) => debug!("Unknown command byte {=u8:#x}", byte),
            Some(DispatchOutcome::SpeedChanged(_)) | None => {}
        }
        if summary.heartbeat {
            trace!("Heartbeat {}", controller.heartbeat_count());
        }

        ticker.next().await;
    }
}

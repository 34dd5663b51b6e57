//! Display UART transmit task
//!
//! Sends screen updates and heartbeat responses to the display.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use trimote_protocol::{Frame, MAX_FRAME_SIZE};

use crate::channels::{HEARTBEAT_RECEIVED, SCREEN_UPDATE};
use crate::display::{protocol, SCREEN_BUFFER};

/// Display TX task - sends frames to the display
#[embassy_executor::task]
pub async fn display_tx_task(mut tx: BufferedUartTx) {
    info!("Display TX task started");

    loop {
        match select(HEARTBEAT_RECEIVED.wait(), SCREEN_UPDATE.wait()).await {
            Either::First(()) => match protocol::pong_frame() {
                Ok(frame) => {
                    if send_frame(&mut tx, &frame).await {
                        trace!("PONG sent");
                    }
                }
                Err(e) => warn!("Failed to build PONG: {:?}", e),
            },
            Either::Second(()) => send_screen_update(&mut tx).await,
        }
    }
}

/// Write one frame; returns false on a UART error
async fn send_frame(tx: &mut BufferedUartTx, frame: &Frame) -> bool {
    let mut buf = [0u8; MAX_FRAME_SIZE];
    let Ok(len) = frame.encode(&mut buf) else {
        return false;
    };
    match tx.write_all(&buf[..len]).await {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to send display frame: {:?}", e);
            false
        }
    }
}

/// Send current screen content to the display
async fn send_screen_update(tx: &mut BufferedUartTx) {
    // Copy out so the lock is not held across awaits
    let screen = SCREEN_BUFFER.lock(|screen| screen.borrow().clone());

    for frame in protocol::encode_screen(&screen) {
        if !send_frame(tx, &frame).await {
            break;
        }
    }

    trace!("Screen update sent");
}

//! Display UART receive task
//!
//! Receives frames from the display terminal and answers its heartbeats.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use trimote_protocol::{DisplayReply, FrameParser};

use crate::channels::HEARTBEAT_RECEIVED;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Display RX task - receives and parses frames from the display
#[embassy_executor::task]
pub async fn display_rx_task(mut rx: BufferedUartRx) {
    info!("Display RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("Display RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match DisplayReply::from_frame(&frame) {
                            Ok(reply) => handle_reply(reply),
                            Err(e) => warn!("Failed to parse display reply: {:?}", e),
                        },
                        Ok(None) => {}
                        Err(e) => warn!("Display frame error: {:?}", e),
                    }
                }
            }
            Ok(_) => {}
            Err(e) => warn!("Display UART read error: {:?}", e),
        }
    }
}

fn handle_reply(reply: DisplayReply) {
    match reply {
        DisplayReply::Ping => {
            trace!("PING received");
            HEARTBEAT_RECEIVED.signal(());
        }
        DisplayReply::Ack { seq } => trace!("ACK {} received", seq),
    }
}

//! Radio bridge receive task
//!
//! Parses bridge frames from UART1. Device records are decoded and logged;
//! the controller never acts on them.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use trimote_protocol::{BridgeEvent, Dev2ConRecord, FrameParser};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

#[embassy_executor::task]
pub async fn radio_rx_task(mut rx: BufferedUartRx) {
    info!("Radio RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("Radio RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match BridgeEvent::from_frame(&frame) {
                            Ok(event) => handle_event(&event),
                            Err(e) => warn!("Failed to parse bridge event: {:?}", e),
                        },
                        Ok(None) => {}
                        Err(e) => warn!("Bridge frame error: {:?}", e),
                    }
                }
            }
            Ok(_) => {}
            Err(e) => warn!("Radio UART read error: {:?}", e),
        }
    }
}

fn handle_event(event: &BridgeEvent) {
    match event {
        BridgeEvent::Received { peer, data } => match Dev2ConRecord::decode(data) {
            Ok(record) => debug!(
                "Device {} ({}): front={} rear={}",
                record.id.get(),
                peer,
                record.front_switch,
                record.rear_switch
            ),
            Err(e) => warn!("Bad record from {}: {:?}", peer, e),
        },
        BridgeEvent::SendStatus { peer, delivered } => {
            if *delivered {
                trace!("Delivered to {}", peer);
            } else {
                warn!("Delivery to {} failed", peer);
            }
        }
    }
}

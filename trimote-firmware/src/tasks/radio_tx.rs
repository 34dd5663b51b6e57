//! Radio bridge transmit task
//!
//! Drains [`RADIO_TX`] and writes bridge frames to UART1.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use trimote_protocol::{BridgeRequest, MAX_FRAME_SIZE};

use crate::channels::{RadioRequest, RADIO_TX};

#[embassy_executor::task]
pub async fn radio_tx_task(mut tx: BufferedUartTx) {
    info!("Radio TX task started");

    let mut buf = [0u8; MAX_FRAME_SIZE];

    loop {
        let request = RADIO_TX.receive().await;

        let frame = match request {
            RadioRequest::AddPeer(mac) => BridgeRequest::AddPeer(mac).to_frame(),
            RadioRequest::Send { peer, record } => BridgeRequest::Send {
                peer,
                data: &record,
            }
            .to_frame(),
        };

        let frame = match frame {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Failed to frame {:?}: {:?}", request, e);
                continue;
            }
        };

        match frame.encode(&mut buf) {
            Ok(len) => {
                if let Err(e) = tx.write_all(&buf[..len]).await {
                    warn!("Radio UART write error: {:?}", e);
                } else {
                    trace!("Bridge frame {=u8:#x} sent", frame.msg_type);
                }
            }
            Err(e) => warn!("Failed to encode bridge frame: {:?}", e),
        }
    }
}

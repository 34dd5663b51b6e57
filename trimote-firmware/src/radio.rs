//! Radio transport over the bridge co-processor
//!
//! The RP2040 has no radio of its own. ESP-NOW traffic goes through a bridge
//! on UART1; [`BridgeRadio`] turns controller calls into [`RadioRequest`]s
//! for the radio TX task. It keeps its own id→address table because the
//! bridge addresses peers by MAC only.

use defmt::*;
use heapless::Vec;

use trimote_core::config::MAX_PEERS;
use trimote_core::traits::{RadioError, RadioTransport};
use trimote_protocol::{Con2DevRecord, DeviceId, MacAddr};

use crate::channels::{RadioRequest, RADIO_TX};

/// [`RadioTransport`] backed by the radio TX channel
#[derive(Default)]
pub struct BridgeRadio {
    peers: Vec<MacAddr, MAX_PEERS>,
}

impl BridgeRadio {
    pub const fn new() -> Self {
        Self { peers: Vec::new() }
    }

    fn enqueue(&self, request: RadioRequest) -> Result<(), RadioError> {
        RADIO_TX.try_send(request).map_err(|_| {
            warn!("Radio queue full, dropping {:?}", request);
            RadioError::QueueFull
        })
    }
}

impl RadioTransport for BridgeRadio {
    fn register_peer(&mut self, mac: MacAddr) -> Result<DeviceId, RadioError> {
        let index = self.peers.len() as u8;
        self.peers.push(mac).map_err(|_| RadioError::PeerTableFull)?;
        let id = DeviceId::from_index(index).ok_or(RadioError::PeerTableFull)?;

        // Peer registration happens before the TX task drains the queue, so
        // the queue must hold at least MAX_PEERS requests
        self.enqueue(RadioRequest::AddPeer(mac))?;
        info!("Registered peer {} as device {}", mac, id.get());
        Ok(id)
    }

    fn send(&mut self, id: DeviceId, record: &Con2DevRecord) -> Result<(), RadioError> {
        let Some(&peer) = self.peers.get(id.index()) else {
            warn!("No peer registered for device {}, dropping record", id.get());
            return Err(RadioError::UnknownPeer);
        };

        trace!("Queue {:?} for {}", record, peer);
        self.enqueue(RadioRequest::Send {
            peer,
            record: record.encode(),
        })
    }
}

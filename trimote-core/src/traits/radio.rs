//! Radio transport trait

use trimote_protocol::{Con2DevRecord, DeviceId, MacAddr};

/// Errors reported by a radio transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioError {
    /// No room for another peer
    PeerTableFull,
    /// Id does not address a registered peer
    UnknownPeer,
    /// Outbound queue is full; record dropped
    QueueFull,
}

/// Short-range link to the motor devices
///
/// Sends are fire-and-forget: `Ok` means the record was handed to the link,
/// not that the device received it. Inbound records are delivered on a
/// separate context and never reach the controller.
pub trait RadioTransport {
    /// Register a peer address
    ///
    /// Ids are assigned sequentially from 1 in registration order.
    fn register_peer(&mut self, mac: MacAddr) -> Result<DeviceId, RadioError>;

    /// Queue a record for the peer registered under `id`
    fn send(&mut self, id: DeviceId, record: &Con2DevRecord) -> Result<(), RadioError>;
}

//! Messages for the ESP-NOW bridge link
//!
//! The radio itself lives on a small co-processor that forwards raw ESP-NOW
//! payloads between the air and a UART. Every message names the peer by its
//! MAC address; mapping device ids to addresses is the controller's job.
//!
//! - Controller → Bridge: add a peer, send a payload to a peer
//! - Bridge → Controller: payload received from a peer, send completion

use heapless::Vec;

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};
use crate::mac::MacAddr;

// Message type IDs: Controller → Bridge
pub const MSG_ADD_PEER: u8 = 0x40;
pub const MSG_SEND: u8 = 0x41;

// Message type IDs: Bridge → Controller
pub const MSG_RECEIVED: u8 = 0x50;
pub const MSG_SEND_STATUS: u8 = 0x51;

/// Largest radio payload that fits in one frame after the address
pub const MAX_RADIO_PAYLOAD: usize = MAX_PAYLOAD_SIZE - 6;

/// Requests from the controller to the bridge
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeRequest<'a> {
    /// Register a peer with the radio
    AddPeer(MacAddr),
    /// Transmit a payload to a registered peer
    Send { peer: MacAddr, data: &'a [u8] },
}

impl BridgeRequest<'_> {
    /// Encode this request into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            BridgeRequest::AddPeer(peer) => Frame::new(MSG_ADD_PEER, peer.octets()),
            BridgeRequest::Send { peer, data } => {
                Frame::from_parts(MSG_SEND, &[peer.octets().as_slice(), *data])
            }
        }
    }
}

/// Events reported by the bridge
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeEvent {
    /// A payload arrived from `peer`
    Received {
        peer: MacAddr,
        data: Vec<u8, MAX_RADIO_PAYLOAD>,
    },
    /// Link-layer result of an earlier send
    SendStatus { peer: MacAddr, delivered: bool },
}

impl BridgeEvent {
    /// Parse an event from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        let peer = MacAddr::from_slice(&frame.payload).ok_or(FrameError::InvalidFrame)?;
        let rest = &frame.payload[6..];

        match frame.msg_type {
            MSG_RECEIVED => Ok(BridgeEvent::Received {
                peer,
                data: Vec::from_slice(rest).map_err(|_| FrameError::PayloadTooLarge)?,
            }),
            MSG_SEND_STATUS => {
                let &status = rest.first().ok_or(FrameError::InvalidFrame)?;
                Ok(BridgeEvent::SendStatus {
                    peer,
                    delivered: status != 0,
                })
            }
            other => Err(FrameError::UnknownType(other)),
        }
    }

    /// Encode this event into a frame (for testing or simulation)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            BridgeEvent::Received { peer, data } => {
                Frame::from_parts(MSG_RECEIVED, &[peer.octets().as_slice(), data.as_slice()])
            }
            BridgeEvent::SendStatus { peer, delivered } => {
                let status = [*delivered as u8];
                Frame::from_parts(MSG_SEND_STATUS, &[peer.octets().as_slice(), &status])
            }
        }
    }
}

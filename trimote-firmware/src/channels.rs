//! Inter-task communication channels
//!
//! Producer tasks (USB serial, buttons, display link) hand data to the
//! controller task through these; the controller hands radio traffic and
//! screen updates back out.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use trimote_protocol::{MacAddr, CON2DEV_RECORD_SIZE};

/// Host serial bytes waiting for the controller
const SERIAL_CHANNEL_SIZE: usize = 64;

/// Outbound bridge requests
const RADIO_CHANNEL_SIZE: usize = 8;

/// Work for the radio bridge task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioRequest {
    /// Register a peer with the bridge
    AddPeer(MacAddr),
    /// Transmit an encoded motor record
    Send {
        peer: MacAddr,
        record: [u8; CON2DEV_RECORD_SIZE],
    },
}

/// Bytes received from the host over USB
pub static SERIAL_RX: Channel<CriticalSectionRawMutex, u8, SERIAL_CHANNEL_SIZE> = Channel::new();

/// Requests for the radio bridge
pub static RADIO_TX: Channel<CriticalSectionRawMutex, RadioRequest, RADIO_CHANNEL_SIZE> =
    Channel::new();

/// Debounced press of the speed-down button
pub static SPEED_DOWN_PRESSED: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Debounced press of the speed-up button
pub static SPEED_UP_PRESSED: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Signal that a screen update is ready to be sent
pub static SCREEN_UPDATE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Signal that a heartbeat (PING) was received from the display
pub static HEARTBEAT_RECEIVED: Signal<CriticalSectionRawMutex, ()> = Signal::new();

//! Trimote wire formats
//!
//! This crate defines everything that crosses a wire or the air:
//!
//! - The two fixed-layout radio records exchanged with the motor devices
//! - Device identifiers and hardware (MAC) addresses
//! - The UART frame codec shared by the display terminal link and the
//!   ESP-NOW bridge link
//! - The message sets carried in those frames
//!
//! # Frame Overview
//!
//! Both UART links use the same binary frame:
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 1B     │ 1B   │ 0–64B       │ 1B       │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! Radio records travel inside bridge `SEND`/`RECEIVED` frames; the bridge
//! forwards the record bytes over ESP-NOW untouched.

#![no_std]
#![deny(unsafe_code)]

pub mod bridge;
pub mod display;
pub mod frame;
pub mod mac;
pub mod records;

pub use bridge::{BridgeEvent, BridgeRequest};
pub use display::{DisplayMessage, DisplayReply, DISPLAY_COLS, DISPLAY_ROWS};
pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE};
pub use mac::{MacAddr, MacText};
pub use records::{
    Con2DevRecord, DeviceId, Dev2ConRecord, MotorCommand, RecordError, CON2DEV_RECORD_SIZE,
    DEV2CON_RECORD_SIZE,
};

//! Text display terminal
//!
//! The display is a dumb terminal on UART0: it renders text it is sent and
//! PINGs the controller periodically. All layout decisions stay here.
//!
//! # Protocol Overview
//!
//! Frames as described in `trimote_protocol::frame`, at 115200 baud:
//! - Display → Pico: PING heartbeats, ACKs
//! - Pico → Display: CLEAR, TEXT, PONG

pub mod protocol;
pub mod renderer;

pub use renderer::{Screen, ScreenSink, SCREEN_BUFFER};

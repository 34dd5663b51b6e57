//! Board-agnostic core logic for the Trimote remote controller
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (radio transport, display sink, inputs)
//! - Serial command table and the controller loop
//! - Tick-driven heartbeat and redraw coalescing
//! - Speed selection, peer registry and status lines
//! - Configuration types and parser

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod debounce;
pub mod dispatch;
pub mod heartbeat;
pub mod redraw;
pub mod registry;
pub mod speed;
pub mod status;
pub mod traits;
pub mod view;

pub use controller::{Controller, ControllerError, DispatchOutcome, IterationSummary};
pub use dispatch::{Button, InputEvent};
pub use heartbeat::HeartbeatTimer;

//! Collaborator traits
//!
//! The controller is written against these traits; the firmware implements
//! them on top of its channels and tasks, tests implement them with mocks.

pub mod display;
pub mod input;
pub mod radio;

pub use display::DisplaySink;
pub use input::{ButtonInput, SerialInput};
pub use radio::{RadioError, RadioTransport};

//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod buttons;
pub mod controller;
pub mod display_rx;
pub mod display_tx;
pub mod radio_rx;
pub mod radio_tx;
pub mod tick;
pub mod usb_serial;

pub use buttons::{button_task, ButtonPins};
pub use controller::controller_task;
pub use display_rx::display_rx_task;
pub use display_tx::display_tx_task;
pub use radio_rx::radio_rx_task;
pub use radio_tx::radio_tx_task;
pub use tick::tick_task;
pub use usb_serial::{usb_device_task, usb_serial_task};

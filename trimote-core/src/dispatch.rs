//! Input events and the serial command table
//!
//! Nine serial characters drive the three devices. The mapping is a const
//! table keyed by character; everything outside it is echoed, never sent.

use trimote_protocol::{DeviceId, MotorCommand};

/// One entry of the serial command table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandBinding {
    pub symbol: u8,
    pub device: DeviceId,
    pub command: MotorCommand,
}

const fn bind(symbol: u8, device: u8, command: MotorCommand) -> CommandBinding {
    let device = match DeviceId::new(device) {
        Some(id) => id,
        None => panic!("device ids start at 1"),
    };
    CommandBinding {
        symbol,
        device,
        command,
    }
}

/// Serial characters and the device/command they drive
pub const COMMAND_TABLE: [CommandBinding; 9] = [
    bind(b'q', 1, MotorCommand::Left),
    bind(b'e', 1, MotorCommand::Right),
    bind(b'w', 1, MotorCommand::Stop),
    bind(b'a', 2, MotorCommand::Left),
    bind(b'd', 2, MotorCommand::Right),
    bind(b's', 2, MotorCommand::Stop),
    bind(b'z', 3, MotorCommand::Left),
    bind(b'c', 3, MotorCommand::Right),
    bind(b'x', 3, MotorCommand::Stop),
];

/// Find the binding for a serial byte
pub fn lookup(symbol: u8) -> Option<&'static CommandBinding> {
    COMMAND_TABLE.iter().find(|binding| binding.symbol == symbol)
}

/// Speed selection buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    SpeedDown,
    SpeedUp,
}

impl Button {
    /// Polling order within one loop iteration
    pub const POLL_ORDER: [Button; 2] = [Button::SpeedDown, Button::SpeedUp];
}

/// Input handled by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// One byte from the host serial line
    Serial(u8),
    /// Debounced button press
    Button(Button),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_symbols_are_unique() {
        for (i, a) in COMMAND_TABLE.iter().enumerate() {
            for b in &COMMAND_TABLE[i + 1..] {
                assert_ne!(a.symbol, b.symbol);
            }
        }
    }

    #[test]
    fn test_each_device_has_three_commands() {
        for raw in 1..=3 {
            let device = DeviceId::new(raw).unwrap();
            let commands: heapless::Vec<MotorCommand, 3> = COMMAND_TABLE
                .iter()
                .filter(|b| b.device == device)
                .map(|b| b.command)
                .collect();
            assert_eq!(
                commands.as_slice(),
                &[MotorCommand::Left, MotorCommand::Right, MotorCommand::Stop]
            );
        }
    }

    #[test]
    fn test_lookup() {
        let binding = lookup(b'd').unwrap();
        assert_eq!(binding.device.get(), 2);
        assert_eq!(binding.command, MotorCommand::Right);

        assert!(lookup(b'Q').is_none());
        assert!(lookup(b'?').is_none());
        assert!(lookup(0).is_none());
    }
}

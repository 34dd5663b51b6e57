//! Radio records exchanged between the controller and the motor devices
//!
//! Both records have a fixed, unpadded layout. Multi-byte fields are
//! little-endian, which matches the native layout on both ends of the link.
//!
//! ```text
//! Con2Dev (controller → device), 4 bytes:
//! ┌────┬─────────┬───────────┐
//! │ ID │ COMMAND │ SPEED (LE)│
//! │ 1B │ 1B      │ 2B        │
//! └────┴─────────┴───────────┘
//!
//! Dev2Con (device → controller), 3 bytes:
//! ┌────┬──────────────┬─────────────┐
//! │ ID │ FRONT SWITCH │ REAR SWITCH │
//! └────┴──────────────┴─────────────┘
//! ```

use core::num::NonZeroU8;

/// Encoded size of [`Con2DevRecord`]
pub const CON2DEV_RECORD_SIZE: usize = 4;

/// Encoded size of [`Dev2ConRecord`]
pub const DEV2CON_RECORD_SIZE: usize = 3;

/// Errors that can occur while decoding a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordError {
    /// Buffer shorter than the record layout
    TooShort,
    /// Device id 0 is reserved for the controller
    InvalidId,
    /// Command byte outside {0, 1, 2}
    InvalidCommand(u8),
}

/// Identifier of a registered device
///
/// Ids are 1-based positions in the peer registration order. Zero is
/// reserved for the controller itself and never addresses a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceId(NonZeroU8);

impl DeviceId {
    /// Create an id from its wire value, rejecting zero
    pub const fn new(raw: u8) -> Option<Self> {
        match NonZeroU8::new(raw) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }

    /// Id for the device registered at `index` (0-based)
    pub const fn from_index(index: u8) -> Option<Self> {
        match index.checked_add(1) {
            Some(raw) => Self::new(raw),
            None => None,
        }
    }

    /// Wire value (1-based)
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// 0-based slot for per-device tables
    pub const fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

/// Motor command carried by [`Con2DevRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorCommand {
    Stop,
    Left,
    Right,
}

// Wire format values
const CMD_STOP: u8 = 0;
const CMD_LEFT: u8 = 1;
const CMD_RIGHT: u8 = 2;

impl MotorCommand {
    /// Parse a command from its wire byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            CMD_STOP => Some(MotorCommand::Stop),
            CMD_LEFT => Some(MotorCommand::Left),
            CMD_RIGHT => Some(MotorCommand::Right),
            _ => None,
        }
    }

    /// Convert to wire byte
    pub fn to_byte(self) -> u8 {
        match self {
            MotorCommand::Stop => CMD_STOP,
            MotorCommand::Left => CMD_LEFT,
            MotorCommand::Right => CMD_RIGHT,
        }
    }

    /// Word shown on the status line
    pub fn verb(self) -> &'static str {
        match self {
            MotorCommand::Stop => "Stop",
            MotorCommand::Left => "Left",
            MotorCommand::Right => "Right",
        }
    }

    /// Returns true if this command drives the motor
    pub fn is_drive(self) -> bool {
        !matches!(self, MotorCommand::Stop)
    }
}

/// Controller → device motor-control record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Con2DevRecord {
    pub id: DeviceId,
    pub command: MotorCommand,
    /// Duty/velocity magnitude, passed through unmodified
    pub speed: i16,
}

impl Con2DevRecord {
    pub fn new(id: DeviceId, command: MotorCommand, speed: i16) -> Self {
        Self { id, command, speed }
    }

    /// Stop record; speed is always zero so the payload stays deterministic
    pub fn stop(id: DeviceId) -> Self {
        Self::new(id, MotorCommand::Stop, 0)
    }

    /// Encode into the 4-byte wire layout
    pub fn encode(&self) -> [u8; CON2DEV_RECORD_SIZE] {
        let speed = self.speed.to_le_bytes();
        [self.id.get(), self.command.to_byte(), speed[0], speed[1]]
    }

    /// Decode from the wire layout, ignoring trailing bytes
    pub fn decode(bytes: &[u8]) -> Result<Self, RecordError> {
        if bytes.len() < CON2DEV_RECORD_SIZE {
            return Err(RecordError::TooShort);
        }

        let id = DeviceId::new(bytes[0]).ok_or(RecordError::InvalidId)?;
        let command =
            MotorCommand::from_byte(bytes[1]).ok_or(RecordError::InvalidCommand(bytes[1]))?;
        let speed = i16::from_le_bytes([bytes[2], bytes[3]]);

        Ok(Self { id, command, speed })
    }
}

/// Device → controller status record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dev2ConRecord {
    pub id: DeviceId,
    pub front_switch: u8,
    pub rear_switch: u8,
}

impl Dev2ConRecord {
    /// Encode into the 3-byte wire layout
    pub fn encode(&self) -> [u8; DEV2CON_RECORD_SIZE] {
        [self.id.get(), self.front_switch, self.rear_switch]
    }

    /// Decode from the wire layout, ignoring trailing bytes
    pub fn decode(bytes: &[u8]) -> Result<Self, RecordError> {
        if bytes.len() < DEV2CON_RECORD_SIZE {
            return Err(RecordError::TooShort);
        }

        Ok(Self {
            id: DeviceId::new(bytes[0]).ok_or(RecordError::InvalidId)?,
            front_switch: bytes[1],
            rear_switch: bytes[2],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn id(raw: u8) -> DeviceId {
        DeviceId::new(raw).unwrap()
    }

    #[test]
    fn test_device_id_rejects_zero() {
        assert!(DeviceId::new(0).is_none());
        assert_eq!(DeviceId::new(3).unwrap().index(), 2);
        assert_eq!(DeviceId::from_index(0), Some(id(1)));
        assert!(DeviceId::from_index(255).is_none());
    }

    #[test]
    fn test_con2dev_layout() {
        let record = Con2DevRecord::new(id(2), MotorCommand::Right, 12000);
        // 12000 = 0x2EE0
        assert_eq!(record.encode(), [2, 2, 0xE0, 0x2E]);
    }

    #[test]
    fn test_con2dev_negative_speed_layout() {
        let record = Con2DevRecord::new(id(1), MotorCommand::Left, -2);
        assert_eq!(record.encode(), [1, 1, 0xFE, 0xFF]);
    }

    #[test]
    fn test_stop_record_has_zero_speed() {
        let record = Con2DevRecord::stop(id(3));
        assert_eq!(record.encode(), [3, 0, 0, 0]);
    }

    #[test]
    fn test_con2dev_decode_errors() {
        assert_eq!(Con2DevRecord::decode(&[1, 0, 0]), Err(RecordError::TooShort));
        assert_eq!(
            Con2DevRecord::decode(&[0, 0, 0, 0]),
            Err(RecordError::InvalidId)
        );
        assert_eq!(
            Con2DevRecord::decode(&[1, 7, 0, 0]),
            Err(RecordError::InvalidCommand(7))
        );
    }

    #[test]
    fn test_dev2con_decode() {
        let record = Dev2ConRecord::decode(&[2, 1, 0]).unwrap();
        assert_eq!(record.id, id(2));
        assert_eq!(record.front_switch, 1);
        assert_eq!(record.rear_switch, 0);
        assert_eq!(record.encode(), [2, 1, 0]);
    }

    #[test]
    fn test_dev2con_rejects_controller_id() {
        assert_eq!(Dev2ConRecord::decode(&[0, 1, 1]), Err(RecordError::InvalidId));
    }

    #[test]
    fn test_command_verbs() {
        assert_eq!(MotorCommand::Left.verb(), "Left");
        assert_eq!(MotorCommand::Right.verb(), "Right");
        assert_eq!(MotorCommand::Stop.verb(), "Stop");
        assert!(!MotorCommand::Stop.is_drive());
        assert!(MotorCommand::Left.is_drive());
    }

    proptest! {
        #[test]
        fn prop_con2dev_decode_reproduces_fields(
            raw_id in 1u8..=255,
            cmd in 0u8..3,
            speed in any::<i16>(),
        ) {
            let command = MotorCommand::from_byte(cmd).unwrap();
            let record = Con2DevRecord::new(id(raw_id), command, speed);
            prop_assert_eq!(Con2DevRecord::decode(&record.encode()), Ok(record));
        }
    }
}

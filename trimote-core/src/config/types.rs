//! Configuration type definitions
//!
//! These types describe one controller: its timer cadence, selectable speeds,
//! button debounce and the radio peers it drives. Defaults reproduce the
//! reference hardware.

use heapless::Vec;
use trimote_protocol::MacAddr;

/// Maximum number of radio peers (one per status line)
pub const MAX_PEERS: usize = 3;

/// Maximum entries in the speed table
pub const MAX_SPEEDS: usize = 16;

/// Default selectable speeds
pub const DEFAULT_SPEEDS: [i16; 8] = [5000, 9000, 12000, 15000, 18000, 21000, 24000, 30000];

/// Default speed index (12000)
pub const DEFAULT_SPEED_INDEX: usize = 2;

/// Default peer addresses, in device id order
pub const DEFAULT_PEERS: [MacAddr; MAX_PEERS] = [
    MacAddr::new([0x98, 0xa3, 0x16, 0x90, 0x16, 0x90]),
    MacAddr::new([0x98, 0xa3, 0x16, 0x8f, 0x7b, 0x20]),
    MacAddr::new([0x98, 0xa3, 0x16, 0x8f, 0x7d, 0x70]),
];

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A timer period is zero
    ZeroPeriod,
    /// Reset horizon is not a multiple of the heartbeat period
    HorizonNotMultiple,
    /// Speed table has no entries
    EmptySpeedTable,
    /// Speed table contains a negative magnitude
    NegativeSpeed,
    /// Default speed index is past the end of the table
    SpeedIndexOutOfRange,
    /// No peers configured
    NoPeers,
    /// The same address is configured twice
    DuplicatePeer,
}

/// Tick timer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerConfig {
    /// Timer period in microseconds
    pub tick_period_us: u32,
    /// Ticks between heartbeats
    pub heartbeat_period_ticks: u32,
    /// Tick count at which the counter wraps to zero
    pub reset_horizon_ticks: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            tick_period_us: 1000,
            heartbeat_period_ticks: 1000,
            reset_horizon_ticks: 60_000,
        }
    }
}

impl TimerConfig {
    /// Check that wraparound never disturbs the heartbeat cadence
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_period_us == 0
            || self.heartbeat_period_ticks == 0
            || self.reset_horizon_ticks == 0
        {
            return Err(ConfigError::ZeroPeriod);
        }
        if self.reset_horizon_ticks % self.heartbeat_period_ticks != 0 {
            return Err(ConfigError::HorizonNotMultiple);
        }
        Ok(())
    }
}

/// Speed table configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpeedConfig {
    /// Selectable magnitudes, in button order
    pub table: Vec<i16, MAX_SPEEDS>,
    /// Index selected at power-on
    pub default_index: usize,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            // DEFAULT_SPEEDS is shorter than MAX_SPEEDS
            table: Vec::from_slice(&DEFAULT_SPEEDS).unwrap_or_default(),
            default_index: DEFAULT_SPEED_INDEX,
        }
    }
}

/// Push button configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// Time the input must be stable before a press is reported
    pub debounce_ms: u16,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self { debounce_ms: 20 }
    }
}

/// Complete controller configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerConfig {
    pub timer: TimerConfig,
    pub speed: SpeedConfig,
    pub buttons: ButtonConfig,
    /// Peer addresses; position + 1 is the device id
    pub peers: Vec<MacAddr, MAX_PEERS>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
            speed: SpeedConfig::default(),
            buttons: ButtonConfig::default(),
            peers: Vec::from_slice(&DEFAULT_PEERS).unwrap_or_default(),
        }
    }
}

impl ControllerConfig {
    /// Configuration with default timing and speeds but no peers
    pub fn without_peers() -> Self {
        Self {
            peers: Vec::new(),
            ..Self::default()
        }
    }

    /// Validate the whole configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timer.validate()?;

        if self.speed.table.is_empty() {
            return Err(ConfigError::EmptySpeedTable);
        }
        if self.speed.table.iter().any(|&speed| speed < 0) {
            return Err(ConfigError::NegativeSpeed);
        }
        if self.speed.default_index >= self.speed.table.len() {
            return Err(ConfigError::SpeedIndexOutOfRange);
        }

        if self.peers.is_empty() {
            return Err(ConfigError::NoPeers);
        }
        for (i, peer) in self.peers.iter().enumerate() {
            if self.peers[..i].contains(peer) {
                return Err(ConfigError::DuplicatePeer);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ControllerConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.peers.len(), 3);
        assert_eq!(config.speed.table[config.speed.default_index], 12000);
    }

    #[test]
    fn test_horizon_must_be_multiple_of_heartbeat() {
        let timer = TimerConfig {
            heartbeat_period_ticks: 7,
            ..TimerConfig::default()
        };
        assert_eq!(timer.validate(), Err(ConfigError::HorizonNotMultiple));
    }

    #[test]
    fn test_zero_period_rejected() {
        let timer = TimerConfig {
            heartbeat_period_ticks: 0,
            ..TimerConfig::default()
        };
        assert_eq!(timer.validate(), Err(ConfigError::ZeroPeriod));
    }

    #[test]
    fn test_speed_table_checks() {
        let mut config = ControllerConfig::default();
        config.speed.default_index = config.speed.table.len();
        assert_eq!(config.validate(), Err(ConfigError::SpeedIndexOutOfRange));

        config.speed.default_index = 0;
        config.speed.table[1] = -5;
        assert_eq!(config.validate(), Err(ConfigError::NegativeSpeed));

        config.speed.table.clear();
        assert_eq!(config.validate(), Err(ConfigError::EmptySpeedTable));
    }

    #[test]
    fn test_peer_checks() {
        let mut config = ControllerConfig::without_peers();
        assert_eq!(config.validate(), Err(ConfigError::NoPeers));

        config.peers.push(DEFAULT_PEERS[0]).unwrap();
        config.peers.push(DEFAULT_PEERS[0]).unwrap();
        assert_eq!(config.validate(), Err(ConfigError::DuplicatePeer));
    }
}

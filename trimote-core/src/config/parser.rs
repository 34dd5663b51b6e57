//! Minimal TOML parser for the controller configuration
//!
//! Handles only the subset the configuration file uses; it does NOT
//! implement the full TOML grammar.
//!
//! Supported:
//! - `[timer]`, `[speed]`, `[buttons]` and `[peer.N]` section headers
//! - `key = value` pairs with integer, string and single-line integer
//!   array values
//! - Comments (`# ...`), including trailing comments
//!
//! Unknown keys are ignored. Unknown sections are an error. Peers must be
//! listed in id order starting at 1, because the order they are registered
//! in is what assigns their ids.

use heapless::Vec;
use trimote_protocol::MacAddr;

use super::types::{ControllerConfig, MAX_PEERS, MAX_SPEEDS};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Malformed or unknown section header
    InvalidSection,
    /// Line is neither a section, a key/value pair nor a comment
    InvalidLine,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Too many items (exceeded heapless capacity)
    TooManyItems,
    /// `[peer.N]` sections are not numbered 1, 2, 3...
    PeerOutOfOrder,
    /// Peer section without a `mac` key
    MissingMac,
    /// Malformed MAC address
    InvalidMac,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Timer,
    Speed,
    Buttons,
    Peer,
}

/// Parse TOML text into a [`ControllerConfig`]
///
/// Sections that are absent keep their defaults, except peers: the parsed
/// configuration contains exactly the peers listed in the text. The result
/// is not validated; call [`ControllerConfig::validate`].
pub fn parse_config(input: &str) -> Result<ControllerConfig, ParseError> {
    let mut config = ControllerConfig::without_peers();
    let mut section = Section::Root;
    let mut pending_peer: Option<MacAddr> = None;
    let mut in_peer = false;

    for line in input.lines() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            if in_peer {
                finish_peer(&mut config, pending_peer.take())?;
            }
            section = parse_section_header(header.trim(), config.peers.len())?;
            in_peer = section == Section::Peer;
            continue;
        }

        let (key, value) = line.split_once('=').ok_or(ParseError::InvalidLine)?;
        let (key, value) = (key.trim(), value.trim());

        match section {
            Section::Root => {}
            Section::Timer => match key {
                "tick_period_us" => config.timer.tick_period_us = parse_int(value)?,
                "heartbeat_period_ticks" => {
                    config.timer.heartbeat_period_ticks = parse_int(value)?
                }
                "reset_horizon_ticks" => config.timer.reset_horizon_ticks = parse_int(value)?,
                _ => {} // Ignore unknown keys
            },
            Section::Speed => match key {
                "table" => config.speed.table = parse_int_array(value)?,
                "default_index" => config.speed.default_index = parse_int(value)?,
                _ => {}
            },
            Section::Buttons => {
                if key == "debounce_ms" {
                    config.buttons.debounce_ms = parse_int(value)?;
                }
            }
            Section::Peer => {
                if key == "mac" {
                    let mac = MacAddr::parse(parse_string(value)?).ok_or(ParseError::InvalidMac)?;
                    pending_peer = Some(mac);
                }
            }
        }
    }

    if in_peer {
        finish_peer(&mut config, pending_peer)?;
    }

    Ok(config)
}

/// Parse a section header (without brackets)
fn parse_section_header(header: &str, registered: usize) -> Result<Section, ParseError> {
    match header {
        "timer" => Ok(Section::Timer),
        "speed" => Ok(Section::Speed),
        "buttons" => Ok(Section::Buttons),
        _ => {
            let id = header
                .strip_prefix("peer.")
                .ok_or(ParseError::InvalidSection)?;
            let id: usize = id.parse().map_err(|_| ParseError::InvalidSection)?;
            if id > MAX_PEERS {
                return Err(ParseError::TooManyItems);
            }
            if id != registered + 1 {
                return Err(ParseError::PeerOutOfOrder);
            }
            Ok(Section::Peer)
        }
    }
}

/// Store the address collected for the section being closed
fn finish_peer(config: &mut ControllerConfig, mac: Option<MacAddr>) -> Result<(), ParseError> {
    let mac = mac.ok_or(ParseError::MissingMac)?;
    config
        .peers
        .push(mac)
        .map_err(|_| ParseError::TooManyItems)
}

/// Remove a trailing comment, leaving `#` inside strings alone
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Parse a quoted string value
fn parse_string(value: &str) -> Result<&str, ParseError> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseError::InvalidValue)
}

/// Parse an integer value; `_` separators are allowed (`60_000`)
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    let mut digits: heapless::String<24> = heapless::String::new();
    for ch in value.chars().filter(|&c| c != '_') {
        digits.push(ch).map_err(|_| ParseError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a single-line integer array like `[1, 2, 3]`
fn parse_int_array(value: &str) -> Result<Vec<i16, MAX_SPEEDS>, ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    let mut items = Vec::new();
    for item in inner.split(',') {
        let item = item.trim();
        // Trailing comma
        if item.is_empty() {
            continue;
        }
        items
            .push(parse_int(item)?)
            .map_err(|_| ParseError::TooManyItems)?;
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_PEERS;

    const SAMPLE: &str = r#"
# Trimote controller
[timer]
tick_period_us = 1000
heartbeat_period_ticks = 500   # twice a second
reset_horizon_ticks = 60_000

[speed]
table = [1000, 2000, 3000,]
default_index = 1

[buttons]
debounce_ms = 30

[peer.1]
mac = "98:A3:16:90:16:90"

[peer.2]
name = "ignored"
mac = "98:a3:16:8f:7b:20"
"#;

    #[test]
    fn test_parse_sample() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.timer.heartbeat_period_ticks, 500);
        assert_eq!(config.timer.reset_horizon_ticks, 60_000);
        assert_eq!(config.speed.table.as_slice(), &[1000, 2000, 3000]);
        assert_eq!(config.speed.default_index, 1);
        assert_eq!(config.buttons.debounce_ms, 30);
        assert_eq!(config.peers.as_slice(), &DEFAULT_PEERS[..2]);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_missing_sections_keep_defaults() {
        let config = parse_config("[peer.1]\nmac = \"98:A3:16:90:16:90\"\n").unwrap();
        assert_eq!(config.timer, crate::config::TimerConfig::default());
        assert_eq!(config.speed, crate::config::SpeedConfig::default());
        assert_eq!(config.peers.len(), 1);
    }

    #[test]
    fn test_peers_must_be_in_order() {
        let input = "[peer.2]\nmac = \"98:A3:16:90:16:90\"\n";
        assert_eq!(parse_config(input), Err(ParseError::PeerOutOfOrder));
    }

    #[test]
    fn test_too_many_peers() {
        let input = "[peer.1]\nmac = \"00:00:00:00:00:01\"\n\
                     [peer.2]\nmac = \"00:00:00:00:00:02\"\n\
                     [peer.3]\nmac = \"00:00:00:00:00:03\"\n\
                     [peer.4]\nmac = \"00:00:00:00:00:04\"\n";
        assert_eq!(parse_config(input), Err(ParseError::TooManyItems));
    }

    #[test]
    fn test_peer_without_mac() {
        let input = "[peer.1]\n[timer]\n";
        assert_eq!(parse_config(input), Err(ParseError::MissingMac));
    }

    #[test]
    fn test_bad_values() {
        assert_eq!(
            parse_config("[timer]\ntick_period_us = fast\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[peer.1]\nmac = \"98:A3:16\"\n"),
            Err(ParseError::InvalidMac)
        );
        assert_eq!(
            parse_config("[speed]\ntable = 5000\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[speed]\ntable = [40000]\n"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_bad_structure() {
        assert_eq!(parse_config("[motors]\n"), Err(ParseError::InvalidSection));
        assert_eq!(parse_config("[timer]\njust words\n"), Err(ParseError::InvalidLine));
    }
}

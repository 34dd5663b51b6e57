//! Hardware (MAC) addresses of radio peers

use core::fmt::{self, Write};

use heapless::String;

/// Length of the textual form `XX:XX:XX:XX:XX:XX`
pub const MAC_TEXT_LEN: usize = 17;

/// Textual form of a MAC address
pub type MacText = String<MAC_TEXT_LEN>;

/// 48-bit link-layer address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    pub const fn octets(&self) -> &[u8; 6] {
        &self.0
    }

    /// Parse `XX:XX:XX:XX:XX:XX` (either hex case)
    pub fn parse(text: &str) -> Option<Self> {
        let bytes = text.as_bytes();
        if bytes.len() != MAC_TEXT_LEN {
            return None;
        }

        let mut octets = [0u8; 6];
        for (i, octet) in octets.iter_mut().enumerate() {
            let at = i * 3;
            if i > 0 && bytes[at - 1] != b':' {
                return None;
            }
            *octet = (hex_value(bytes[at])? << 4) | hex_value(bytes[at + 1])?;
        }

        Some(Self(octets))
    }

    /// Format as uppercase, colon separated text for the display
    pub fn to_text(&self) -> MacText {
        let mut text = MacText::new();
        // 17 characters always fit
        let _ = write!(text, "{}", self);
        text
    }

    /// Read an address from the first six bytes of a payload
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let octets: [u8; 6] = bytes.get(..6)?.try_into().ok()?;
        Some(Self(octets))
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

//! Frame encoding and decoding for the UART links.
//!
//! Frame format:
//! - START (1 byte): 0xAA synchronization byte
//! - LENGTH (1 byte): payload length (0-64)
//! - TYPE (1 byte): message type identifier
//! - PAYLOAD (0-64 bytes): type-specific data
//! - CHECKSUM (1 byte): XOR of LENGTH, TYPE, and all PAYLOAD bytes

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xAA;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 64;

/// Bytes added around the payload (START + LENGTH + TYPE + CHECKSUM)
pub const FRAME_OVERHEAD: usize = 4;

/// Maximum complete frame size
pub const MAX_FRAME_SIZE: usize = FRAME_OVERHEAD + MAX_PAYLOAD_SIZE;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Checksum mismatch
    InvalidChecksum,
    /// Payload does not match the message type
    InvalidFrame,
    /// Unknown message type
    UnknownType(u8),
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// A parsed or constructed frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message type identifier
    pub msg_type: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Create a new frame with the given message type and payload
    pub fn new(msg_type: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { msg_type, payload })
    }

    /// Create a frame from payload pieces written back to back
    pub fn from_parts(msg_type: u8, parts: &[&[u8]]) -> Result<Self, FrameError> {
        let mut payload = Vec::new();
        for part in parts {
            payload
                .extend_from_slice(part)
                .map_err(|_| FrameError::PayloadTooLarge)?;
        }
        Ok(Self { msg_type, payload })
    }

    /// Create a frame with no payload
    pub fn empty(msg_type: u8) -> Self {
        Self {
            msg_type,
            payload: Vec::new(),
        }
    }

    /// Checksum over LENGTH, TYPE and payload
    fn checksum(length: u8, msg_type: u8, payload: &[u8]) -> u8 {
        payload.iter().fold(length ^ msg_type, |acc, &b| acc ^ b)
    }

    /// Number of bytes [`Frame::encode`] writes
    pub fn encoded_len(&self) -> usize {
        FRAME_OVERHEAD + self.payload.len()
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let frame_len = self.encoded_len();
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        let length = self.payload.len() as u8;
        let end = 3 + self.payload.len();

        buffer[0] = FRAME_START;
        buffer[1] = length;
        buffer[2] = self.msg_type;
        buffer[3..end].copy_from_slice(&self.payload);
        buffer[end] = Self::checksum(length, self.msg_type, &self.payload);

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Vec<u8, MAX_FRAME_SIZE> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        // A frame never exceeds MAX_FRAME_SIZE, so neither step can fail
        let len = self.encode(&mut buffer).unwrap_or(0);
        Vec::from_slice(&buffer[..len]).unwrap_or_default()
    }
}

/// Parser position inside a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Discarding bytes until START
    Sync,
    /// Got START, next byte is LENGTH
    Length,
    /// Got LENGTH, next byte is TYPE
    Type { length: u8 },
    /// Collecting payload bytes
    Payload { length: u8, msg_type: u8 },
    /// Payload complete, next byte is CHECKSUM
    Checksum { length: u8, msg_type: u8 },
}

/// Byte-at-a-time frame parser
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a new frame parser
    pub fn new() -> Self {
        Self {
            state: ParseState::Sync,
            payload: Vec::new(),
        }
    }

    /// Drop any partial frame and wait for the next START byte
    pub fn reset(&mut self) {
        self.state = ParseState::Sync;
        self.payload.clear();
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on parse error.
    /// The parser is ready for the next frame after an error.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            ParseState::Sync => {
                if byte == FRAME_START {
                    self.state = ParseState::Length;
                }
                Ok(None)
            }
            ParseState::Length => {
                if byte as usize > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::PayloadTooLarge);
                }
                self.state = ParseState::Type { length: byte };
                Ok(None)
            }
            ParseState::Type { length } => {
                self.payload.clear();
                self.state = if length == 0 {
                    ParseState::Checksum {
                        length,
                        msg_type: byte,
                    }
                } else {
                    ParseState::Payload {
                        length,
                        msg_type: byte,
                    }
                };
                Ok(None)
            }
            ParseState::Payload { length, msg_type } => {
                // Capacity is guaranteed by the LENGTH check
                let _ = self.payload.push(byte);
                if self.payload.len() == length as usize {
                    self.state = ParseState::Checksum { length, msg_type };
                }
                Ok(None)
            }
            ParseState::Checksum { length, msg_type } => {
                let expected = Frame::checksum(length, msg_type, &self.payload);
                if byte != expected {
                    self.reset();
                    return Err(FrameError::InvalidChecksum);
                }

                let frame = Frame {
                    msg_type,
                    payload: core::mem::take(&mut self.payload),
                };
                self.reset();
                Ok(Some(frame))
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete frame found, if any.
    /// Remaining bytes after a complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_empty_payload() {
        let frame = Frame::empty(0x20);
        let mut buffer = [0u8; 8];
        let len = frame.encode(&mut buffer).unwrap();

        assert_eq!(len, 4);
        assert_eq!(&buffer[..4], &[FRAME_START, 0, 0x20, 0x20]);
    }

    #[test]
    fn test_encode_with_payload() {
        let frame = Frame::new(0x41, &[1, 2, 3]).unwrap();
        let encoded = frame.encode_to_vec();

        // checksum = 3 ^ 0x41 ^ 1 ^ 2 ^ 3 = 0x42
        assert_eq!(encoded.as_slice(), &[FRAME_START, 3, 0x41, 1, 2, 3, 0x42]);
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let frame = Frame::new(0x41, &[1, 2, 3]).unwrap();
        let mut buffer = [0u8; 6];
        assert_eq!(frame.encode(&mut buffer), Err(FrameError::BufferTooSmall));
    }

    #[test]
    fn test_from_parts_concatenates() {
        let frame = Frame::from_parts(0x41, &[&[1, 2], &[], &[3]]).unwrap();
        assert_eq!(frame.payload.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_payload_too_large() {
        let large_payload = [0u8; MAX_PAYLOAD_SIZE + 1];
        assert_eq!(
            Frame::new(0x21, &large_payload),
            Err(FrameError::PayloadTooLarge)
        );
    }

    #[test]
    fn test_parser_reads_encoded_frame() {
        let original = Frame::new(0x50, &[9, 8, 7, 6]).unwrap();
        let encoded = original.encode_to_vec();

        let mut parser = FrameParser::new();
        let parsed = parser.feed_bytes(&encoded).unwrap().unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_parser_invalid_checksum() {
        let mut encoded = Frame::empty(0x02).encode_to_vec();
        let last = encoded.len() - 1;
        encoded[last] ^= 0xFF;

        let mut parser = FrameParser::new();
        assert_eq!(
            parser.feed_bytes(&encoded),
            Err(FrameError::InvalidChecksum)
        );

        // Parser recovers for the next frame
        let good = Frame::empty(0x02).encode_to_vec();
        assert!(parser.feed_bytes(&good).unwrap().is_some());
    }

    #[test]
    fn test_parser_rejects_oversize_length() {
        let mut parser = FrameParser::new();
        assert_eq!(parser.feed(FRAME_START), Ok(None));
        assert_eq!(
            parser.feed(MAX_PAYLOAD_SIZE as u8 + 1),
            Err(FrameError::PayloadTooLarge)
        );
    }

    #[test]
    fn test_parser_resync_after_garbage() {
        let encoded = Frame::empty(0x24).encode_to_vec();

        let mut data = Vec::<u8, 16>::new();
        data.extend_from_slice(&[0x00, 0xFF, 0x12, 0x34]).unwrap();
        data.extend_from_slice(&encoded).unwrap();

        let mut parser = FrameParser::new();
        let parsed = parser.feed_bytes(&data).unwrap().unwrap();
        assert_eq!(parsed.msg_type, 0x24);
    }

    #[test]
    fn test_parser_back_to_back_frames() {
        let first = Frame::new(0x50, &[1]).unwrap().encode_to_vec();
        let second = Frame::new(0x51, &[2]).unwrap().encode_to_vec();

        let mut parser = FrameParser::new();
        let mut frames = Vec::<Frame, 2>::new();
        for &byte in first.iter().chain(second.iter()) {
            if let Some(frame) = parser.feed(byte).unwrap() {
                frames.push(frame).unwrap();
            }
        }

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].msg_type, 0x50);
        assert_eq!(frames[1].payload.as_slice(), &[2]);
    }
}

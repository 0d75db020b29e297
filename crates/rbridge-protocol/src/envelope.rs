//! Frame envelope parsing.
//!
//! Every uplink frame starts with a two-byte header:
//!
//! ```text
//! +----------------------+----------------+-------------------+
//! | version:4 | count:4  | message type   | payload[0..]      |
//! +----------------------+----------------+-------------------+
//! ```
//!
//! The payload is borrowed from the raw frame, never copied.

use std::borrow::Cow;

use serde::Serialize;

use crate::constants::*;
use crate::error::*;
use crate::events::DecodedEvent;
use crate::registry::{self, MessageType, MessageTypeEntry};

/// A parsed frame header plus a view of the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope<'a> {
    /// Protocol version (upper nibble of byte 0).
    pub protocol_version: u8,
    /// Rolling packet counter (lower nibble of byte 0).
    pub packet_counter: u8,
    /// Message-type code (byte 1).
    pub message_type_code: u8,
    /// Bytes after the header.
    pub payload: &'a [u8],
}

impl<'a> Envelope<'a> {
    /// Split a raw frame into header fields and payload.
    pub fn parse(raw: &'a [u8]) -> CodecResult<Self> {
        if raw.len() < HEADER_LEN {
            return Err(CodecError::FrameTooShort {
                expected: HEADER_LEN,
                actual: raw.len(),
            });
        }

        Ok(Envelope {
            protocol_version: raw[0] >> PROTOCOL_VERSION_SHIFT,
            packet_counter: raw[0] & PACKET_COUNTER_MASK,
            message_type_code: raw[1],
            payload: &raw[HEADER_LEN..],
        })
    }

    /// Classified message type.
    pub fn message_type(&self) -> MessageType {
        MessageType::from_code(self.message_type_code)
    }

    /// Registry entry for this frame's code.
    pub fn entry(&self) -> MessageTypeEntry {
        registry::lookup(self.message_type_code)
    }

    /// Decode the payload with the registered routine.
    pub fn decode(&self) -> CodecResult<DecodedFrame> {
        let entry = self.entry();
        log::trace!(
            "decoding {} (v{}, counter {}, {} payload bytes)",
            entry.label,
            self.protocol_version,
            self.packet_counter,
            self.payload.len()
        );

        let event = entry.decode(self.payload)?;
        Ok(DecodedFrame {
            protocol_version: self.protocol_version,
            packet_counter: self.packet_counter,
            message_code: self.message_type_code,
            message_type: entry.label,
            event,
        })
    }
}

/// Parse a raw frame. Fails only when the header is incomplete.
pub fn parse(raw: &[u8]) -> CodecResult<Envelope<'_>> {
    Envelope::parse(raw)
}

/// Structured decode record for one frame.
///
/// Serializes as a flat object: header fields, the `message_type` label, then
/// the event's own keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedFrame {
    /// Protocol version (0-15).
    pub protocol_version: u8,
    /// Packet counter (0-15).
    pub packet_counter: u8,
    /// Raw message-type code.
    #[serde(skip)]
    pub message_code: u8,
    /// Registry label, or "Unknown (<code>)".
    pub message_type: Cow<'static, str>,
    /// Type-specific event fields.
    #[serde(flatten)]
    pub event: DecodedEvent,
}

impl DecodedFrame {
    /// Classified message type.
    pub fn kind(&self) -> MessageType {
        MessageType::from_code(self.message_code)
    }
}

/// Parse, look up and decode a raw frame.
pub fn decode_frame(raw: &[u8]) -> CodecResult<DecodedFrame> {
    Envelope::parse(raw)?.decode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_fields_for_every_first_byte() {
        for byte0 in 0..=u8::MAX {
            let raw = [byte0, MSG_TAMPER, 0x00];
            let envelope = parse(&raw).unwrap();
            assert_eq!(envelope.protocol_version, byte0 >> 4);
            assert_eq!(envelope.packet_counter, byte0 & 0x0F);
            assert_eq!(envelope.message_type_code, MSG_TAMPER);
        }
    }

    #[test]
    fn test_frame_too_short() {
        assert_eq!(
            parse(&[]),
            Err(CodecError::FrameTooShort {
                expected: 2,
                actual: 0
            })
        );
        assert_eq!(
            parse(&[0x10]),
            Err(CodecError::FrameTooShort {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_payload_is_borrowed_view() {
        let raw = [0x12, MSG_WATER, 0x00, 0x05];
        let envelope = parse(&raw).unwrap();
        assert_eq!(envelope.payload, &raw[2..]);
        assert!(std::ptr::eq(envelope.payload.as_ptr(), raw[2..].as_ptr()));
    }

    #[test]
    fn test_header_only_frame() {
        let envelope = parse(&[0x10, 0x42]).unwrap();
        assert!(envelope.payload.is_empty());
        assert_eq!(envelope.message_type(), MessageType::Unknown(0x42));
    }

    #[test]
    fn test_decode_frame_serializes_flat() {
        let frame = decode_frame(&[0x13, MSG_WATER, 0x00, 0x05]).unwrap();
        assert_eq!(frame.kind(), MessageType::WaterLeak);
        assert_eq!(
            serde_json::to_value(&frame).unwrap(),
            json!({
                "protocol_version": 1,
                "packet_counter": 3,
                "message_type": "Water Leak Sensor Event",
                "Event": "Water",
                "State": "Water Present",
                "Relative Resistance": 5,
            })
        );
    }

    #[test]
    fn test_unknown_code_is_not_an_error() {
        let frame = decode_frame(&[0x10, 0x42, 0xDE, 0xAD]).unwrap();
        assert_eq!(frame.event, DecodedEvent::Undefined);
        assert_eq!(
            serde_json::to_value(&frame).unwrap(),
            json!({
                "protocol_version": 1,
                "packet_counter": 0,
                "message_type": "Unknown (66)",
                "Event": "undefined",
            })
        );
    }

    #[test]
    fn test_decoder_errors_propagate() {
        assert_eq!(
            decode_frame(&[0x10, MSG_WATER, 0x00]),
            Err(CodecError::PayloadTooShort {
                expected: 2,
                actual: 1
            })
        );
    }
}

//! Radio Bridge Sensor Protocol
//!
//! This crate decodes uplink frames from Radio Bridge LoRaWAN sensors and
//! encodes configuration downlinks for them.
//!
//! # Protocol Overview
//!
//! Every uplink frame carries a two-byte header followed by a type-specific
//! payload:
//!
//! - **Byte 0**: protocol version (upper nibble) and packet counter (lower nibble)
//! - **Byte 1**: message-type code, classified by the registry
//! - **Bytes 2..**: payload, interpreted by the decoder registered for the code
//!
//! Unknown message types are not errors: they decode to an `Undefined` event
//! labelled `"Unknown (<code>)"`. Downlinks are fixed eight-byte frames whose
//! first byte is the target message-type code.
//!
//! # Example
//!
//! ```rust
//! use rbridge_protocol::{decode_frame, encode, DecodedEvent, DownlinkRequest};
//!
//! // Decode a water leak uplink
//! let frame = decode_frame(&[0x10, 0x08, 0x00, 0x05]).unwrap();
//! assert_eq!(frame.message_type, "Water Leak Sensor Event");
//! assert!(matches!(frame.event, DecodedEvent::Water { relative_resistance: 5, .. }));
//!
//! // Build a water sensor configuration downlink
//! let request = DownlinkRequest::new("water_sensor")
//!     .with("enableWaterPresent", 1)
//!     .with("enableWaterNotPresent", 0)
//!     .with("threshold", 10)
//!     .with("restoral", 5);
//! let downlink = encode(&request).unwrap();
//! assert_eq!(downlink.as_bytes()[0], 0x08);
//! ```

mod constants;
mod downlink;
mod envelope;
mod error;
mod events;
mod registry;
mod tables;
mod transport;

pub use constants::*;
pub use downlink::*;
pub use envelope::*;
pub use error::*;
pub use events::*;
pub use registry::*;
pub use tables::*;
pub use transport::*;

//! Transport payload adapter.
//!
//! The network server carries frames as base64 text inside JSON objects:
//! uplinks as `{"deveui": "...", "data": "<base64>", ...}` and downlinks as
//! `{"data": "<base64>"}`. Some gateways strip the `=` padding, so decoding
//! accepts padded and unpadded input alike.

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::downlink::EncodedFrame;
use crate::envelope::{decode_frame, DecodedFrame};
use crate::error::*;

const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode standard base64, with or without trailing padding.
pub fn decode_base64(text: &str) -> CodecResult<Vec<u8>> {
    LENIENT
        .decode(text.trim())
        .map_err(|e| CodecError::Base64Decode(e.to_string()))
}

/// Decode a base64 transport payload into a decode record.
pub fn decode_base64_frame(text: &str) -> CodecResult<DecodedFrame> {
    let raw = decode_base64(text)?;
    decode_frame(&raw)
}

// ============================================================================
// Uplinks
// ============================================================================

/// An uplink as published by the network server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UplinkMessage {
    /// Base64 frame.
    pub data: String,
    /// Device EUI, when the server includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deveui: Option<String>,
    /// Every other field, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UplinkMessage {
    /// Parse an uplink from JSON text.
    pub fn from_json(text: &str) -> CodecResult<Self> {
        serde_json::from_str(text).map_err(|e| CodecError::InvalidJson(e.to_string()))
    }

    /// Decode the carried frame.
    pub fn decode(&self) -> CodecResult<DecodedUplink> {
        let frame = decode_base64_frame(&self.data)?;
        Ok(DecodedUplink {
            dev_eui: self.deveui.clone(),
            frame,
        })
    }
}

/// A decoded uplink, tagged with its device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedUplink {
    /// Device EUI, if known.
    #[serde(rename = "deveui")]
    pub dev_eui: Option<String>,
    /// Decode record.
    #[serde(rename = "data_decoded")]
    pub frame: DecodedFrame,
}

/// Parse and decode an uplink JSON message in one step.
pub fn decode_uplink_json(text: &str) -> CodecResult<DecodedUplink> {
    UplinkMessage::from_json(text)?.decode()
}

// ============================================================================
// Downlinks
// ============================================================================

/// Downlink payload body for the network server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownlinkPayload {
    /// Base64 frame.
    pub data: String,
}

impl DownlinkPayload {
    /// Render as `{"data": "<base64>"}`.
    pub fn to_json(&self) -> String {
        serde_json::json!({ "data": self.data }).to_string()
    }
}

impl From<&EncodedFrame> for DownlinkPayload {
    fn from(frame: &EncodedFrame) -> Self {
        DownlinkPayload {
            data: frame.to_base64(),
        }
    }
}

impl From<EncodedFrame> for DownlinkPayload {
    fn from(frame: EncodedFrame) -> Self {
        DownlinkPayload::from(&frame)
    }
}

//! Configuration downlinks sent to sensors.
//!
//! Every downlink is an eight-byte frame whose first byte is the target
//! message-type code:
//!
//! ```text
//! water_sensor:          08 | enable_events | threshold | restoral | 00 00 00 00
//! temp_humidity_sensor:  0D | mode | interval | margin | t_lo | t_hi | h_lo | h_hi
//! ```
//!
//! Requests arrive as loosely typed parameter maps (web forms submit every
//! value as a string). All parameters are validated into a typed config
//! before a single byte is written.

use std::collections::BTreeMap;
use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use bytes::BufMut;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::*;
use crate::registry::SensorType;

// ============================================================================
// Request Parameters
// ============================================================================

/// A loosely typed downlink parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    /// Integer value.
    Integer(i64),
    /// Boolean value (YAML request files).
    Bool(bool),
    /// Text value, parsed on use.
    Text(String),
    /// Anything else (floats, null, lists). Never numeric.
    Other(serde_json::Value),
}

impl ParameterValue {
    /// Convert to i64 if the value is numeric.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParameterValue::Integer(v) => Some(*v),
            ParameterValue::Bool(v) => Some(i64::from(*v)),
            ParameterValue::Text(v) => v.trim().parse().ok(),
            ParameterValue::Other(_) => None,
        }
    }

    /// Convert hexadecimal text (optional `0x` prefix) to i64.
    ///
    /// Only text qualifies: a bare number such as `mode: 10` is ambiguous
    /// between decimal and hex and is rejected.
    pub fn as_hex_i64(&self) -> Option<i64> {
        match self {
            ParameterValue::Text(v) => {
                let digits = v.trim();
                let digits = digits
                    .strip_prefix("0x")
                    .or_else(|| digits.strip_prefix("0X"))
                    .unwrap_or(digits);
                i64::from_str_radix(digits, 16).ok()
            }
            _ => None,
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Integer(v) => write!(f, "{}", v),
            ParameterValue::Bool(v) => write!(f, "{}", v),
            ParameterValue::Text(v) => write!(f, "{}", v),
            ParameterValue::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        ParameterValue::Integer(value)
    }
}

impl From<i32> for ParameterValue {
    fn from(value: i32) -> Self {
        ParameterValue::Integer(i64::from(value))
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::Text(value.to_string())
    }
}

/// A downlink request: a target sensor type plus named parameters.
///
/// Deserializes from the flat shape the transport layer posts, e.g.
/// `{"sensor_type": "water_sensor", "threshold": "10", ...}`. Unrelated keys
/// (such as `topic`) are kept but ignored by the encoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownlinkRequest {
    /// Target sensor type wire name.
    pub sensor_type: String,
    /// Named parameters.
    #[serde(flatten)]
    pub parameters: BTreeMap<String, ParameterValue>,
}

impl DownlinkRequest {
    /// Create an empty request for a sensor type.
    pub fn new(sensor_type: impl Into<String>) -> Self {
        DownlinkRequest {
            sensor_type: sensor_type.into(),
            parameters: BTreeMap::new(),
        }
    }

    /// Add a parameter (builder style).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Read a parameter that must fit in a byte.
    fn byte(&self, name: &str) -> CodecResult<u8> {
        let value = self
            .parameters
            .get(name)
            .and_then(ParameterValue::as_i64)
            .ok_or_else(|| CodecError::InvalidParameter(name.to_string()))?;
        checked_byte(name, value)
    }

    /// Read a hexadecimal parameter that must fit in a byte.
    fn hex_byte(&self, name: &str) -> CodecResult<u8> {
        let value = self
            .parameters
            .get(name)
            .and_then(ParameterValue::as_hex_i64)
            .ok_or_else(|| CodecError::InvalidParameter(name.to_string()))?;
        checked_byte(name, value)
    }
}

fn checked_byte(name: &str, value: i64) -> CodecResult<u8> {
    u8::try_from(value).map_err(|_| CodecError::ParameterOutOfRange {
        name: name.to_string(),
        value,
    })
}

// ============================================================================
// Encoded Frames
// ============================================================================

/// Bytes ready for base64 transport encoding. Byte 0 is the message-type code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFrame(Vec<u8>);

impl EncodedFrame {
    /// Target message-type code.
    pub fn message_code(&self) -> u8 {
        self.0[0]
    }

    /// Frame bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume into the underlying bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    /// Frame length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; a frame carries at least its code byte.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Standard (padded) base64 rendering for the transport payload.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }
}

impl AsRef<[u8]> for EncodedFrame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// ============================================================================
// Water Sensor
// ============================================================================

/// How the water sensor interprets its enable-events bits.
///
/// Firmware revisions disagree: the shipping rule sets a bit to *disable* an
/// event, an older revision sets it to enable one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnableBitPolarity {
    /// A set bit disables the event.
    #[default]
    DisableBits,
    /// A set bit enables the event.
    EnableBits,
}

impl EnableBitPolarity {
    fn pack(self, enabled: bool) -> u8 {
        match self {
            EnableBitPolarity::DisableBits => u8::from(!enabled),
            EnableBitPolarity::EnableBits => u8::from(enabled),
        }
    }

    fn unpack(self, bit: u8) -> bool {
        match self {
            EnableBitPolarity::DisableBits => bit == 0,
            EnableBitPolarity::EnableBits => bit != 0,
        }
    }
}

/// Water sensor configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaterSensorConfig {
    /// Report "water present" events.
    pub enable_water_present: bool,
    /// Report "water not present" events.
    pub enable_water_not_present: bool,
    /// Relative-resistance threshold.
    pub threshold: u8,
    /// Restoral margin.
    pub restoral: u8,
}

impl WaterSensorConfig {
    /// Validate a request's parameters.
    pub fn from_request(request: &DownlinkRequest) -> CodecResult<Self> {
        Ok(WaterSensorConfig {
            enable_water_present: request.byte("enableWaterPresent")? != 0,
            enable_water_not_present: request.byte("enableWaterNotPresent")? != 0,
            threshold: request.byte("threshold")?,
            restoral: request.byte("restoral")?,
        })
    }

    /// The packed enable-events byte.
    pub fn enable_events(&self, polarity: EnableBitPolarity) -> u8 {
        (polarity.pack(self.enable_water_present) << WATER_PRESENT_BIT)
            | (polarity.pack(self.enable_water_not_present) << WATER_NOT_PRESENT_BIT)
    }

    /// Serialize to the eight-byte wire frame.
    pub fn encode(&self, polarity: EnableBitPolarity) -> EncodedFrame {
        let mut buf = Vec::with_capacity(DOWNLINK_FRAME_LEN);
        buf.put_u8(MSG_WATER);
        buf.put_u8(self.enable_events(polarity));
        buf.put_u8(self.threshold);
        buf.put_u8(self.restoral);
        buf.put_bytes(0, DOWNLINK_FRAME_LEN - buf.len());
        EncodedFrame(buf)
    }

    /// Parse a water sensor frame back into its configuration.
    pub fn from_frame(frame: &[u8], polarity: EnableBitPolarity) -> CodecResult<Self> {
        require_frame(frame, MSG_WATER)?;
        let enable_events = frame[1];
        Ok(WaterSensorConfig {
            enable_water_present: polarity.unpack((enable_events >> WATER_PRESENT_BIT) & 1),
            enable_water_not_present: polarity
                .unpack((enable_events >> WATER_NOT_PRESENT_BIT) & 1),
            threshold: frame[2],
            restoral: frame[3],
        })
    }
}

// ============================================================================
// Air Temperature / Humidity Sensor
// ============================================================================

/// Air temperature and humidity sensor configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempHumidityConfig {
    /// Reporting mode bit field.
    pub mode: u8,
    /// Periodic reporting interval.
    pub reporting_interval: u8,
    /// Restoral margin.
    pub restoral_margin: u8,
    /// Lower temperature threshold.
    pub lower_temp_threshold: u8,
    /// Upper temperature threshold.
    pub upper_temp_threshold: u8,
    /// Lower humidity threshold.
    pub lower_humidity_threshold: u8,
    /// Upper humidity threshold.
    pub upper_humidity_threshold: u8,
}

impl TempHumidityConfig {
    /// Validate a request's parameters. `mode` is hexadecimal.
    pub fn from_request(request: &DownlinkRequest) -> CodecResult<Self> {
        Ok(TempHumidityConfig {
            mode: request.hex_byte("mode")?,
            reporting_interval: request.byte("reportingInterval")?,
            restoral_margin: request.byte("restoralMargin")?,
            lower_temp_threshold: request.byte("lowerTempThreshold")?,
            upper_temp_threshold: request.byte("upperTempThreshold")?,
            lower_humidity_threshold: request.byte("lowerHumidityThreshold")?,
            upper_humidity_threshold: request.byte("upperHumidityThreshold")?,
        })
    }

    /// Serialize to the eight-byte wire frame.
    pub fn encode(&self) -> EncodedFrame {
        let mut buf = Vec::with_capacity(DOWNLINK_FRAME_LEN);
        buf.put_u8(MSG_AIR_TEMP_HUMIDITY);
        buf.put_u8(self.mode);
        buf.put_u8(self.reporting_interval);
        buf.put_u8(self.restoral_margin);
        buf.put_u8(self.lower_temp_threshold);
        buf.put_u8(self.upper_temp_threshold);
        buf.put_u8(self.lower_humidity_threshold);
        buf.put_u8(self.upper_humidity_threshold);
        EncodedFrame(buf)
    }

    /// Parse a temperature/humidity frame back into its configuration.
    pub fn from_frame(frame: &[u8]) -> CodecResult<Self> {
        require_frame(frame, MSG_AIR_TEMP_HUMIDITY)?;
        Ok(TempHumidityConfig {
            mode: frame[1],
            reporting_interval: frame[2],
            restoral_margin: frame[3],
            lower_temp_threshold: frame[4],
            upper_temp_threshold: frame[5],
            lower_humidity_threshold: frame[6],
            upper_humidity_threshold: frame[7],
        })
    }
}

fn require_frame(frame: &[u8], code: u8) -> CodecResult<()> {
    if frame.len() < DOWNLINK_FRAME_LEN {
        return Err(CodecError::FrameTooShort {
            expected: DOWNLINK_FRAME_LEN,
            actual: frame.len(),
        });
    }
    if frame[0] != code {
        return Err(CodecError::InvalidParameter(format!(
            "frame code 0x{:02X}, expected 0x{:02X}",
            frame[0], code
        )));
    }
    Ok(())
}

// ============================================================================
// Encoder
// ============================================================================

/// Builds downlink frames from requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Encoder {
    polarity: EnableBitPolarity,
}

impl Encoder {
    /// Create an encoder using the default enable-bit polarity.
    pub fn new() -> Self {
        Encoder::default()
    }

    /// Use a specific water-sensor enable-bit polarity.
    pub fn with_polarity(polarity: EnableBitPolarity) -> Self {
        Encoder { polarity }
    }

    /// Enable-bit polarity in use.
    pub fn polarity(&self) -> EnableBitPolarity {
        self.polarity
    }

    /// Validate and encode a request.
    pub fn encode(&self, request: &DownlinkRequest) -> CodecResult<EncodedFrame> {
        let sensor_type: SensorType = request.sensor_type.parse()?;
        let frame = match sensor_type {
            SensorType::WaterSensor => {
                WaterSensorConfig::from_request(request)?.encode(self.polarity)
            }
            SensorType::TempHumiditySensor => TempHumidityConfig::from_request(request)?.encode(),
        };
        log::debug!(
            "encoded {} downlink: {:02X?}",
            sensor_type,
            frame.as_bytes()
        );
        Ok(frame)
    }
}

/// Encode a request with the default encoder.
pub fn encode(request: &DownlinkRequest) -> CodecResult<EncodedFrame> {
    Encoder::new().encode(request)
}

//! Message-type registry.
//!
//! A fixed mapping from the one-byte message-type code to a label and a
//! decode routine. Dispatch is a `match` over the closed [`MessageType`] set;
//! codes outside the set become [`MessageType::Unknown`] and decode to
//! [`DecodedEvent::Undefined`].

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::constants::*;
use crate::error::*;
use crate::events::{self, DecodedEvent};

/// Signature shared by every per-type decoder.
pub type DecodeFn = fn(&[u8]) -> CodecResult<DecodedEvent>;

/// Message types carried in byte 1 of every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    /// Device reset.
    Reset,
    /// Supervisory heartbeat.
    Supervisory,
    /// Tamper switch.
    Tamper,
    /// Door/window sensor.
    DoorWindow,
    /// Push button.
    PushButton,
    /// Dry contact.
    DryContact,
    /// Water leak.
    WaterLeak,
    /// Thermistor temperature.
    Temperature,
    /// Tilt.
    Tilt,
    /// Air temperature and humidity.
    AirTempHumidity,
    /// Accelerometer movement.
    Movement,
    /// High-precision tilt.
    HighPrecisionTilt,
    /// Ultrasonic distance.
    Ultrasonic,
    /// 4-20mA current loop.
    CurrentLoop,
    /// Thermocouple.
    Thermocouple,
    /// Voltmeter.
    Voltmeter,
    /// CMOS temperature.
    CmosTemperature,
    /// Device info.
    DeviceInfo,
    /// Link quality.
    LinkQuality,
    /// Downlink acknowledgement.
    DownlinkAck,
    /// Code with no registry entry.
    Unknown(u8),
}

impl MessageType {
    /// Classify a message-type code.
    pub fn from_code(code: u8) -> Self {
        match code {
            MSG_RESET => MessageType::Reset,
            MSG_SUPERVISORY => MessageType::Supervisory,
            MSG_TAMPER => MessageType::Tamper,
            MSG_DOOR_WINDOW => MessageType::DoorWindow,
            MSG_PUSH_BUTTON => MessageType::PushButton,
            MSG_DRY_CONTACT => MessageType::DryContact,
            MSG_WATER => MessageType::WaterLeak,
            MSG_TEMPERATURE => MessageType::Temperature,
            MSG_TILT => MessageType::Tilt,
            MSG_AIR_TEMP_HUMIDITY => MessageType::AirTempHumidity,
            MSG_MOVEMENT => MessageType::Movement,
            MSG_HIGH_PRECISION_TILT => MessageType::HighPrecisionTilt,
            MSG_ULTRASONIC => MessageType::Ultrasonic,
            MSG_CURRENT_LOOP => MessageType::CurrentLoop,
            MSG_THERMOCOUPLE => MessageType::Thermocouple,
            MSG_VOLTMETER => MessageType::Voltmeter,
            MSG_CMOS_TEMPERATURE => MessageType::CmosTemperature,
            MSG_DEVICE_INFO => MessageType::DeviceInfo,
            MSG_LINK_QUALITY => MessageType::LinkQuality,
            MSG_DOWNLINK_ACK => MessageType::DownlinkAck,
            _ => MessageType::Unknown(code),
        }
    }

    /// The wire code.
    pub fn code(&self) -> u8 {
        match self {
            MessageType::Reset => MSG_RESET,
            MessageType::Supervisory => MSG_SUPERVISORY,
            MessageType::Tamper => MSG_TAMPER,
            MessageType::DoorWindow => MSG_DOOR_WINDOW,
            MessageType::PushButton => MSG_PUSH_BUTTON,
            MessageType::DryContact => MSG_DRY_CONTACT,
            MessageType::WaterLeak => MSG_WATER,
            MessageType::Temperature => MSG_TEMPERATURE,
            MessageType::Tilt => MSG_TILT,
            MessageType::AirTempHumidity => MSG_AIR_TEMP_HUMIDITY,
            MessageType::Movement => MSG_MOVEMENT,
            MessageType::HighPrecisionTilt => MSG_HIGH_PRECISION_TILT,
            MessageType::Ultrasonic => MSG_ULTRASONIC,
            MessageType::CurrentLoop => MSG_CURRENT_LOOP,
            MessageType::Thermocouple => MSG_THERMOCOUPLE,
            MessageType::Voltmeter => MSG_VOLTMETER,
            MessageType::CmosTemperature => MSG_CMOS_TEMPERATURE,
            MessageType::DeviceInfo => MSG_DEVICE_INFO,
            MessageType::LinkQuality => MSG_LINK_QUALITY,
            MessageType::DownlinkAck => MSG_DOWNLINK_ACK,
            MessageType::Unknown(code) => *code,
        }
    }

    /// Short name, e.g. "Water Leak".
    pub fn name(&self) -> Cow<'static, str> {
        let name = match self {
            MessageType::Reset => "Reset",
            MessageType::Supervisory => "Supervisory",
            MessageType::Tamper => "Tamper",
            MessageType::DoorWindow => "Door/Window",
            MessageType::PushButton => "Push Button",
            MessageType::DryContact => "Dry Contact",
            MessageType::WaterLeak => "Water Leak",
            MessageType::Temperature => "Thermistor Temperature",
            MessageType::Tilt => "Tilt",
            MessageType::AirTempHumidity => "Air Temp/Humidity",
            MessageType::Movement => "Accelerometer Movement",
            MessageType::HighPrecisionTilt => "High-Precision Tilt",
            MessageType::Ultrasonic => "Ultrasonic",
            MessageType::CurrentLoop => "4-20mA",
            MessageType::Thermocouple => "Thermocouple",
            MessageType::Voltmeter => "Voltmeter",
            MessageType::CmosTemperature => "CMOS Temperature",
            MessageType::DeviceInfo => "Device Info",
            MessageType::LinkQuality => "Link Quality",
            MessageType::DownlinkAck => "Downlink Ack",
            MessageType::Unknown(code) => return Cow::Owned(unknown_label(*code)),
        };
        Cow::Borrowed(name)
    }

    /// Label reported in decode records, e.g. "Water Leak Sensor Event".
    pub fn label(&self) -> Cow<'static, str> {
        let label = match self {
            MessageType::Reset => "Reset Message",
            MessageType::Supervisory => "Supervisory Message",
            MessageType::Tamper => "Tamper Event",
            MessageType::DoorWindow => "Door/Window Sensor Event",
            MessageType::PushButton => "Push Button Sensor Event",
            MessageType::DryContact => "Dry Contact Sensor Event",
            MessageType::WaterLeak => "Water Leak Sensor Event",
            MessageType::Temperature => "Thermistor Temperature Sensor Event",
            MessageType::Tilt => "Tilt Sensor Event",
            MessageType::AirTempHumidity => "Air Temperature and Humidity Sensor Event",
            MessageType::Movement => "Accelerometer-based Movement Sensor Event",
            MessageType::HighPrecisionTilt => "High-precision Tilt Sensor Event",
            MessageType::Ultrasonic => "Ultrasonic Distance Sensor Event",
            MessageType::CurrentLoop => "4-20mA Current Loop Sensor Event",
            MessageType::Thermocouple => "Thermocouple Temperature Sensor Event",
            MessageType::Voltmeter => "Voltmeter Sensor Event",
            MessageType::CmosTemperature => "CMOS Temperature Sensor Event",
            MessageType::DeviceInfo => "Device Info Message",
            MessageType::LinkQuality => "Link Quality Message",
            MessageType::DownlinkAck => "Downlink Received Acknowledgement Message",
            MessageType::Unknown(code) => return Cow::Owned(unknown_label(*code)),
        };
        Cow::Borrowed(label)
    }

    /// Decode routine for this type, if one exists.
    pub fn decoder(&self) -> Option<DecodeFn> {
        let decoder: DecodeFn = match self {
            MessageType::Reset => events::decode_reset,
            MessageType::Supervisory => events::decode_supervisory,
            MessageType::Tamper => events::decode_tamper,
            MessageType::DoorWindow => events::decode_door_window,
            MessageType::PushButton => events::decode_push_button,
            MessageType::DryContact => events::decode_dry_contact,
            MessageType::WaterLeak => events::decode_water,
            MessageType::Temperature => events::decode_temperature,
            MessageType::Tilt => events::decode_tilt,
            MessageType::AirTempHumidity => events::decode_air_temp_humidity,
            MessageType::Movement => events::decode_movement,
            MessageType::HighPrecisionTilt => events::decode_high_precision_tilt,
            MessageType::Ultrasonic => events::decode_ultrasonic,
            MessageType::CurrentLoop => events::decode_current_loop,
            MessageType::Thermocouple => events::decode_thermocouple,
            MessageType::LinkQuality => events::decode_link_quality,
            MessageType::DownlinkAck => events::decode_downlink_ack,
            MessageType::Voltmeter
            | MessageType::CmosTemperature
            | MessageType::DeviceInfo
            | MessageType::Unknown(_) => return None,
        };
        Some(decoder)
    }

    /// Check whether the code has a registry entry.
    pub fn is_registered(&self) -> bool {
        !matches!(self, MessageType::Unknown(_))
    }
}

impl From<u8> for MessageType {
    fn from(code: u8) -> Self {
        MessageType::from_code(code)
    }
}

impl From<MessageType> for u8 {
    fn from(message_type: MessageType) -> Self {
        message_type.code()
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

fn unknown_label(code: u8) -> String {
    format!("Unknown ({})", code)
}

// ============================================================================
// Registry Entries
// ============================================================================

/// One registry row.
#[derive(Debug, Clone)]
pub struct MessageTypeEntry {
    /// Wire code.
    pub code: u8,
    /// Classified message type.
    pub message_type: MessageType,
    /// Label reported in decode records.
    pub label: Cow<'static, str>,
    /// Decode routine (`None` decodes to [`DecodedEvent::Undefined`]).
    pub decoder: Option<DecodeFn>,
}

impl MessageTypeEntry {
    /// Decode a payload with this entry's routine.
    pub fn decode(&self, payload: &[u8]) -> CodecResult<DecodedEvent> {
        match self.decoder {
            Some(decode) => decode(payload),
            None => {
                log::debug!("no decoder for message type {} ({})", self.code, self.label);
                Ok(DecodedEvent::Undefined)
            }
        }
    }
}

/// Look up a message-type code. Always succeeds.
pub fn lookup(code: u8) -> MessageTypeEntry {
    let message_type = MessageType::from_code(code);
    MessageTypeEntry {
        code,
        message_type,
        label: message_type.label(),
        decoder: message_type.decoder(),
    }
}

/// Iterate over every registered entry in code order.
pub fn entries() -> impl Iterator<Item = MessageTypeEntry> {
    REGISTERED_CODES.iter().map(|&code| lookup(code))
}

// ============================================================================
// Outbound Sensor Types
// ============================================================================

/// Sensor types that accept configuration downlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorType {
    /// Water leak sensor (`water_sensor`).
    WaterSensor,
    /// Air temperature and humidity sensor (`temp_humidity_sensor`).
    TempHumiditySensor,
}

impl SensorType {
    /// Wire name used in downlink requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorType::WaterSensor => SENSOR_TYPE_WATER,
            SensorType::TempHumiditySensor => SENSOR_TYPE_TEMP_HUMIDITY,
        }
    }

    /// Message type the configuration frame is tagged with.
    pub fn message_type(&self) -> MessageType {
        match self {
            SensorType::WaterSensor => MessageType::WaterLeak,
            SensorType::TempHumiditySensor => MessageType::AirTempHumidity,
        }
    }
}

impl FromStr for SensorType {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            SENSOR_TYPE_WATER => Ok(SensorType::WaterSensor),
            SENSOR_TYPE_TEMP_HUMIDITY => Ok(SensorType::TempHumiditySensor),
            other => Err(CodecError::UnsupportedSensorType(other.to_string())),
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message-type code for an outbound sensor type.
pub fn code_for(sensor_type: &str) -> CodecResult<u8> {
    let sensor_type: SensorType = sensor_type.parse()?;
    Ok(sensor_type.message_type().code())
}

//! Decoded sensor events.
//!
//! Each decoder reads fixed byte positions of the payload (the frame minus its
//! two-byte header). Decoders are pure and never read past the length they
//! check for.
//!
//! Serialized events use the human-readable keys the gateway dashboards
//! expect, with the event name under `"Event"`.

use serde::{Serialize, Serializer};

use crate::constants::*;
use crate::error::*;
use crate::tables::*;

/// A decoded uplink event, one case per supported message type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Event")]
pub enum DecodedEvent {
    /// Device reset.
    #[serde(rename = "Reset")]
    Reset {
        /// Device model.
        #[serde(rename = "Device Type")]
        device_type: &'static str,
        /// Hardware version, e.g. "v2.3".
        #[serde(rename = "Hardware Version")]
        hardware_version: String,
        /// Firmware version, e.g. "v0.18" or "v2.1.5".
        #[serde(rename = "Firmware Version")]
        firmware_version: String,
    },

    /// Supervisory heartbeat. Status flags serialize only when set.
    #[serde(rename = "Supervisory")]
    Supervisory {
        /// Battery voltage, e.g. "3.0V".
        #[serde(rename = "Battery Voltage")]
        battery_voltage: String,
        /// Event accumulation count.
        #[serde(rename = "Accumulation Count")]
        accumulation_count: u16,
        /// Tamper detected since last reset.
        #[serde(
            rename = "Tamper Since Last Reset",
            skip_serializing_if = "is_clear",
            serialize_with = "serialize_flag"
        )]
        tamper_since_reset: bool,
        /// Tamper switch currently open.
        #[serde(
            rename = "Current Tamper State",
            skip_serializing_if = "is_clear",
            serialize_with = "serialize_flag"
        )]
        current_tamper: bool,
        /// Last downlink was rejected.
        #[serde(
            rename = "Error With Last Downlink",
            skip_serializing_if = "is_clear",
            serialize_with = "serialize_flag"
        )]
        downlink_error: bool,
        /// Battery low.
        #[serde(
            rename = "Battery Low",
            skip_serializing_if = "is_clear",
            serialize_with = "serialize_flag"
        )]
        battery_low: bool,
        /// Radio communication error.
        #[serde(
            rename = "Radio Comm Error",
            skip_serializing_if = "is_clear",
            serialize_with = "serialize_flag"
        )]
        radio_comm_error: bool,
    },

    /// Tamper switch change.
    #[serde(rename = "Tamper")]
    Tamper {
        /// "Open" or "Closed".
        #[serde(rename = "State")]
        state: &'static str,
    },

    /// Door/window change.
    #[serde(rename = "Door/Window")]
    DoorWindow {
        /// "Closed" or "Open".
        #[serde(rename = "State")]
        state: &'static str,
    },

    /// Push button event.
    #[serde(rename = "Push Event")]
    PushButton {
        /// Button name, or "Undefined".
        #[serde(rename = "Button ID")]
        button_id: &'static str,
        /// Button state; absent when the ID is undefined.
        #[serde(rename = "Button State", skip_serializing_if = "Option::is_none")]
        button_state: Option<&'static str>,
    },

    /// Dry contact change.
    #[serde(rename = "Dry Contact")]
    DryContact {
        /// "Contacts Shorted" or "Contacts Opened".
        #[serde(rename = "State")]
        state: &'static str,
    },

    /// Water probe event.
    #[serde(rename = "Water")]
    Water {
        /// "Water Present" or "Water Not Present".
        #[serde(rename = "State")]
        status: &'static str,
        /// Unscaled relative resistance between probes (0-255).
        #[serde(rename = "Relative Resistance")]
        relative_resistance: u8,
    },

    /// Thermistor temperature event.
    #[serde(rename = "Temperature")]
    Temperature {
        /// Event kind.
        #[serde(rename = "Temperature Event")]
        event_kind: &'static str,
        /// Current temperature in °C.
        #[serde(rename = "Current Temperature")]
        current: i8,
        /// Relative measurement for alternate calibration tables.
        #[serde(rename = "Relative Measurement")]
        relative: i8,
    },

    /// Tilt event.
    #[serde(rename = "Tilt")]
    Tilt {
        /// Event kind.
        #[serde(rename = "Tilt Event")]
        event_kind: &'static str,
        /// Angle in degrees.
        #[serde(rename = "Tilt Angle")]
        angle: u8,
    },

    /// Air temperature and humidity event.
    #[serde(rename = "Air Temperature/Humidity")]
    AirTempHumidity {
        /// Event kind.
        #[serde(rename = "ATH Event")]
        event_kind: &'static str,
        /// Temperature in °C, one decimal.
        #[serde(rename = "Temperature")]
        temperature: f64,
        /// Relative humidity in %, one decimal.
        #[serde(rename = "Humidity")]
        humidity: f64,
    },

    /// Accelerometer movement event.
    #[serde(rename = "Acceleration-Based Movement")]
    Movement {
        /// "Movement Started" or "Movement Stopped".
        #[serde(rename = "ABM Event")]
        state: &'static str,
    },

    /// High-precision tilt event.
    #[serde(rename = "High-Precision Tilt")]
    HighPrecisionTilt {
        /// Event kind.
        #[serde(rename = "Tilt HP Event")]
        event_kind: &'static str,
        /// Angle in degrees, one decimal.
        #[serde(rename = "Angle")]
        angle: f64,
        /// Temperature in °C.
        #[serde(rename = "Temperature")]
        temperature: i8,
    },

    /// Ultrasonic level event.
    #[serde(rename = "Ultrasonic Level")]
    Ultrasonic {
        /// Event kind.
        #[serde(rename = "Ultrasonic Event")]
        event_kind: &'static str,
        /// Distance in raw sensor units.
        #[serde(rename = "Distance")]
        distance: u16,
    },

    /// 4-20mA current loop event.
    #[serde(rename = "4-20mA")]
    CurrentLoop {
        /// Event kind.
        #[serde(rename = "4-20mA Event")]
        event_kind: &'static str,
        /// Loop current in mA.
        #[serde(rename = "Current Measurement in mA")]
        current_ma: f64,
    },

    /// Thermocouple event.
    #[serde(rename = "Thermocouple")]
    Thermocouple {
        /// Event kind.
        #[serde(rename = "Thermocouple Event")]
        event_kind: &'static str,
        /// Whole degrees Celsius, serialized as "<n>C".
        #[serde(rename = "Temperature", serialize_with = "serialize_celsius")]
        temperature_c: u16,
        /// Highest-priority fault, or "" when none.
        #[serde(rename = "Fault")]
        fault: &'static str,
    },

    /// Link quality report.
    #[serde(rename = "Link Quality")]
    LinkQuality {
        /// Current sub-band.
        #[serde(rename = "Current Sub-Band")]
        sub_band: u8,
        /// RSSI of the last downlink, raw.
        #[serde(rename = "RSSI of Last Downlink")]
        rssi: u8,
        /// SNR of the last downlink, raw.
        #[serde(rename = "SNR of Last Downlink")]
        snr: u8,
    },

    /// Downlink acknowledgement.
    #[serde(rename = "Downlink Acknowledge")]
    DownlinkAck {
        /// Whether the device accepted the downlink.
        #[serde(rename = "Downlink", serialize_with = "serialize_ack")]
        valid: bool,
    },

    /// Message type without a decoder.
    #[serde(rename = "undefined")]
    Undefined,
}

impl DecodedEvent {
    /// Event name as it appears under the `"Event"` key.
    pub fn name(&self) -> &'static str {
        match self {
            DecodedEvent::Reset { .. } => "Reset",
            DecodedEvent::Supervisory { .. } => "Supervisory",
            DecodedEvent::Tamper { .. } => "Tamper",
            DecodedEvent::DoorWindow { .. } => "Door/Window",
            DecodedEvent::PushButton { .. } => "Push Event",
            DecodedEvent::DryContact { .. } => "Dry Contact",
            DecodedEvent::Water { .. } => "Water",
            DecodedEvent::Temperature { .. } => "Temperature",
            DecodedEvent::Tilt { .. } => "Tilt",
            DecodedEvent::AirTempHumidity { .. } => "Air Temperature/Humidity",
            DecodedEvent::Movement { .. } => "Acceleration-Based Movement",
            DecodedEvent::HighPrecisionTilt { .. } => "High-Precision Tilt",
            DecodedEvent::Ultrasonic { .. } => "Ultrasonic Level",
            DecodedEvent::CurrentLoop { .. } => "4-20mA",
            DecodedEvent::Thermocouple { .. } => "Thermocouple",
            DecodedEvent::LinkQuality { .. } => "Link Quality",
            DecodedEvent::DownlinkAck { .. } => "Downlink Acknowledge",
            DecodedEvent::Undefined => "undefined",
        }
    }

    /// Check if no decoder handled the frame.
    pub fn is_undefined(&self) -> bool {
        matches!(self, DecodedEvent::Undefined)
    }
}

fn is_clear(flag: &bool) -> bool {
    !*flag
}

fn serialize_flag<S: Serializer>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*flag))
}

fn serialize_celsius<S: Serializer>(degrees: &u16, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&format_args!("{}C", degrees))
}

fn serialize_ack<S: Serializer>(valid: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *valid {
        "Message Valid"
    } else {
        "Message Invalid"
    })
}

// ============================================================================
// Field Helpers
// ============================================================================

/// Two's-complement reading of a byte: values above 127 become `value - 256`.
pub fn signed_byte(value: u8) -> i8 {
    value as i8
}

/// Format a byte as "{upper nibble}.{lower nibble}".
fn nibble_pair(value: u8) -> String {
    format!("{}.{}", value >> 4, value & 0x0F)
}

/// Integer byte plus the upper nibble of the following byte in tenths.
fn fixed_point_tenths(integer: u8, fraction: u8) -> f64 {
    f64::from(integer) + f64::from(fraction >> 4) / 10.0
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn be_u16(payload: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([payload[offset], payload[offset + 1]])
}

// ============================================================================
// Decoders
// ============================================================================

/// Reset: device model, hardware and firmware versions.
pub fn decode_reset(payload: &[u8]) -> CodecResult<DecodedEvent> {
    require_len(payload, RESET_PAYLOAD_LEN)?;

    let hardware_version = format!("v{}", nibble_pair(payload[1]));

    let (fw_hi, fw_lo) = (payload[2], payload[3]);
    let firmware_version = if fw_hi & 0x80 == 0 {
        format!("v{}.{}", fw_hi, fw_lo)
    } else {
        let major = (fw_hi >> 2) & 0x1F;
        let minor = (fw_hi & 0x03) + ((fw_lo >> 5) & 0x07);
        let patch = fw_lo & 0x1F;
        format!("v{}.{}.{}", major, minor, patch)
    };

    Ok(DecodedEvent::Reset {
        device_type: device_type_name(payload[0]),
        hardware_version,
        firmware_version,
    })
}

/// Supervisory: status flags, battery voltage and accumulation count.
pub fn decode_supervisory(payload: &[u8]) -> CodecResult<DecodedEvent> {
    require_len(payload, SUPERVISORY_PAYLOAD_LEN)?;

    let status = payload[0];
    Ok(DecodedEvent::Supervisory {
        battery_voltage: format!("{}V", nibble_pair(payload[2])),
        accumulation_count: be_u16(payload, 7),
        tamper_since_reset: status & SUPERVISORY_TAMPER_SINCE_RESET != 0,
        current_tamper: status & SUPERVISORY_CURRENT_TAMPER != 0,
        downlink_error: status & SUPERVISORY_DOWNLINK_ERROR != 0,
        battery_low: status & SUPERVISORY_BATTERY_LOW != 0,
        radio_comm_error: status & SUPERVISORY_RADIO_COMM_ERROR != 0,
    })
}

/// Tamper switch state.
pub fn decode_tamper(payload: &[u8]) -> CodecResult<DecodedEvent> {
    require_len(payload, STATE_PAYLOAD_LEN)?;
    Ok(DecodedEvent::Tamper {
        state: two_state(&TAMPER_STATES, payload[0]),
    })
}

/// Door/window state.
pub fn decode_door_window(payload: &[u8]) -> CodecResult<DecodedEvent> {
    require_len(payload, STATE_PAYLOAD_LEN)?;
    Ok(DecodedEvent::DoorWindow {
        state: two_state(&DOOR_WINDOW_STATES, payload[0]),
    })
}

/// Push button ID and state. An undefined ID stops before the state byte.
pub fn decode_push_button(payload: &[u8]) -> CodecResult<DecodedEvent> {
    require_len(payload, STATE_PAYLOAD_LEN)?;

    let Some(button_id) = button_id_name(payload[0]) else {
        return Ok(DecodedEvent::PushButton {
            button_id: UNDEFINED,
            button_state: None,
        });
    };

    require_len(payload, PUSH_BUTTON_PAYLOAD_LEN)?;
    Ok(DecodedEvent::PushButton {
        button_id,
        button_state: Some(describe(&BUTTON_STATES, payload[1])),
    })
}

/// Dry contact state.
pub fn decode_dry_contact(payload: &[u8]) -> CodecResult<DecodedEvent> {
    require_len(payload, STATE_PAYLOAD_LEN)?;
    Ok(DecodedEvent::DryContact {
        state: two_state(&DRY_CONTACT_STATES, payload[0]),
    })
}

/// Water status and unscaled relative resistance.
pub fn decode_water(payload: &[u8]) -> CodecResult<DecodedEvent> {
    require_len(payload, WATER_PAYLOAD_LEN)?;
    Ok(DecodedEvent::Water {
        status: two_state(&WATER_STATES, payload[0]),
        relative_resistance: payload[1],
    })
}

/// Thermistor event with signed current and relative readings.
pub fn decode_temperature(payload: &[u8]) -> CodecResult<DecodedEvent> {
    require_len(payload, TEMPERATURE_PAYLOAD_LEN)?;
    Ok(DecodedEvent::Temperature {
        event_kind: describe(&TEMPERATURE_EVENTS, payload[0]),
        current: signed_byte(payload[1]),
        relative: signed_byte(payload[2]),
    })
}

/// Tilt event and angle.
pub fn decode_tilt(payload: &[u8]) -> CodecResult<DecodedEvent> {
    require_len(payload, TILT_PAYLOAD_LEN)?;
    Ok(DecodedEvent::Tilt {
        event_kind: describe(&TILT_EVENTS, payload[0]),
        angle: payload[1],
    })
}

/// Air temperature and humidity, each an integer byte plus a tenths nibble.
///
/// Temperature is sign-magnitude: bit 7 of the integer byte is the sign.
pub fn decode_air_temp_humidity(payload: &[u8]) -> CodecResult<DecodedEvent> {
    require_len(payload, AIR_TEMP_HUMIDITY_PAYLOAD_LEN)?;

    let magnitude = fixed_point_tenths(payload[1] & 0x7F, payload[2]);
    let temperature = if payload[1] & 0x80 != 0 {
        -magnitude
    } else {
        magnitude
    };

    Ok(DecodedEvent::AirTempHumidity {
        event_kind: describe(&AIR_TEMP_HUMIDITY_EVENTS, payload[0]),
        temperature: round_tenths(temperature),
        humidity: round_tenths(fixed_point_tenths(payload[3], payload[4])),
    })
}

/// Accelerometer movement started/stopped.
pub fn decode_movement(payload: &[u8]) -> CodecResult<DecodedEvent> {
    require_len(payload, STATE_PAYLOAD_LEN)?;
    Ok(DecodedEvent::Movement {
        state: two_state(&MOVEMENT_STATES, payload[0]),
    })
}

/// High-precision tilt: angle with a tenths byte, signed temperature.
pub fn decode_high_precision_tilt(payload: &[u8]) -> CodecResult<DecodedEvent> {
    require_len(payload, HIGH_PRECISION_TILT_PAYLOAD_LEN)?;
    Ok(DecodedEvent::HighPrecisionTilt {
        event_kind: describe(&HIGH_PRECISION_TILT_EVENTS, payload[0]),
        angle: round_tenths(f64::from(payload[1]) + f64::from(payload[2]) / 10.0),
        temperature: signed_byte(payload[3]),
    })
}

/// Ultrasonic distance in raw units.
pub fn decode_ultrasonic(payload: &[u8]) -> CodecResult<DecodedEvent> {
    require_len(payload, MEASUREMENT_PAYLOAD_LEN)?;
    Ok(DecodedEvent::Ultrasonic {
        event_kind: describe(&ULTRASONIC_EVENTS, payload[0]),
        distance: be_u16(payload, 1),
    })
}

/// 4-20mA loop current, hundredths of a mA on the wire.
pub fn decode_current_loop(payload: &[u8]) -> CodecResult<DecodedEvent> {
    require_len(payload, MEASUREMENT_PAYLOAD_LEN)?;
    Ok(DecodedEvent::CurrentLoop {
        event_kind: describe(&ANALOG_EVENTS, payload[0]),
        current_ma: f64::from(be_u16(payload, 1)) / 100.0,
    })
}

/// Thermocouple temperature (sixteenths of a degree on the wire) and faults.
pub fn decode_thermocouple(payload: &[u8]) -> CodecResult<DecodedEvent> {
    require_len(payload, THERMOCOUPLE_PAYLOAD_LEN)?;
    Ok(DecodedEvent::Thermocouple {
        event_kind: describe(&ANALOG_EVENTS, payload[0]),
        temperature_c: be_u16(payload, 1) / 16,
        fault: thermocouple_fault(payload[3]),
    })
}

/// Link quality, passed through untransformed.
pub fn decode_link_quality(payload: &[u8]) -> CodecResult<DecodedEvent> {
    require_len(payload, LINK_QUALITY_PAYLOAD_LEN)?;
    Ok(DecodedEvent::LinkQuality {
        sub_band: payload[0],
        rssi: payload[1],
        snr: payload[2],
    })
}

/// Downlink acknowledgement: 1 means the downlink was rejected.
pub fn decode_downlink_ack(payload: &[u8]) -> CodecResult<DecodedEvent> {
    require_len(payload, STATE_PAYLOAD_LEN)?;
    Ok(DecodedEvent::DownlinkAck {
        valid: payload[0] != 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    #[test]
    fn test_reset_format_zero() {
        let event = decode_reset(&[0x01, 0x23, 0x00, 0x12]).unwrap();
        assert_eq!(
            event,
            DecodedEvent::Reset {
                device_type: "Door/Window Sensor",
                hardware_version: "v2.3".to_string(),
                firmware_version: "v0.18".to_string(),
            }
        );
    }

    #[test]
    fn test_reset_format_one() {
        // byte2 = 1_00010_01: major 2, minor bits 1; byte3 = 010_00101: +2, patch 5
        let event = decode_reset(&[0x0A, 0x10, 0b1000_1001, 0b0100_0101]).unwrap();
        match event {
            DecodedEvent::Reset {
                device_type,
                firmware_version,
                ..
            } => {
                assert_eq!(device_type, "Water Sensor");
                assert_eq!(firmware_version, "v2.3.5");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_reset_unknown_device() {
        let event = decode_reset(&[0x7F, 0x00, 0x01, 0x00]).unwrap();
        assert!(matches!(
            event,
            DecodedEvent::Reset {
                device_type: DEVICE_UNDEFINED,
                ..
            }
        ));
    }

    #[test]
    fn test_supervisory_flags_only_when_set() {
        let payload = [0b0001_0010, 0x00, 0x30, 0, 0, 0, 0, 0x01, 0x02];
        let event = decode_supervisory(&payload).unwrap();
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({
                "Event": "Supervisory",
                "Battery Voltage": "3.0V",
                "Accumulation Count": 258,
                "Tamper Since Last Reset": 1,
                "Battery Low": 1,
            })
        );
    }

    #[test]
    fn test_supervisory_all_flags() {
        let payload = [0x1F, 0x00, 0x29, 0, 0, 0, 0, 0xFF, 0xFF];
        let event = decode_supervisory(&payload).unwrap();
        assert_eq!(
            event,
            DecodedEvent::Supervisory {
                battery_voltage: "2.9V".to_string(),
                accumulation_count: 65535,
                tamper_since_reset: true,
                current_tamper: true,
                downlink_error: true,
                battery_low: true,
                radio_comm_error: true,
            }
        );
    }

    #[test]
    fn test_supervisory_too_short() {
        assert_eq!(
            decode_supervisory(&[0; 8]),
            Err(CodecError::PayloadTooShort {
                expected: 9,
                actual: 8
            })
        );
    }

    #[test]
    fn test_two_state_decoders() {
        assert_eq!(
            decode_tamper(&[0]).unwrap(),
            DecodedEvent::Tamper { state: "Open" }
        );
        assert_eq!(
            decode_door_window(&[0]).unwrap(),
            DecodedEvent::DoorWindow { state: "Closed" }
        );
        assert_eq!(
            decode_dry_contact(&[1]).unwrap(),
            DecodedEvent::DryContact {
                state: "Contacts Opened"
            }
        );
        assert_eq!(
            decode_movement(&[0]).unwrap(),
            DecodedEvent::Movement {
                state: "Movement Started"
            }
        );
    }

    #[test]
    fn test_push_button() {
        assert_eq!(
            decode_push_button(&[0x01, 0x00]).unwrap(),
            DecodedEvent::PushButton {
                button_id: "Button 1 (Right)",
                button_state: Some("Pressed"),
            }
        );
        assert_eq!(
            decode_push_button(&[0x12, 0x02]).unwrap(),
            DecodedEvent::PushButton {
                button_id: "Both Buttons",
                button_state: Some("Held"),
            }
        );
        assert_eq!(
            decode_push_button(&[0x03, 0x09]).unwrap(),
            DecodedEvent::PushButton {
                button_id: "Single Button",
                button_state: Some(UNDEFINED),
            }
        );
    }

    #[test]
    fn test_push_button_undefined_id_ignores_state() {
        // One byte is enough when the ID is reserved
        let event = decode_push_button(&[0x05]).unwrap();
        assert_eq!(
            event,
            DecodedEvent::PushButton {
                button_id: UNDEFINED,
                button_state: None,
            }
        );
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"Event": "Push Event", "Button ID": "Undefined"})
        );
    }

    #[test]
    fn test_push_button_valid_id_needs_state() {
        assert_eq!(
            decode_push_button(&[0x02]),
            Err(CodecError::PayloadTooShort {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_water() {
        assert_eq!(
            decode_water(&[0x00, 0x05]).unwrap(),
            DecodedEvent::Water {
                status: "Water Present",
                relative_resistance: 5,
            }
        );
        assert_eq!(
            decode_water(&[0x01, 0xFF]).unwrap(),
            DecodedEvent::Water {
                status: "Water Not Present",
                relative_resistance: 255,
            }
        );
    }

    #[test]
    fn test_temperature_sign_extension() {
        assert_eq!(
            decode_temperature(&[0x01, 0xFB, 0x19]).unwrap(),
            DecodedEvent::Temperature {
                event_kind: "Above Upper Threshold",
                current: -5,
                relative: 25,
            }
        );
        assert_eq!(signed_byte(127), 127);
        assert_eq!(signed_byte(128), -128);
        assert_eq!(signed_byte(255), -1);
    }

    #[test]
    fn test_tilt() {
        assert_eq!(
            decode_tilt(&[0x03, 45]).unwrap(),
            DecodedEvent::Tilt {
                event_kind: "Report-on-Change Toward Horizontal",
                angle: 45,
            }
        );
        assert_eq!(
            decode_tilt(&[0x04, 0]).unwrap(),
            DecodedEvent::Tilt {
                event_kind: UNDEFINED,
                angle: 0,
            }
        );
    }

    #[test]
    fn test_air_temp_humidity() {
        let event = decode_air_temp_humidity(&[0x00, 0x17, 0x50, 0x2D, 0x30]).unwrap();
        match event {
            DecodedEvent::AirTempHumidity {
                event_kind,
                temperature,
                humidity,
            } => {
                assert_eq!(event_kind, "Periodic Report");
                assert_relative_eq!(temperature, 23.5);
                assert_relative_eq!(humidity, 45.3);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_air_temp_humidity_negative() {
        let event = decode_air_temp_humidity(&[0x02, 0x85, 0x20, 0x10, 0x00]).unwrap();
        match event {
            DecodedEvent::AirTempHumidity {
                event_kind,
                temperature,
                humidity,
            } => {
                assert_eq!(event_kind, "Temperature Below Lower Threshold");
                assert_relative_eq!(temperature, -5.2);
                assert_relative_eq!(humidity, 16.0);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_high_precision_tilt() {
        let event = decode_high_precision_tilt(&[0x01, 12, 7, 0xF6]).unwrap();
        match event {
            DecodedEvent::HighPrecisionTilt {
                event_kind,
                angle,
                temperature,
            } => {
                assert_eq!(event_kind, "Vertical Transition");
                assert_relative_eq!(angle, 12.7);
                assert_eq!(temperature, -10);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_measurement_decoders() {
        assert_eq!(
            decode_ultrasonic(&[0x01, 0x01, 0x2C]).unwrap(),
            DecodedEvent::Ultrasonic {
                event_kind: "Distance has Risen Above Upper Threshold",
                distance: 300,
            }
        );

        match decode_current_loop(&[0x00, 0x04, 0xB0]).unwrap() {
            DecodedEvent::CurrentLoop { current_ma, .. } => {
                assert_relative_eq!(current_ma, 12.0)
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_thermocouple() {
        // 0x0190 = 400 sixteenths = 25C
        let event = decode_thermocouple(&[0x04, 0x01, 0x90, 0x00]).unwrap();
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "Event": "Thermocouple",
                "Thermocouple Event": "Report on Change Decrease",
                "Temperature": "25C",
                "Fault": "",
            })
        );

        let event = decode_thermocouple(&[0x00, 0x01, 0x9F, 0b0000_0101]).unwrap();
        assert_eq!(
            event,
            DecodedEvent::Thermocouple {
                event_kind: "Periodic Report",
                temperature_c: 25,
                fault: "Thermocouple temperature is too low",
            }
        );
    }

    #[test]
    fn test_link_quality_and_ack() {
        assert_eq!(
            decode_link_quality(&[2, 0xB5, 0x07]).unwrap(),
            DecodedEvent::LinkQuality {
                sub_band: 2,
                rssi: 0xB5,
                snr: 7,
            }
        );
        assert_eq!(
            serde_json::to_value(decode_downlink_ack(&[0x01]).unwrap()).unwrap(),
            json!({"Event": "Downlink Acknowledge", "Downlink": "Message Invalid"})
        );
        assert_eq!(
            decode_downlink_ack(&[0x00]).unwrap(),
            DecodedEvent::DownlinkAck { valid: true }
        );
        assert_eq!(
            decode_downlink_ack(&[0x02]).unwrap(),
            DecodedEvent::DownlinkAck { valid: true }
        );
    }

    #[test]
    fn test_undefined_serializes_marker() {
        assert_eq!(
            serde_json::to_value(DecodedEvent::Undefined).unwrap(),
            json!({"Event": "undefined"})
        );
        assert!(DecodedEvent::Undefined.is_undefined());
    }
}

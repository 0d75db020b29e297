//! Protocol constants
//!
//! Message-type codes, header layout and per-type payload sizes used by the
//! Radio Bridge sensor uplink and downlink frames.

// ============================================================================
// Frame Header
// ============================================================================

/// Length of the frame header (version/counter byte + message-type byte).
pub const HEADER_LEN: usize = 2;
/// Shift applied to byte 0 to obtain the protocol version.
pub const PROTOCOL_VERSION_SHIFT: u8 = 4;
/// Mask applied to byte 0 to obtain the packet counter.
pub const PACKET_COUNTER_MASK: u8 = 0x0F;

// ============================================================================
// Message-Type Codes (sensor → network)
// ============================================================================

/// Device reset / power-up report.
pub const MSG_RESET: u8 = 0x00;
/// Periodic supervisory (heartbeat) report.
pub const MSG_SUPERVISORY: u8 = 0x01;
/// Enclosure tamper switch change.
pub const MSG_TAMPER: u8 = 0x02;
/// Door/window magnet sensor change.
pub const MSG_DOOR_WINDOW: u8 = 0x03;
/// Push button event.
pub const MSG_PUSH_BUTTON: u8 = 0x06;
/// Dry contact change.
pub const MSG_DRY_CONTACT: u8 = 0x07;
/// Water leak sensor event.
pub const MSG_WATER: u8 = 0x08;
/// Thermistor temperature event.
pub const MSG_TEMPERATURE: u8 = 0x09;
/// Tilt sensor event.
pub const MSG_TILT: u8 = 0x0A;
/// Air temperature and humidity event.
pub const MSG_AIR_TEMP_HUMIDITY: u8 = 0x0D;
/// Accelerometer-based movement event.
pub const MSG_MOVEMENT: u8 = 0x0E;
/// High-precision tilt event.
pub const MSG_HIGH_PRECISION_TILT: u8 = 0x0F;
/// Ultrasonic distance event.
pub const MSG_ULTRASONIC: u8 = 0x10;
/// 4-20mA current loop event.
pub const MSG_CURRENT_LOOP: u8 = 0x11;
/// Thermocouple temperature event.
pub const MSG_THERMOCOUPLE: u8 = 0x13;
/// Voltmeter event (labelled only).
pub const MSG_VOLTMETER: u8 = 0x14;
/// CMOS temperature event (labelled only).
pub const MSG_CMOS_TEMPERATURE: u8 = 0x19;
/// Device info message (labelled only).
pub const MSG_DEVICE_INFO: u8 = 0xFA;
/// Link quality report.
pub const MSG_LINK_QUALITY: u8 = 0xFB;
/// Downlink received acknowledgement.
pub const MSG_DOWNLINK_ACK: u8 = 0xFF;

/// Every code with a registry entry, in ascending order.
pub const REGISTERED_CODES: [u8; 20] = [
    MSG_RESET,
    MSG_SUPERVISORY,
    MSG_TAMPER,
    MSG_DOOR_WINDOW,
    MSG_PUSH_BUTTON,
    MSG_DRY_CONTACT,
    MSG_WATER,
    MSG_TEMPERATURE,
    MSG_TILT,
    MSG_AIR_TEMP_HUMIDITY,
    MSG_MOVEMENT,
    MSG_HIGH_PRECISION_TILT,
    MSG_ULTRASONIC,
    MSG_CURRENT_LOOP,
    MSG_THERMOCOUPLE,
    MSG_VOLTMETER,
    MSG_CMOS_TEMPERATURE,
    MSG_DEVICE_INFO,
    MSG_LINK_QUALITY,
    MSG_DOWNLINK_ACK,
];

// ============================================================================
// Minimum Payload Lengths (bytes after the header)
// ============================================================================

/// Reset: device type, hardware version, two firmware bytes.
pub const RESET_PAYLOAD_LEN: usize = 4;
/// Supervisory: status byte through the 16-bit accumulation count.
pub const SUPERVISORY_PAYLOAD_LEN: usize = 9;
/// Single state byte (tamper, door/window, contact, movement, ack).
pub const STATE_PAYLOAD_LEN: usize = 1;
/// Push button with a valid ID: ID byte and state byte.
pub const PUSH_BUTTON_PAYLOAD_LEN: usize = 2;
/// Water: status and relative resistance.
pub const WATER_PAYLOAD_LEN: usize = 2;
/// Thermistor: event kind, current and relative readings.
pub const TEMPERATURE_PAYLOAD_LEN: usize = 3;
/// Tilt: event kind and angle.
pub const TILT_PAYLOAD_LEN: usize = 2;
/// Air temperature/humidity: event kind and two fixed-point pairs.
pub const AIR_TEMP_HUMIDITY_PAYLOAD_LEN: usize = 5;
/// High-precision tilt: event kind, angle, angle fraction, temperature.
pub const HIGH_PRECISION_TILT_PAYLOAD_LEN: usize = 4;
/// Event kind plus a 16-bit big-endian measurement.
pub const MEASUREMENT_PAYLOAD_LEN: usize = 3;
/// Thermocouple: event kind, 16-bit temperature, fault mask.
pub const THERMOCOUPLE_PAYLOAD_LEN: usize = 4;
/// Link quality: sub-band, RSSI, SNR.
pub const LINK_QUALITY_PAYLOAD_LEN: usize = 3;

// ============================================================================
// Supervisory Status Bits
// ============================================================================

/// Tamper detected since last reset.
pub const SUPERVISORY_TAMPER_SINCE_RESET: u8 = 1 << 4;
/// Tamper switch currently open.
pub const SUPERVISORY_CURRENT_TAMPER: u8 = 1 << 3;
/// Last downlink could not be applied.
pub const SUPERVISORY_DOWNLINK_ERROR: u8 = 1 << 2;
/// Battery low.
pub const SUPERVISORY_BATTERY_LOW: u8 = 1 << 1;
/// Radio communication error.
pub const SUPERVISORY_RADIO_COMM_ERROR: u8 = 1 << 0;

// ============================================================================
// Downlink Frames
// ============================================================================

/// Every configuration downlink is eight bytes, code included.
pub const DOWNLINK_FRAME_LEN: usize = 8;
/// Bit in the water-sensor enable byte for the "water present" event.
pub const WATER_PRESENT_BIT: u8 = 1;
/// Bit in the water-sensor enable byte for the "water not present" event.
pub const WATER_NOT_PRESENT_BIT: u8 = 0;

/// Wire name of the water sensor downlink target.
pub const SENSOR_TYPE_WATER: &str = "water_sensor";
/// Wire name of the air temperature/humidity downlink target.
pub const SENSOR_TYPE_TEMP_HUMIDITY: &str = "temp_humidity_sensor";

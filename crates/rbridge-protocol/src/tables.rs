//! Auxiliary lookup tables used by the event decoders.
//!
//! The device-model table here is distinct from the message-type registry:
//! a Reset frame reports which hardware model rebooted, while the registry
//! classifies the frame itself.

/// Fallback description for any index outside its table.
pub const UNDEFINED: &str = "Undefined";

/// Fallback device model for unknown Reset device-type codes.
pub const DEVICE_UNDEFINED: &str = "Device Undefined";

// ============================================================================
// Device Models (Reset frames)
// ============================================================================

/// Device model codes reported in Reset frames.
pub const DEVICE_TYPES: [(u8, &str); 26] = [
    (0x01, "Door/Window Sensor"),
    (0x02, "Door/Window High Security"),
    (0x03, "Contact Sensor"),
    (0x04, "No-Probe Temperature Sensor"),
    (0x05, "External-Probe Temperature Sensor"),
    (0x06, "Single Push Button"),
    (0x07, "Dual Push Button"),
    (0x08, "Acceleration-Based Movement Sensor"),
    (0x09, "Tilt Sensor"),
    (0x0A, "Water Sensor"),
    (0x0B, "Tank Level Float Sensor"),
    (0x0C, "Glass Break Sensor"),
    (0x0D, "Ambient Light Sensor"),
    (0x0E, "Air Temperature and Humidity Sensor"),
    (0x0F, "High-Precision Tilt Sensor"),
    (0x10, "Ultrasonic Level Sensor"),
    (0x11, "4-20mA Current Loop Sensor"),
    (0x12, "Ext-Probe Air Temp and Humidity Sensor"),
    (0x13, "Thermocouple Temperature Sensor"),
    (0x14, "Voltage Sensor"),
    (0x15, "Custom Sensor"),
    (0x16, "GPS"),
    (0x17, "Honeywell 5800 Bridge"),
    (0x18, "Magnetometer"),
    (0x19, "Vibration Sensor - Low Frequency"),
    (0x1A, "Vibration Sensor - High Frequency"),
];

/// Look up a device model by its Reset device-type code.
pub fn device_type_name(code: u8) -> &'static str {
    DEVICE_TYPES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or(DEVICE_UNDEFINED)
}

// ============================================================================
// Push Button
// ============================================================================

/// Button IDs indexed by the decimal reading of the ID byte. `None` slots are reserved.
pub const BUTTON_IDS: [Option<&str>; 13] = [
    None,
    Some("Button 1 (Right)"),
    Some("Button 2 (Left)"),
    Some("Single Button"),
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    Some("Both Buttons"),
];

/// Button states.
pub const BUTTON_STATES: [&str; 3] = ["Pressed", "Released", "Held"];

/// Resolve a push-button ID byte.
///
/// The firmware writes button IDs as two decimal digits (`0x12` is button 12,
/// "Both Buttons"), so each nibble must be 0-9. Returns `None` for reserved,
/// non-decimal or out-of-range IDs.
pub fn button_id_name(id: u8) -> Option<&'static str> {
    let (tens, units) = (id >> 4, id & 0x0F);
    if tens > 9 || units > 9 {
        return None;
    }
    let index = usize::from(tens * 10 + units);
    BUTTON_IDS.get(index).copied().flatten()
}

// ============================================================================
// Event-Kind Enumerations
// ============================================================================

/// Thermistor temperature event kinds.
pub const TEMPERATURE_EVENTS: [&str; 6] = [
    "Periodic Report",
    "Above Upper Threshold",
    "Below Lower Threshold",
    "Change Increase",
    "Change Decrease",
    "Fault",
];

/// Tilt event kinds.
pub const TILT_EVENTS: [&str; 4] = [
    "Transitioned to Vertical",
    "Transitioned to Horizontal",
    "Report-on-Change Toward Vertical",
    "Report-on-Change Toward Horizontal",
];

/// High-precision tilt event kinds.
pub const HIGH_PRECISION_TILT_EVENTS: [&str; 5] = [
    "Periodic Report",
    "Vertical Transition",
    "Horizontal Transition",
    "Change Toward Vertical",
    "Change Toward Horizontal",
];

/// Air temperature/humidity event kinds.
pub const AIR_TEMP_HUMIDITY_EVENTS: [&str; 9] = [
    "Periodic Report",
    "Temperature Above Upper Threshold",
    "Temperature Below Lower Threshold",
    "Temperature Change Increase",
    "Temperature Change Decrease",
    "Humidity Above Upper Threshold",
    "Humidity Below Lower Threshold",
    "Humidity Change Increase",
    "Humidity Change Decrease",
];

/// Ultrasonic level event kinds.
pub const ULTRASONIC_EVENTS: [&str; 5] = [
    "Periodic Report",
    "Distance has Risen Above Upper Threshold",
    "Distance has Fallen Below Lower Threshold",
    "Report-on-Change Increase",
    "Report-on-Change Decrease",
];

/// 4-20mA and thermocouple event kinds share one wording.
pub const ANALOG_EVENTS: [&str; 5] = [
    "Periodic Report",
    "Analog Value has Risen Above Upper Threshold",
    "Analog Value has Fallen Below Lower Threshold",
    "Report on Change Increase",
    "Report on Change Decrease",
];

/// Index into an enumeration, falling back to [`UNDEFINED`].
pub fn describe(table: &[&'static str], index: u8) -> &'static str {
    table.get(usize::from(index)).copied().unwrap_or(UNDEFINED)
}

// ============================================================================
// Two-State Sensors (index 0 is the zero byte, index 1 any other value)
// ============================================================================

/// Tamper switch.
pub const TAMPER_STATES: [&str; 2] = ["Open", "Closed"];
/// Door/window magnet.
pub const DOOR_WINDOW_STATES: [&str; 2] = ["Closed", "Open"];
/// Dry contact.
pub const DRY_CONTACT_STATES: [&str; 2] = ["Contacts Shorted", "Contacts Opened"];
/// Water probe.
pub const WATER_STATES: [&str; 2] = ["Water Present", "Water Not Present"];
/// Accelerometer movement.
pub const MOVEMENT_STATES: [&str; 2] = ["Movement Started", "Movement Stopped"];

/// Pick the zero or non-zero wording of a two-state table.
pub fn two_state(table: &[&'static str; 2], value: u8) -> &'static str {
    if value == 0 {
        table[0]
    } else {
        table[1]
    }
}

// ============================================================================
// Thermocouple Faults
// ============================================================================

/// Fault descriptions ordered from bit 7 down to bit 0.
pub const THERMOCOUPLE_FAULTS: [&str; 8] = [
    "The cold-Junction temperature is outside of the normal operating range",
    "The hot junction temperature is outside of the normal operating range",
    "The cold-Junction temperature is at or above than the cold-junction temperature high threshold",
    "The Cold-Junction temperature is lower than the cold-junction temperature low threshold",
    "The thermocouple temperature is too high",
    "Thermocouple temperature is too low",
    "The input voltage is negative or greater than VDD",
    "An open circuit such as broken thermocouple wires has been detected",
];

/// Describe the highest-priority fault in a thermocouple fault mask.
///
/// Only the most significant set bit is reported; an empty mask yields "".
pub fn thermocouple_fault(mask: u8) -> &'static str {
    if mask == 0 {
        return "";
    }
    let bit = mask.leading_zeros() as usize;
    THERMOCOUPLE_FAULTS[bit]
}

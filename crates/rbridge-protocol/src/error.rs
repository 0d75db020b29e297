//! Codec error types.

use thiserror::Error;

/// Errors that can occur while decoding or encoding sensor frames.
///
/// An unrecognized message-type code is not an error; it decodes to
/// [`DecodedEvent::Undefined`](crate::DecodedEvent::Undefined).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Frame is shorter than the two-byte header.
    #[error("frame too short: expected at least {expected} bytes, got {actual}")]
    FrameTooShort {
        /// Expected minimum length.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },

    /// Payload is shorter than the fields its message type must read.
    #[error("payload too short: expected at least {expected} bytes, got {actual}")]
    PayloadTooShort {
        /// Expected minimum payload length.
        expected: usize,
        /// Actual payload length.
        actual: usize,
    },

    /// Transport text is not valid base64.
    #[error("invalid base64 payload: {0}")]
    Base64Decode(String),

    /// Transport message is not valid JSON or lacks required fields.
    #[error("invalid transport message: {0}")]
    InvalidJson(String),

    /// Downlink target has no outbound mapping.
    #[error("unsupported sensor type: {0}")]
    UnsupportedSensorType(String),

    /// Downlink parameter is missing or not numeric.
    #[error("invalid or missing parameter: {0}")]
    InvalidParameter(String),

    /// Downlink parameter does not fit in a byte.
    #[error("parameter {name} out of range (0-255): {value}")]
    ParameterOutOfRange {
        /// Parameter name.
        name: String,
        /// Offending value.
        value: i64,
    },
}

/// Result type alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Fail with [`CodecError::PayloadTooShort`] unless `payload` holds `expected` bytes.
pub(crate) fn require_len(payload: &[u8], expected: usize) -> CodecResult<()> {
    if payload.len() < expected {
        return Err(CodecError::PayloadTooShort {
            expected,
            actual: payload.len(),
        });
    }
    Ok(())
}

use crate::types::{DecodeError, DeviceTime, BATTERY_LEVELS};

/// Raw coordinate units per degree (minutes * 30000 * 60).
pub const COORDINATE_SCALE: f64 = 1_800_000.0;

/// Fraction digits of a formatted coordinate.
pub const COORDINATE_PRECISION: usize = 7;

fn check_bounds(buffer: &[u8], buffer_index: usize, length: usize) -> Result<(), DecodeError> {
    if buffer_index + length > buffer.len() {
        return Err(DecodeError::OutOfBounds {
            buffer_index,
            length,
            buffer_len: buffer.len(),
        });
    }
    Ok(())
}

/// Borrows `length` raw bytes from the buffer at the specified position.
///
/// # Parameters
/// - `buffer`: The input byte slice.
/// - `buffer_index`: The starting position of the span.
/// - `length`: The number of bytes to borrow.
///
/// # Returns
/// The borrowed span and the next position in the buffer after it.
pub fn decode_bytes(
    buffer: &[u8],
    buffer_index: usize,
    length: usize,
) -> Result<(&[u8], usize), DecodeError> {
    check_bounds(buffer, buffer_index, length)?;
    Ok((
        &buffer[buffer_index..buffer_index + length],
        buffer_index + length,
    ))
}

/// Decodes a single unsigned byte.
pub fn decode_u8(buffer: &[u8], buffer_index: usize) -> Result<(u8, usize), DecodeError> {
    check_bounds(buffer, buffer_index, 1)?;
    Ok((buffer[buffer_index], buffer_index + 1))
}

/// Decodes a big-endian 16-bit unsigned integer.
pub fn decode_u16_be(buffer: &[u8], buffer_index: usize) -> Result<(u16, usize), DecodeError> {
    check_bounds(buffer, buffer_index, 2)?;
    let mut value_bytes = [0u8; 2];
    value_bytes.copy_from_slice(&buffer[buffer_index..buffer_index + 2]);
    Ok((u16::from_be_bytes(value_bytes), buffer_index + 2))
}

/// Decodes a big-endian 32-bit unsigned integer.
///
/// # Parameters
/// - `buffer`: The input byte slice containing the encoded integer.
/// - `buffer_index`: The starting position in the buffer to read the integer from.
///
/// # Returns
/// The decoded value and the next position in the buffer after the four bytes.
pub fn decode_u32_be(buffer: &[u8], buffer_index: usize) -> Result<(u32, usize), DecodeError> {
    check_bounds(buffer, buffer_index, 4)?;
    let mut value_bytes = [0u8; 4];
    value_bytes.copy_from_slice(&buffer[buffer_index..buffer_index + 4]);
    Ok((u32::from_be_bytes(value_bytes), buffer_index + 4))
}

/// Decodes the six date/time bytes of a location packet.
///
/// Each byte is taken as a plain unsigned value, not as packed BCD digits.
pub fn decode_device_time(
    buffer: &[u8],
    buffer_index: usize,
) -> Result<(DeviceTime, usize), DecodeError> {
    check_bounds(buffer, buffer_index, 6)?;
    let mut time_bytes = [0u8; 6];
    time_bytes.copy_from_slice(&buffer[buffer_index..buffer_index + 6]);
    Ok((DeviceTime::from_bytes(time_bytes), buffer_index + 6))
}

/// Converts a raw coordinate into signed decimal degrees.
///
/// A zero coordinate stays `0.0` in the negative hemispheres.
pub fn decode_coordinate(raw: u32, positive: bool) -> f64 {
    let degrees = raw as f64 / COORDINATE_SCALE;
    if positive || raw == 0 {
        degrees
    } else {
        -degrees
    }
}

/// Formats decimal degrees with exactly seven fraction digits.
pub fn format_coordinate(degrees: f64) -> String {
    format!("{:.*}", COORDINATE_PRECISION, degrees)
}

/// Looks up the battery percentage for a heartbeat voltage level.
///
/// Levels outside the table give an empty string.
pub fn battery_level(voltage_level: u8) -> &'static str {
    BATTERY_LEVELS
        .get(voltage_level as usize)
        .copied()
        .unwrap_or("")
}

/// Renders bytes as uppercase hex without separators.
pub fn encode_hex_upper(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

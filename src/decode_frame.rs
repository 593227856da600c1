use crate::decode_basics::{decode_u16_be, decode_u8};
use crate::types::{DecodeError, FrameHeader, StartMarker, MARKER_SIZE, MIN_FRAME_SIZE, TRAILER_SIZE};

/// Validates the framing of a GT06 buffer before any payload byte is interpreted.
///
/// The start marker decides whether the length field is one byte (`0x78 0x78`)
/// or two big-endian bytes (`0x79 0x79`). The declared packet length plus
/// marker, length field and trailer must equal the buffer length exactly.
///
/// # Parameters
/// - `buffer`: One complete frame, already decoded from hex.
///
/// # Returns
/// The marker kind, the position of the protocol number and the declared packet length.
pub fn decode_frame_header(buffer: &[u8]) -> Result<FrameHeader, DecodeError> {
    if buffer.len() < MIN_FRAME_SIZE {
        return Err(DecodeError::TooShort {
            actual: buffer.len(),
        });
    }

    let marker_bytes = [buffer[0], buffer[1]];
    let marker =
        StartMarker::from_bytes(marker_bytes).ok_or(DecodeError::UnknownStartMarker(marker_bytes))?;

    let (packet_length, payload_start) = match marker {
        StartMarker::Short => {
            let (length, pos) = decode_u8(buffer, MARKER_SIZE)?;
            (length as usize, pos)
        }
        StartMarker::Extended => {
            let (length, pos) = decode_u16_be(buffer, MARKER_SIZE)?;
            (length as usize, pos)
        }
    };

    let expected = MARKER_SIZE + marker.length_field_size() + packet_length + TRAILER_SIZE;
    if expected != buffer.len() {
        return Err(DecodeError::LengthMismatch {
            expected,
            actual: buffer.len(),
        });
    }

    Ok(FrameHeader {
        marker,
        payload_start,
        packet_length,
    })
}

/// Checks if the buffer starts with one of the GT06 start markers.
///
/// Only the marker is looked at; use [`decode_frame_header`] for full validation.
pub fn is_gt06_frame(buffer: &[u8]) -> bool {
    buffer.len() >= MARKER_SIZE && StartMarker::from_bytes([buffer[0], buffer[1]]).is_some()
}

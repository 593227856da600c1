use log::{debug, trace, warn};

use crate::decode_basics::*;
use crate::types::{
    CourseStatus, DecodeError, DecodeOutcome, FrameHeader, Hemisphere, ProtocolNumber, Record,
    RecordKind, TerminalInfo, ALARM_TRACKER,
};

/// Protocol number, serial number and checksum around the info content.
const PACKET_OVERHEAD: usize = 1 + 2 + 2;
/// Serial number and checksum following the info content.
const SERIAL_AND_CHECKSUM_SIZE: usize = 4;

/// Minimum info length carrying a terminal ID.
pub const LOGIN_INFO_LENGTH: usize = 8;
/// Minimum info length carrying date, position and speed.
pub const LOCATION_POSITION_LENGTH: usize = 16;
/// Minimum info length also carrying the course/status word.
pub const LOCATION_STATUS_LENGTH: usize = 18;
/// Minimum info length of a heartbeat.
pub const HEARTBEAT_INFO_LENGTH: usize = 5;

const LATITUDE_LIMIT: f64 = 90.0;
const LONGITUDE_LIMIT: f64 = 180.0;

/// Decodes the terminal ID of a login packet into `record.imei`.
///
/// Info content shorter than eight bytes leaves the IMEI empty.
pub fn decode_login(record: &mut Record, info: &[u8]) -> Result<(), DecodeError> {
    record.kind = RecordKind::Login;
    if info.len() < LOGIN_INFO_LENGTH {
        record.outcome = DecodeOutcome::Partial;
        return Ok(());
    }

    let (terminal_id, _) = decode_bytes(info, 0, LOGIN_INFO_LENGTH)?;
    record.imei = encode_hex_upper(terminal_id);
    Ok(())
}

/// Decodes a location packet into `record`.
///
/// Info layout:
/// - 0..6: year (since 2000), month, day, hour, minute, second
/// - 6: GPS info length / satellite count (not decoded)
/// - 7..11: latitude, 11..15: longitude (raw units, see [`COORDINATE_SCALE`])
/// - 15: speed in km/h
/// - 16..18: course/status word
///
/// With 16 or 17 bytes only the date, unsigned coordinates and speed are set.
pub fn decode_location(record: &mut Record, info: &[u8]) -> Result<(), DecodeError> {
    record.kind = RecordKind::Location;
    if info.len() < LOCATION_POSITION_LENGTH {
        record.outcome = DecodeOutcome::Partial;
        return Ok(());
    }

    let (time, new_pos) = decode_device_time(info, 0)?;
    record.timestamp = time.to_string();

    // skip gps info byte
    let new_pos = new_pos + 1;

    let (lat_raw, new_pos) = decode_u32_be(info, new_pos)?;
    let (lon_raw, new_pos) = decode_u32_be(info, new_pos)?;

    let (speed, new_pos) = decode_u8(info, new_pos)?;
    record.speed = speed;
    record.alarm = ALARM_TRACKER.to_string();

    if info.len() < LOCATION_STATUS_LENGTH {
        let lat_ok = apply_coordinate(
            &mut record.latitude,
            &mut record.latitude_hemisphere,
            lat_raw,
            None,
            LATITUDE_LIMIT,
        );
        let lon_ok = apply_coordinate(
            &mut record.longitude,
            &mut record.longitude_hemisphere,
            lon_raw,
            None,
            LONGITUDE_LIMIT,
        );
        debug!("location without course/status word (lat ok: {lat_ok}, lon ok: {lon_ok})");
        record.outcome = DecodeOutcome::Partial;
        return Ok(());
    }

    let (course_high, new_pos) = decode_u8(info, new_pos)?;
    let (course_low, _) = decode_u8(info, new_pos)?;
    let status = CourseStatus::from_bytes(course_high, course_low);

    record.direction = status.direction;
    record.gps = status.fix_code().to_string();

    let lat_ok = apply_coordinate(
        &mut record.latitude,
        &mut record.latitude_hemisphere,
        lat_raw,
        Some(status.latitude),
        LATITUDE_LIMIT,
    );
    let lon_ok = apply_coordinate(
        &mut record.longitude,
        &mut record.longitude_hemisphere,
        lon_raw,
        Some(status.longitude),
        LONGITUDE_LIMIT,
    );
    if !(lat_ok && lon_ok) {
        record.outcome = DecodeOutcome::Partial;
    }
    Ok(())
}

/// Writes a formatted coordinate and its hemisphere label.
///
/// Without a hemisphere the unsigned magnitude is written and the label stays empty.
/// Returns `false` and leaves both fields untouched when the value is out of range.
fn apply_coordinate(
    value: &mut String,
    label: &mut String,
    raw: u32,
    hemisphere: Option<Hemisphere>,
    limit: f64,
) -> bool {
    let positive = hemisphere.map_or(true, Hemisphere::is_positive);
    let degrees = decode_coordinate(raw, positive);
    if degrees.abs() > limit {
        warn!("coordinate {degrees} out of range (raw {raw:#010X}, limit {limit})");
        return false;
    }

    *value = format_coordinate(degrees);
    if let Some(hemisphere) = hemisphere {
        *label = hemisphere.label().to_string();
    }
    true
}

/// Decodes the terminal information and voltage level of a heartbeat into `record`.
pub fn decode_heartbeat(record: &mut Record, info: &[u8]) -> Result<(), DecodeError> {
    record.kind = RecordKind::Heartbeat;
    if info.len() < HEARTBEAT_INFO_LENGTH {
        record.outcome = DecodeOutcome::Partial;
        return Ok(());
    }

    let (terminal_info, new_pos) = decode_u8(info, 0)?;
    let (voltage_level, _) = decode_u8(info, new_pos)?;

    record.acc = TerminalInfo::from_byte(terminal_info).acc_label().to_string();
    record.battery_level = battery_level(voltage_level).to_string();
    Ok(())
}

/// Decodes the payload of a validated frame.
///
/// Reads the protocol number, slices the info content, steps over the serial
/// number and checksum (present but not verified) and dispatches on the
/// protocol number. Unknown protocol numbers give a default record without error.
///
/// # Parameters
/// - `buffer`: The complete frame.
/// - `header`: The result of [`crate::decode_frame::decode_frame_header`] for this buffer.
///
/// # Returns
/// The decoded record, or an error if the packet length cannot hold its fixed fields.
pub fn decode_gt06_payload(buffer: &[u8], header: &FrameHeader) -> Result<Record, DecodeError> {
    let (protocol_byte, new_pos) = decode_u8(buffer, header.payload_start)?;

    let info_length = header
        .packet_length
        .checked_sub(PACKET_OVERHEAD)
        .ok_or(DecodeError::PacketTooShort {
            packet_length: header.packet_length,
        })?;
    let (info, new_pos) = decode_bytes(buffer, new_pos, info_length)?;
    let (_serial_and_checksum, _) = decode_bytes(buffer, new_pos, SERIAL_AND_CHECKSUM_SIZE)?;

    debug!("protocol {protocol_byte:#04X}, info length {info_length}");

    let mut record = Record::default();
    match ProtocolNumber::from(protocol_byte) {
        ProtocolNumber::Login => decode_login(&mut record, info)?,
        ProtocolNumber::Location => decode_location(&mut record, info)?,
        ProtocolNumber::Heartbeat => decode_heartbeat(&mut record, info)?,
        ProtocolNumber::Other(other) => {
            trace!("unsupported protocol number {other:#04X}");
            record.kind = RecordKind::Unsupported(other);
        }
    }
    Ok(record)
}

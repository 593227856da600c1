use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Size of the start marker at the head of every frame.
pub const MARKER_SIZE: usize = 2;
/// Size of the stop bytes (`0x0D 0x0A`) at the tail of every frame.
pub const TRAILER_SIZE: usize = 2;
/// Smallest buffer that can hold a marker, a length field and a trailer.
pub const MIN_FRAME_SIZE: usize = 5;

/// Value of `alarm` for every record that carried a location.
pub const ALARM_TRACKER: &str = "tracker";

/// Battery percentage strings indexed by the heartbeat voltage level.
pub const BATTERY_LEVELS: [&str; 7] = ["0", "10", "20", "40", "60", "80", "100"];

/// Start marker of a GT06 frame. The marker decides the width of the length field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartMarker {
    /// `0x78 0x78`, followed by a 1-byte length
    Short,
    /// `0x79 0x79`, followed by a 2-byte big-endian length
    Extended,
}

impl StartMarker {
    pub fn from_bytes(bytes: [u8; 2]) -> Option<Self> {
        match bytes {
            [0x78, 0x78] => Some(StartMarker::Short),
            [0x79, 0x79] => Some(StartMarker::Extended),
            _ => None,
        }
    }

    pub fn to_bytes(self) -> [u8; 2] {
        match self {
            StartMarker::Short => [0x78, 0x78],
            StartMarker::Extended => [0x79, 0x79],
        }
    }

    /// Number of bytes used by the packet length field after this marker.
    pub fn length_field_size(self) -> usize {
        match self {
            StartMarker::Short => 1,
            StartMarker::Extended => 2,
        }
    }
}

/// Result of validating the framing of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub marker: StartMarker,
    /// Position of the protocol number, right after the length field
    pub payload_start: usize,
    /// Declared packet length (protocol number + info + serial + checksum)
    pub packet_length: usize,
}

/// Protocol numbers understood by the payload decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolNumber {
    Login,
    Location,
    Heartbeat,
    Other(u8),
}

impl From<u8> for ProtocolNumber {
    fn from(byte: u8) -> Self {
        match byte {
            0x01 => ProtocolNumber::Login,
            0x12 => ProtocolNumber::Location,
            0x13 => ProtocolNumber::Heartbeat,
            other => ProtocolNumber::Other(other),
        }
    }
}

impl ProtocolNumber {
    pub fn to_byte(self) -> u8 {
        match self {
            ProtocolNumber::Login => 0x01,
            ProtocolNumber::Location => 0x12,
            ProtocolNumber::Heartbeat => 0x13,
            ProtocolNumber::Other(byte) => byte,
        }
    }
}

/// What kind of frame produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordKind {
    /// The line could not be decoded as a frame
    #[default]
    Invalid,
    Login,
    Location,
    Heartbeat,
    /// Well-formed frame with a protocol number this decoder does not handle
    Unsupported(u8),
}

/// How much of a record could be derived from its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeOutcome {
    #[default]
    Success,
    /// The frame was valid but its info content was too short for some fields
    Partial,
    /// The line was rejected; `Record::error` says why
    Failed,
}

/// Hemisphere of a coordinate, selected by the course/status bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    pub fn label(self) -> &'static str {
        match self {
            Hemisphere::North => "N",
            Hemisphere::South => "S",
            Hemisphere::East => "E",
            Hemisphere::West => "W",
        }
    }

    /// North and East are positive in signed decimal degrees.
    pub fn is_positive(self) -> bool {
        matches!(self, Hemisphere::North | Hemisphere::East)
    }
}

/// Course and status word of a location packet (2 bytes).
///
/// Layout of the high byte:
/// - bit 4 (`0x10`): GPS fix
/// - bit 3 (`0x08`): longitude hemisphere, set = East
/// - bit 2 (`0x04`): latitude hemisphere, set = North
/// - bits 0-1: upper two bits of the course
///
/// The low byte holds the lower eight bits of the course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseStatus {
    /// Course in degrees (0-1023)
    pub direction: u16,
    pub gps_fixed: bool,
    pub latitude: Hemisphere,
    pub longitude: Hemisphere,
}

impl CourseStatus {
    pub fn from_bytes(high: u8, low: u8) -> Self {
        CourseStatus {
            direction: (((high & 0x03) as u16) << 8) | low as u16,
            gps_fixed: (high & 0x10) != 0,
            latitude: if (high & 0x04) != 0 {
                Hemisphere::North
            } else {
                Hemisphere::South
            },
            // TODO: confirm the polarity of bit 3 against real device captures
            longitude: if (high & 0x08) != 0 {
                Hemisphere::East
            } else {
                Hemisphere::West
            },
        }
    }

    /// `"F"` for a fixed position, `"A"` otherwise.
    pub fn fix_code(&self) -> &'static str {
        if self.gps_fixed {
            "F"
        } else {
            "A"
        }
    }
}

/// Terminal information byte of a heartbeat packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TerminalInfo {
    pub raw: u8,
    /// Bit 1 (`0x02`): ignition (ACC) high
    pub acc_on: bool,
}

impl TerminalInfo {
    pub fn from_byte(byte: u8) -> Self {
        TerminalInfo {
            raw: byte,
            acc_on: (byte & 0x02) != 0,
        }
    }

    pub fn acc_label(&self) -> &'static str {
        if self.acc_on {
            "on"
        } else {
            "off"
        }
    }
}

/// Date and time of a location packet, one plain unsigned byte per field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeviceTime {
    /// Years since 2000
    pub year: u8,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DeviceTime {
    pub fn from_bytes(bytes: [u8; 6]) -> Self {
        DeviceTime {
            year: bytes[0],
            month: bytes[1],
            day: bytes[2],
            hour: bytes[3],
            minute: bytes[4],
            second: bytes[5],
        }
    }

    pub fn full_year(&self) -> u16 {
        2000 + self.year as u16
    }

    /// Calendar value of the timestamp, `None` when the device sent an impossible date or time.
    pub fn to_naive_datetime(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(
            self.full_year() as i32,
            self.month as u32,
            self.day as u32,
        )?
        .and_hms_opt(self.hour as u32, self.minute as u32, self.second as u32)
    }
}

impl fmt::Display for DeviceTime {
    /// Renders the raw fields as `YYYY-MM-DD HH:MM:SS` without calendar validation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.full_year(),
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second
        )
    }
}

/// One decoded line. Every field not set by a decoder keeps its empty default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /** Fix status: "F" fixed, "A" no fix */
    pub gps: String,
    /** Signed decimal degrees with 7 fraction digits */
    pub latitude: String,
    /** Signed decimal degrees with 7 fraction digits */
    pub longitude: String,
    /** "N" or "S" */
    pub latitude_hemisphere: String,
    /** "E" or "W" */
    pub longitude_hemisphere: String,
    /** Speed in km/h */
    pub speed: u8,
    /** Terminal ID as 16 uppercase hex digits */
    pub imei: String,
    /** Device time as "YYYY-MM-DD HH:MM:SS" */
    pub timestamp: String,
    pub alarm: String,
    /** Ignition state: "on" or "off" */
    pub acc: String,
    /** Course in degrees (0-1023) */
    pub direction: u16,
    /** Battery percentage */
    pub battery_level: String,
    /** Why the line could not be decoded, including the line itself */
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
    #[serde(skip)]
    pub kind: RecordKind,
    #[serde(skip)]
    pub outcome: DecodeOutcome,
}

impl Record {
    /// Placeholder for a line that could not be decoded.
    pub fn failed(line: &str, err: &DecodeError) -> Self {
        Record {
            error: Some(format!("failed to decode line: {} ({})", line, err)),
            kind: RecordKind::Invalid,
            outcome: DecodeOutcome::Failed,
            ..Default::default()
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// All records of one batch, plus the first IMEI seen among them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub imei: String,
    #[serde(rename = "pacotes")]
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("invalid hex text: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("frame too short: {actual} bytes, need at least 5")]
    TooShort { actual: usize },

    #[error("unknown start marker {0:02X?}")]
    UnknownStartMarker([u8; 2]),

    #[error("length mismatch: header declares {expected} bytes, buffer holds {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("packet length {packet_length} cannot hold protocol number, serial and checksum")]
    PacketTooShort { packet_length: usize },

    #[error("attempt to read {length} bytes at {buffer_index} exceeds buffer length {buffer_len}")]
    OutOfBounds {
        buffer_index: usize,
        length: usize,
        buffer_len: usize,
    },
}

/// Rejections of a whole request body, raised before any line is decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("request body is empty")]
    EmptyBody,

    #[error("request body of {size} bytes exceeds the limit of {limit} bytes")]
    PayloadTooLarge { size: usize, limit: usize },
}

impl RequestError {
    /// HTTP status an embedding web service should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            RequestError::EmptyBody => 400,
            RequestError::PayloadTooLarge { .. } => 413,
        }
    }
}



#[cfg(test)]
mod record_tests {
    use super::*;

    #[test]
    fn test_record_wire_field_names() {
        let record = Record {
            battery_level: "60".to_string(),
            latitude_hemisphere: "N".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        let object = json.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "acc",
                "alarm",
                "batteryLevel",
                "direction",
                "gps",
                "imei",
                "latitude",
                "latitudeHemisphere",
                "longitude",
                "longitudeHemisphere",
                "speed",
                "timestamp",
            ]
        );
        assert_eq!(object["speed"], serde_json::json!(0));
        assert_eq!(object["batteryLevel"], serde_json::json!("60"));
    }

    #[test]
    fn test_failed_record_carries_line() {
        let record = Record::failed(" 787801 ", &DecodeError::TooShort { actual: 3 });
        assert!(record.is_failed());
        assert_eq!(record.outcome, DecodeOutcome::Failed);
        assert_eq!(record.kind, RecordKind::Invalid);
        assert!(record.error.as_deref().unwrap().contains(" 787801 "));

        let json = serde_json::to_value(&record).unwrap();
        assert!(json["error"].as_str().unwrap().starts_with("failed to decode line"));
    }

    #[test]
    fn test_batch_result_serializes_pacotes() {
        let batch = BatchResult {
            imei: "0102030405060708".to_string(),
            records: vec![Record::default()],
        };
        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(json["imei"], "0102030405060708");
        assert_eq!(json["pacotes"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_request_error_status_codes() {
        assert_eq!(RequestError::EmptyBody.status_code(), 400);
        let err = RequestError::PayloadTooLarge {
            size: 200,
            limit: 100,
        };
        assert_eq!(err.status_code(), 413);
    }
}

use log::warn;

use crate::decode_frame::decode_frame_header;
use crate::decode_gt06::decode_gt06_payload;
use crate::types::{DecodeError, Record};

/// Strips surrounding whitespace and embedded spaces, and upper-cases the hex digits.
pub fn normalize_line(line: &str) -> String {
    line.trim().replace(' ', "").to_uppercase()
}

/// Decodes one hex line into a record, reporting why it failed.
pub fn decode_hex_frame(line: &str) -> Result<Record, DecodeError> {
    let buffer = hex::decode(normalize_line(line))?;
    let header = decode_frame_header(&buffer)?;
    decode_gt06_payload(&buffer, &header)
}

/// Decodes one hex line into a record.
///
/// Never fails: a line that cannot be decoded yields a default record whose
/// `error` embeds the original, untrimmed line.
pub fn decode_line(line: &str) -> Record {
    match decode_hex_frame(line) {
        Ok(record) => record,
        Err(err) => {
            warn!("failed to decode line {line:?}: {err}");
            Record::failed(line, &err)
        }
    }
}

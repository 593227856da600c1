use log::info;

use crate::decode_line::decode_line;
use crate::types::{BatchResult, Record};

/// Splits a body on line breaks (`\n` or `\r\n`) and drops lines that are blank after trimming.
pub fn non_blank_lines(body: &str) -> impl Iterator<Item = &str> {
    body.lines().filter(|line| !line.trim().is_empty())
}

/// Decodes every non-blank line of a body, one record per line, in input order.
pub fn decode_flat(body: &str) -> Vec<Record> {
    non_blank_lines(body).map(decode_line).collect()
}

/// First non-empty IMEI among the records, or an empty string.
pub fn first_imei(records: &[Record]) -> String {
    records
        .iter()
        .map(|record| record.imei.as_str())
        .find(|imei| !imei.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Decodes a body and groups its records under the first IMEI they carry.
///
/// Later records never replace the batch IMEI, even with a different value.
/// Records keep their own fields as decoded; no IMEI is copied into them.
pub fn decode_batch(body: &str) -> BatchResult {
    let records = decode_flat(body);
    let imei = first_imei(&records);

    let failed = records.iter().filter(|record| record.is_failed()).count();
    info!(
        "decoded {} lines ({} failed), imei {:?}",
        records.len(),
        failed,
        imei
    );

    BatchResult { imei, records }
}

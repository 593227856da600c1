mod common;

use common::*;
use gt06_decoder::types::{DecodeOutcome, RecordKind};
use gt06_decoder::{decode_batch, decode_flat};

#[test]
fn test_batch_imei_from_login() {
    let body = format!("{LOGIN_0102}\n{LOCATION_SOUTH_WEST}\n{HEARTBEAT}\n");
    let batch = decode_batch(&body);

    assert_eq!(batch.imei, "0102030405060708");
    assert_eq!(batch.records.len(), 3);
    assert_eq!(batch.records[0].kind, RecordKind::Login);
    assert_eq!(batch.records[1].kind, RecordKind::Location);
    assert_eq!(batch.records[2].kind, RecordKind::Heartbeat);

    // the batch IMEI is not copied into the records
    assert_eq!(batch.records[1].imei, "");
    assert_eq!(batch.records[2].imei, "");
}

#[test]
fn test_batch_first_imei_wins() {
    let body = format!("{HEARTBEAT}\r\n{LOGIN}\r\n{LOGIN_0102}\r\n");
    let batch = decode_batch(&body);
    assert_eq!(batch.imei, "0123456789012345");
    assert_eq!(batch.records[2].imei, "0102030405060708");
}

#[test]
fn test_batch_without_login_has_empty_imei() {
    let body = format!("{HEARTBEAT}\n{LOCATION_NORTH_EAST}");
    let batch = decode_batch(&body);
    assert_eq!(batch.imei, "");
    assert_eq!(batch.records.len(), 2);
}

#[test]
fn test_blank_lines_do_not_shift_records() {
    let body = format!("\n   \n{LOGIN}\n\t\n\r\n{HEARTBEAT}\n  \n{LOCATION_SOUTH_WEST}\n\n");
    let records = decode_flat(&body);
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].kind, RecordKind::Login);
    assert_eq!(records[1].kind, RecordKind::Heartbeat);
    assert_eq!(records[2].kind, RecordKind::Location);
}

#[test]
fn test_failed_lines_keep_their_place() {
    let body = format!("{LOGIN}\nnot a frame\n787801\n{HEARTBEAT}");
    let batch = decode_batch(&body);

    assert_eq!(batch.records.len(), 4);
    assert_eq!(batch.imei, "0123456789012345");
    assert_eq!(batch.records[1].outcome, DecodeOutcome::Failed);
    assert!(batch.records[1]
        .error
        .as_deref()
        .unwrap()
        .contains("not a frame"));
    assert_eq!(batch.records[2].outcome, DecodeOutcome::Failed);
    assert_eq!(batch.records[3].battery_level, "60");
}

#[test]
fn test_one_record_per_non_blank_line() {
    let lines = [
        LOGIN,
        "zz",
        LOCATION_WITH_LBS,
        UNSUPPORTED_PROTOCOL,
        LOCATION_NO_STATUS,
        "7878",
        HEARTBEAT_UNKNOWN_VOLTAGE,
    ];
    let records = decode_flat(&lines.join("\n"));
    assert_eq!(records.len(), lines.len());

    let failed: Vec<bool> = records.iter().map(|record| record.is_failed()).collect();
    assert_eq!(failed, vec![false, true, false, false, false, true, false]);
}

#[test]
fn test_grouped_json_shape() {
    let body = format!("{LOGIN_0102}\n{LOCATION_SOUTH_WEST}\n{HEARTBEAT}");
    let json = serde_json::to_value(decode_batch(&body)).unwrap();

    assert_eq!(json["imei"], "0102030405060708");
    let pacotes = json["pacotes"].as_array().unwrap();
    assert_eq!(pacotes.len(), 3);

    assert_eq!(
        pacotes[1],
        serde_json::json!({
            "gps": "F",
            "latitude": "-23.5505000",
            "longitude": "-46.6333000",
            "latitudeHemisphere": "S",
            "longitudeHemisphere": "W",
            "speed": 60,
            "imei": "",
            "timestamp": "2024-10-15 12:30:45",
            "alarm": "tracker",
            "acc": "",
            "direction": 300,
            "batteryLevel": "",
        })
    );
    assert!(pacotes[2].get("error").is_none());
}

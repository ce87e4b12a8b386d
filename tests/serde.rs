#![cfg(feature = "serde")]

use serde::{Deserialize, Serialize};

use compact_timestamp::Timestamp;

#[derive(Serialize, Deserialize)]
struct Event {
    name: String,
    ts: Timestamp,
}

#[test]
fn test_json_string_repr() {
    let ts = Timestamp::parse("20140403 10:11:02.294930");

    let json = serde_json::to_string(&ts).unwrap();
    assert_eq!(json, "\"20140403 10:11:02.294930000\"");

    let back: Timestamp = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ts);
}

#[test]
fn test_json_accepts_both_formats() {
    let compact: Timestamp = serde_json::from_str("\"20140403 10:11:02.294930\"").unwrap();
    let iso: Timestamp = serde_json::from_str("\"2014-04-03T10:11:02.294930Z\"").unwrap();

    assert_eq!(compact, iso);
}

#[test]
fn test_json_accepts_integer_nanos() {
    let ts: Timestamp = serde_json::from_str("1396519862294930000").unwrap();

    assert_eq!(ts.epoch_seconds(), 1_396_519_862);
    assert_eq!(ts.microsecond(), 294_930);
}

#[test]
fn test_json_nested() {
    let event = Event {
        name: "some_event".to_owned(),
        ts: Timestamp::parse("2014-04-03T10:11:02.294930Z"),
    };

    let json = serde_json::to_string(&event).unwrap();
    let back: Event = serde_json::from_str(&json).unwrap();

    assert_eq!(back.ts, event.ts);
}

#[test]
fn test_cbor_binary_repr() {
    let event = Event {
        name: "some_event".to_owned(),
        ts: Timestamp::from_parts(1_396_519_862, 294_930_000),
    };

    let mut buf = Vec::new();
    ciborium::ser::into_writer(&event, &mut buf).unwrap();

    let back: Event = ciborium::de::from_reader(&buf[..]).unwrap();
    assert_eq!(back.ts, event.ts);
}

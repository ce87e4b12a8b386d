use compact_timestamp::Timestamp;
use quickcheck::quickcheck;

#[test]
fn test_bad_inputs() {
    Timestamp::parse("9999\u{1}\u{2}\u{12}UT\u{1}92-+?!\\\0");
    Timestamp::parse("9999\u{1}\u{2}\u{12};T\u{1}50-+#333");
    Timestamp::parse_bytes(b"\xff\xff\xff\xff\xff\xff\xff\xff\xff\xff\xff\xff\xff\xff\xff\xff\xff\xff\xff\xff\xff\xff\xff\xff");
    Timestamp::parse_bytes(b"0000-00-00T00:00:00.000000Z");
}

quickcheck! {
    /// Any byte sequence parses to some valid instant.
    fn parse_is_total(data: Vec<u8>) -> bool {
        let ts = Timestamp::parse_bytes(&data);

        ts.nanosecond() < 1_000_000_000 && ts.format().len() == 27
    }

    /// from_parts accepts any raw pair and normalizes the fraction.
    fn from_parts_is_total(secs: i64, nanos: i64) -> bool {
        Timestamp::from_parts(secs, nanos).nanosecond() < 1_000_000_000
    }

    /// The lazy decoder agrees with the `time` crate over its whole range.
    fn decode_matches_time_crate(secs: i32) -> bool {
        let ts = Timestamp::from_parts(secs as i64, 0);
        let odt = match time::OffsetDateTime::from_unix_timestamp(secs as i64) {
            Ok(odt) => odt,
            Err(_) => return true,
        };

        ts.year() == odt.year()
            && ts.month() == odt.month() as u8
            && ts.day() == odt.day()
            && ts.hour() == odt.hour()
            && ts.minute() == odt.minute()
            && ts.second() == odt.second()
    }

    /// Compact and ISO renderings of a microsecond-resolution instant parse
    /// back to the same instant.
    fn micros_round_trip(secs: u32, micros: u32) -> bool {
        let ts = Timestamp::from_parts(secs as i64, (micros % 1_000_000) as i64 * 1_000);

        Timestamp::parse(&ts.format_microseconds()) == ts
            && Timestamp::parse(&ts.format_iso8601()) == ts
    }

    /// Nanosecond renderings round-trip exactly.
    fn nanos_round_trip(secs: u32, nanos: u32) -> bool {
        let ts = Timestamp::from_parts(secs as i64, (nanos % 1_000_000_000) as i64);

        Timestamp::parse(&ts.format()) == ts
    }

    /// Diffs agree with the raw projections.
    fn diff_matches_projection(a_secs: i32, a_nanos: u32, b_secs: i32, b_nanos: u32) -> bool {
        let a = Timestamp::from_parts(a_secs as i64, (a_nanos % 1_000_000_000) as i64);
        let b = Timestamp::from_parts(b_secs as i64, (b_nanos % 1_000_000_000) as i64);

        a.diff_nanoseconds(&b) == a.epoch_nanoseconds() - b.epoch_nanoseconds()
    }
}

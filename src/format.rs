//! Fixed-width timestamp rendering.
//!
//! Each format starts from a byte template and overwrites the numeric fields
//! in place at fixed positions, mirroring the parser's position table. Digits
//! are written two at a time through a small lookup table.

use crate::calendar::Calendar;
use crate::formats::{CompactMicroseconds, CompactNanoseconds, Iso8601};
use crate::ts_str::TimestampStr;

static LOOKUP: [[u8; 2]; 100] = {
    let mut table = [[0; 2]; 100];

    let mut i: u8 = 0;
    while i < 100 {
        let (a, b) = (i / 10, i % 10);
        table[i as usize] = [a + b'0', b + b'0'];
        i += 1;
    }

    table
};

/// Displayed calendar year, pinned into the fixed 4-digit field.
#[inline]
fn display_year(cal: Calendar) -> u32 {
    let year = 1900 + cal.year as i32;

    if unlikely!(!(0..=9_999).contains(&year)) {
        // fixed-width output has no room for a sign or a fifth digit
        return if year < 0 { 0 } else { 9_999 };
    }

    year as u32
}

/// Write `value` as `LEN` zero-padded decimal digits at `pos`.
macro_rules! put {
    ($buf:expr, $pos:expr, $len:expr, $value:expr) => {{
        let mut value: u32 = $value;
        let mut len: usize = $len;
        let buf = &mut $buf[$pos..$pos + $len];

        // two digits per iteration; the trip count is known, so this unrolls
        while len >= 2 {
            let d = (value % 100) as usize;
            value /= 100;

            let e = LOOKUP[d];
            len -= 1;
            buf[len] = e[1];
            len -= 1;
            buf[len] = e[0];
        }

        if len == 1 {
            buf[0] = (value % 10) as u8 + b'0';
        }
    }};
}

#[allow(unused_assignments)]
pub(crate) fn format_compact_nanos(cal: Calendar, nanos: u32) -> CompactNanoseconds {
    let mut buf = *b"00000000 00:00:00.000000000";

    put!(buf, 0, 4, display_year(cal));
    put!(buf, 4, 2, cal.month as u32 + 1);
    put!(buf, 6, 2, cal.day as u32);
    put!(buf, 9, 2, cal.hour as u32);
    put!(buf, 12, 2, cal.minute as u32);
    put!(buf, 15, 2, cal.second as u32);
    put!(buf, 18, 9, nanos);

    TimestampStr(buf)
}

#[allow(unused_assignments)]
pub(crate) fn format_compact_micros(cal: Calendar, nanos: u32) -> CompactMicroseconds {
    let mut buf = *b"00000000 00:00:00.000000";

    put!(buf, 0, 4, display_year(cal));
    put!(buf, 4, 2, cal.month as u32 + 1);
    put!(buf, 6, 2, cal.day as u32);
    put!(buf, 9, 2, cal.hour as u32);
    put!(buf, 12, 2, cal.minute as u32);
    put!(buf, 15, 2, cal.second as u32);
    put!(buf, 18, 6, nanos / 1_000);

    TimestampStr(buf)
}

#[allow(unused_assignments)]
pub(crate) fn format_iso8601(cal: Calendar, nanos: u32) -> Iso8601 {
    let mut buf = *b"0000-00-00T00:00:00.000000Z";

    put!(buf, 0, 4, display_year(cal));
    put!(buf, 5, 2, cal.month as u32 + 1);
    put!(buf, 8, 2, cal.day as u32);
    put!(buf, 11, 2, cal.hour as u32);
    put!(buf, 14, 2, cal.minute as u32);
    put!(buf, 17, 2, cal.second as u32);
    put!(buf, 20, 6, nanos / 1_000);

    TimestampStr(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar;

    #[test]
    fn test_epoch_templates() {
        let cal = calendar::decode(0);

        assert_eq!(format_compact_nanos(cal, 0), "19700101 00:00:00.000000000");
        assert_eq!(format_compact_micros(cal, 0), "19700101 00:00:00.000000");
        assert_eq!(format_iso8601(cal, 0), "1970-01-01T00:00:00.000000Z");
    }

    #[test]
    fn test_known_vector() {
        let cal = calendar::decode(1_396_519_862);

        assert_eq!(
            format_compact_nanos(cal, 294_930_000),
            "20140403 10:11:02.294930000"
        );
        assert_eq!(
            format_compact_micros(cal, 294_930_000),
            "20140403 10:11:02.294930"
        );
        assert_eq!(
            format_iso8601(cal, 294_930_000),
            "2014-04-03T10:11:02.294930Z"
        );
    }

    #[test]
    fn test_year_pinning() {
        let mut cal = calendar::decode(0);

        cal.year = i16::MIN;
        assert!(format_iso8601(cal, 0).starts_with("0000-"));

        cal.year = i16::MAX;
        assert!(format_iso8601(cal, 0).starts_with("9999-"));
    }
}

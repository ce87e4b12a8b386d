//! Fixed-width, position-addressed timestamp parsing.
//!
//! Two accepted shapes, discriminated by length and the byte at position 4:
//!
//! ```text
//! compact:  YYYYMMDD HH:MM:SS.FFFFFF[FFF]
//! index:    0123456789...      18
//! iso8601:  YYYY-MM-DDTHH:MM:SS.FFFFFFZ
//! index:    0123456789...       20
//! ```
//!
//! Parsing is a total function: every byte sequence resolves to some valid
//! instant. Malformed digits become zero, field by field, and anything
//! shorter than 24 bytes resolves to the epoch-blank value. Callers must not
//! assume parse failures are observable.

use crate::calendar::{self, Calendar};

/// Minimum accepted input length; the microsecond compact form.
pub(crate) const MIN_TIMESTAMP_LEN: usize = 24;

/// Compact inputs at least this long carry a 9-digit nanosecond fraction.
/// Shorter ones carry the historical 6-digit microsecond fraction.
const COMPACT_NANOS_LEN: usize = 27;

/// A parsed instant plus the calendar fields it was assembled from, so the
/// owning timestamp starts life with a primed cache.
pub(crate) struct Parsed {
    pub secs: i64,
    pub nanos: u32,
    pub calendar: Calendar,
}

impl Parsed {
    /// The epoch-blank sentinel produced for unparseable input.
    const BLANK: Parsed = Parsed {
        secs: 0,
        nanos: 0,
        calendar: Calendar::EPOCH,
    };
}

/// Best-effort `atoi`: accumulate leading ASCII digits, stop at the first
/// non-digit, yield 0 when there are none. Never fails.
fn atoi(s: &[u8]) -> i64 {
    let mut n = 0i64;

    for &c in s {
        let d = c.wrapping_sub(b'0');
        if d > 9 {
            break;
        }
        n = n * 10 + d as i64;
    }

    n
}

/// Fixed-width field slice, truncated at the end of input rather than
/// panicking when the tail of the string is missing.
#[inline]
fn field(b: &[u8], start: usize, end: usize) -> &[u8] {
    let end = end.min(b.len());
    if start >= end {
        &[]
    } else {
        &b[start..end]
    }
}

/// Assemble the instant from extracted fields, reproducing the `tm`-style
/// storage quirk of the original format: a year of literally 0 is stored
/// without the -1900 offset and a month of 0 without the -1, so all-zero
/// garbage decodes as 1900-01-00 rather than underflowing.
fn assemble(
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
    nanos: u32,
) -> Parsed {
    let tm_year = if year != 0 { year - 1900 } else { 0 };
    let tm_mon = if month != 0 { month - 1 } else { 0 };

    let secs =
        calendar::civil_to_epoch_seconds(tm_year + 1900, tm_mon + 1, day, hour, minute, second);

    Parsed {
        secs,
        nanos,
        calendar: Calendar {
            ready: true,
            second: second as u8,
            minute: minute as u8,
            hour: hour as u8,
            day: day as u8,
            month: tm_mon as u8,
            year: tm_year as i16,
        },
    }
}

/// `YYYYMMDD HH:MM:SS.FFFFFF[FFF]`
fn parse_compact(b: &[u8]) -> Parsed {
    // fraction width is selected by total input length, not by scanning
    let nanos = if b.len() >= COMPACT_NANOS_LEN {
        atoi(field(b, 18, 27)) as u32
    } else {
        atoi(field(b, 18, 24)) as u32 * 1_000
    };

    assemble(
        atoi(field(b, 0, 4)),
        atoi(field(b, 4, 6)),
        atoi(field(b, 6, 8)),
        atoi(field(b, 9, 11)),
        atoi(field(b, 12, 14)),
        atoi(field(b, 15, 17)),
        nanos,
    )
}

/// `YYYY-MM-DDTHH:MM:SS.FFFFFFZ`
fn parse_iso8601(b: &[u8]) -> Parsed {
    assemble(
        atoi(field(b, 0, 4)),
        atoi(field(b, 5, 7)),
        atoi(field(b, 8, 10)),
        atoi(field(b, 11, 13)),
        atoi(field(b, 14, 16)),
        atoi(field(b, 17, 19)),
        atoi(field(b, 20, 26)) as u32 * 1_000,
    )
}

pub(crate) fn parse_timestamp(b: &[u8]) -> Parsed {
    if unlikely!(b.len() < MIN_TIMESTAMP_LEN) {
        return Parsed::BLANK;
    }

    // a hyphen at the fixed year/month boundary selects the ISO form
    if b[4] == b'-' {
        parse_iso8601(b)
    } else {
        parse_compact(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atoi() {
        assert_eq!(atoi(b"294930"), 294_930);
        assert_eq!(atoi(b"04"), 4);
        assert_eq!(atoi(b"1x3"), 1);
        assert_eq!(atoi(b"xx"), 0);
        assert_eq!(atoi(b""), 0);
    }

    #[test]
    fn test_field_truncates() {
        assert_eq!(field(b"abc", 1, 10), b"bc");
        assert_eq!(field(b"abc", 5, 10), b"");
    }

    #[test]
    fn test_compact_known_vector() {
        let p = parse_timestamp(b"20140403 10:11:02.294930");
        assert_eq!(p.secs, 1_396_519_862);
        assert_eq!(p.nanos, 294_930_000);
        assert_eq!(p.calendar.year, 114);
        assert_eq!(p.calendar.month, 3);
        assert_eq!(p.calendar.day, 3);
    }

    #[test]
    fn test_compact_nanosecond_width() {
        let p = parse_timestamp(b"20140403 10:11:02.294930123");
        assert_eq!(p.secs, 1_396_519_862);
        assert_eq!(p.nanos, 294_930_123);
    }

    #[test]
    fn test_iso8601_known_vector() {
        let p = parse_timestamp(b"2014-04-03T10:11:02.294930Z");
        assert_eq!(p.secs, 1_396_519_862);
        assert_eq!(p.nanos, 294_930_000);
    }

    #[test]
    fn test_short_input_is_blank() {
        for input in [&b""[..], &b"2017"[..], &b"20140403 10:11:02.29493"[..]] {
            let p = parse_timestamp(input);
            assert_eq!((p.secs, p.nanos), (0, 0));
            assert_eq!(p.calendar, Calendar::EPOCH);
        }
    }

    #[test]
    fn test_garbage_fields_become_zero() {
        let p = parse_timestamp(b"2014xx03 10:11:02.294930");
        // month field failed to parse, left as 0, stored unadjusted
        assert_eq!(p.calendar.month, 0);
        assert_eq!(p.calendar.day, 3);
    }

    #[test]
    fn test_zero_year_month_quirk() {
        let p = parse_timestamp(b"00000000 00:00:00.000000");
        assert_eq!(p.calendar.year, 0); // 1900, not -1900
        assert_eq!(p.calendar.month, 0); // January, not month -1
        assert_eq!(p.calendar.day, 0);
        // 1900-01-00 == 1899-12-31
        assert_eq!(p.secs, -2_209_075_200);
    }
}

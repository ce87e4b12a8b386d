//! Lazy calendar decomposition of an epoch-seconds value.
//!
//! The conversion is the plain proleptic-Gregorian civil-calendar algorithm,
//! equivalent to a UTC-only `gmtime`/`timegm` pair. No timezone or DST logic.

pub(crate) const SECS_PER_DAY: i64 = 86_400;

/// Decomposed UTC calendar fields, packed into 8 bytes.
///
/// Follows the libc `tm` conventions: `month` is zero-based and `year` is an
/// offset from 1900. While `ready` is false the payload is stale and must only
/// be refreshed through [`decode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Calendar {
    pub ready: bool,
    pub second: u8,
    pub minute: u8,
    pub hour: u8,
    pub day: u8,
    /// Month [0-11], zero-based.
    pub month: u8,
    /// Year - 1900. 16 bits so far-future and pre-1900 years survive.
    pub year: i16,
}

impl Calendar {
    pub const INVALID: Calendar = Calendar {
        ready: false,
        second: 0,
        minute: 0,
        hour: 0,
        day: 0,
        month: 0,
        year: 0,
    };

    /// 1970-01-01 midnight, already decoded.
    pub const EPOCH: Calendar = Calendar {
        ready: true,
        second: 0,
        minute: 0,
        hour: 0,
        day: 1,
        month: 0,
        year: 70,
    };
}

/// Days since 1970-01-01 to `(year, month [1-12], day)`.
///
/// Hinnant's `civil_from_days`, valid over the full input domain.
pub(crate) const fn civil_from_days(days: i64) -> (i32, u8, u8) {
    let z = days + 719_468;
    let era = (if z >= 0 { z } else { z - 146_096 }) / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = yoe + era * 400 + (month <= 2) as i64;

    (year as i32, month, day)
}

/// `(year, month [1-12], day)` to days since 1970-01-01.
///
/// Inverse of [`civil_from_days`]. Out-of-range months carry into the year
/// and out-of-range days offset linearly, matching `timegm` normalization,
/// so degenerate fields from garbage parses (day 0, month 13) still encode.
pub(crate) fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    // normalize month into [1, 12], carrying whole years
    let m0 = month - 1;
    let year = year + m0.div_euclid(12);
    let month = m0.rem_euclid(12) + 1;

    let year = year - (month <= 2) as i64;
    let era = (if year >= 0 { year } else { year - 399 }) / 400;
    let yoe = year - era * 400;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;

    era * 146_097 + doe - 719_468
}

/// Civil fields straight out of a parse, to seconds since the epoch.
///
/// Hour/minute/second fields outside their ranges spill over linearly,
/// again matching `timegm`.
pub(crate) fn civil_to_epoch_seconds(
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
) -> i64 {
    let days = days_from_civil(year, month, day);

    days * SECS_PER_DAY + hour * 3_600 + minute * 60 + second - epoch_offset_seconds()
}

/// Reference offset of the epoch instant, established once per process and
/// reused for every epoch-relative subtraction. Always zero by construction,
/// kept explicit so the parser subtracts against a single memoized origin.
#[cfg(feature = "std")]
pub(crate) fn epoch_offset_seconds() -> i64 {
    use std::sync::OnceLock;

    static EPOCH_OFFSET: OnceLock<i64> = OnceLock::new();

    *EPOCH_OFFSET.get_or_init(|| days_from_civil(1970, 1, 1) * SECS_PER_DAY)
}

#[cfg(not(feature = "std"))]
pub(crate) fn epoch_offset_seconds() -> i64 {
    days_from_civil(1970, 1, 1) * SECS_PER_DAY
}

/// Decode an epoch-seconds value into ready calendar fields.
///
/// Idempotent; invoked lazily at most once per mutation of the owning
/// timestamp.
pub(crate) fn decode(secs: i64) -> Calendar {
    let days = secs.div_euclid(SECS_PER_DAY);
    let tod = secs.rem_euclid(SECS_PER_DAY);

    let (year, month, day) = civil_from_days(days);

    Calendar {
        ready: true,
        second: (tod % 60) as u8,
        minute: (tod / 60 % 60) as u8,
        hour: (tod / 3_600) as u8,
        day,
        month: month - 1,
        year: (year - 1900) as i16,
    }
}

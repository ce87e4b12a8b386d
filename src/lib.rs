//! Compact Timestamp
//!
//! This crate provides a compact wall-clock timestamp value type for UTC
//! instants, with high-performance formatting and parsing of two fixed-width
//! textual formats:
//!
//! ```text
//! compact:  20140403 10:11:02.294930000   (YYYYMMDD HH:MM:SS.FFFFFFFFF)
//! iso8601:  2014-04-03T10:11:02.294930Z   (YYYY-MM-DDTHH:MM:SS.FFFFFFZ)
//! ```
//!
//! A [`Timestamp`] stores signed seconds since the Unix epoch plus a
//! nanosecond fraction, and lazily decomposes that into calendar fields the
//! first time one is read. The decomposition is cached inside the value and
//! reused until the next mutation, so hot paths that only capture, copy, and
//! diff instants never pay for a calendar conversion.
//!
//! Parsing is deliberately a **total function**: any input, including empty,
//! truncated, or garbage bytes, resolves to some valid `Timestamp` — the
//! epoch for anything shorter than 24 bytes, and zeroed fields for malformed
//! digits. Timestamps are round-tripped through logs and serialized records,
//! and a hot logging path must never have to handle a parse error. Callers
//! that need to detect bad input must validate it separately.
//!
//! The compact format evolved from a 6-digit microsecond fraction to a
//! 9-digit nanosecond fraction; the parser keeps reading both, selecting the
//! width from the total input length, so previously persisted microsecond
//! timestamps still parse.
//!
//! Only UTC is modeled. No timezones, no DST, no leap seconds.
//!
//! ## Cargo Features
//!
//! * `std` (default)
//!     - Enables capturing the current time ([`Timestamp::now`]) and
//!       [`Timestamp::format_filename`].
//!
//! * `serde` (default)
//!     - Enables serde implementations for `Timestamp` and `TimestampStr`.
//!       Human-readable formats use the compact string; binary formats use an
//!       `i64` of nanoseconds since the epoch.
//!
//! * `quickcheck`
//!     - Enables `quickcheck`'s `Arbitrary` implementation on `Timestamp`.

#![cfg_attr(not(feature = "std"), no_std)]

use core::cell::Cell;
use core::cmp::Ordering;
use core::convert::Infallible;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

#[cfg(feature = "std")]
use std::time::SystemTime;

#[macro_use]
mod macros;

mod calendar;
mod format;
mod parse;
mod ts_str;

use calendar::Calendar;

pub use ts_str::TimestampStr;

/// Concrete [`TimestampStr`] shapes produced by the formatters.
pub mod formats {
    use super::TimestampStr;

    /// `YYYYMMDD HH:MM:SS.FFFFFFFFF`
    pub type CompactNanoseconds = TimestampStr<27>;
    /// `YYYYMMDD HH:MM:SS.FFFFFF` (the historical fraction width)
    pub type CompactMicroseconds = TimestampStr<24>;
    /// `YYYY-MM-DDTHH:MM:SS.FFFFFFZ`
    pub type Iso8601 = TimestampStr<27>;
}

pub(crate) const NANOS_PER_SEC: i64 = 1_000_000_000;

/// UTC wall-clock timestamp with nanosecond precision and a lazily-decoded
/// calendar cache.
///
/// The held state is 12 bytes of absolute time (seconds since
/// 1970-01-01T00:00:00Z plus a non-negative nanosecond fraction) and an
/// 8-byte derived cache of calendar fields. The cache is invalid on
/// construction and after every mutation; the first calendar accessor decodes
/// it in place through interior mutability and later accessors reuse it.
///
/// The cache cell makes a `Timestamp` single-writer/single-reader: it is a
/// plain value with no implicit sharing (`!Sync`), and sharing one instance
/// across threads requires external synchronization. Cloning copies only the
/// absolute time; the clone starts with an invalid cache.
pub struct Timestamp {
    secs: i64,
    nanos: u32,
    calendar: Cell<Calendar>,
}

impl Timestamp {
    /// Unix Epoch -- 1970-01-01 Midnight
    pub const UNIX_EPOCH: Self = Timestamp {
        secs: 0,
        nanos: 0,
        calendar: Cell::new(Calendar::EPOCH),
    };

    /// The compact rendering of [`UNIX_EPOCH`](Self::UNIX_EPOCH), byte-for-byte
    /// equal to `Timestamp::from_parts(0, 0).format()`.
    pub const EPOCH_TIMESTAMP: &'static str = "19700101 00:00:00.000000000";

    const fn from_raw(secs: i64, nanos: u32) -> Self {
        Timestamp {
            secs,
            nanos,
            calendar: Cell::new(Calendar::INVALID),
        }
    }

    /// Construct from a raw seconds/nanoseconds pair.
    ///
    /// The sub-second component is floor-normalized into `[0, 10⁹)`, with the
    /// whole seconds adjusted accordingly, so any input pair is accepted:
    ///
    /// ```
    /// # use compact_timestamp::Timestamp;
    /// let t = Timestamp::from_parts(10, -1);
    /// assert_eq!((t.epoch_seconds(), t.nanosecond()), (9, 999_999_999));
    /// ```
    pub fn from_parts(secs: i64, nanos: i64) -> Self {
        Self::from_raw(
            secs.saturating_add(nanos.div_euclid(NANOS_PER_SEC)),
            nanos.rem_euclid(NANOS_PER_SEC) as u32,
        )
    }

    /// Construct from nanoseconds since the Unix epoch.
    #[inline]
    pub fn from_unix_nanos(nanos: i64) -> Self {
        Self::from_parts(0, nanos)
    }

    /// Parse from either fixed-width textual format.
    ///
    /// This never fails: unparseable input (anything shorter than 24 bytes)
    /// yields [`UNIX_EPOCH`](Self::UNIX_EPOCH), and malformed digits within a
    /// recognized shape silently become zero. A hyphen at byte 4 selects the
    /// ISO-8601 form; anything else selects the compact form, whose
    /// fractional field is read as nanoseconds when the input is 27+ bytes
    /// and as microseconds otherwise.
    #[inline(never)] // Avoid deoptimizing the general &str case when presented with a fixed-size string
    pub fn parse(ts: &str) -> Self {
        Self::parse_bytes(ts.as_bytes())
    }

    /// [`parse`](Self::parse), for raw bytes straight off the wire.
    pub fn parse_bytes(b: &[u8]) -> Self {
        let parsed = parse::parse_timestamp(b);

        Timestamp {
            secs: parsed.secs,
            nanos: parsed.nanos,
            calendar: Cell::new(parsed.calendar),
        }
    }

    /// Decoded calendar fields, computed on first use and memoized until the
    /// next mutation.
    #[inline]
    fn calendar(&self) -> Calendar {
        let cal = self.calendar.get();

        if likely!(cal.ready) {
            return cal;
        }

        let cal = calendar::decode(self.secs);
        self.calendar.set(cal);
        cal
    }

    /// Calendar year (UTC).
    #[inline]
    pub fn year(&self) -> i32 {
        self.calendar().year as i32 + 1900
    }

    /// Month of year (UTC), 1-based `[1-12]`.
    #[inline]
    pub fn month(&self) -> u8 {
        self.calendar().month + 1
    }

    /// Day of month (UTC) `[1-31]`.
    #[inline]
    pub fn day(&self) -> u8 {
        self.calendar().day
    }

    /// Hour of day (UTC) `[0-23]`.
    #[inline]
    pub fn hour(&self) -> u8 {
        self.calendar().hour
    }

    /// Minute of hour `[0-59]`.
    #[inline]
    pub fn minute(&self) -> u8 {
        self.calendar().minute
    }

    /// Second of minute `[0-59]`.
    #[inline]
    pub fn second(&self) -> u8 {
        self.calendar().second
    }

    /// Milliseconds into the current second `[0-999]`. No decode required.
    #[inline]
    pub fn millisecond(&self) -> u16 {
        (self.nanos / 1_000_000) as u16
    }

    /// Microseconds into the current second `[0-999999]`. No decode required.
    #[inline]
    pub fn microsecond(&self) -> u32 {
        self.nanos / 1_000
    }

    /// Nanoseconds into the current second `[0-999999999]`. No decode required.
    #[inline]
    pub fn nanosecond(&self) -> u32 {
        self.nanos
    }

    /// Whole seconds since the Unix epoch. Direct projection, no decode.
    #[inline]
    pub const fn epoch_seconds(&self) -> i64 {
        self.secs
    }

    /// Nanoseconds since the Unix epoch. Direct projection, no decode.
    ///
    /// Saturates for instants more than ~292 years from the epoch, the limit
    /// of an `i64` nanosecond count.
    #[inline]
    pub fn epoch_nanoseconds(&self) -> i64 {
        self.secs
            .saturating_mul(NANOS_PER_SEC)
            .saturating_add(self.nanos as i64)
    }

    /// Whole seconds elapsed since `earlier`: `self - earlier`.
    ///
    /// When a fractional borrow is needed (`self` has the smaller sub-second
    /// fraction) the result is decremented by one, so the whole-second
    /// difference rounds toward the earlier instant.
    pub fn diff_seconds(&self, earlier: &Timestamp) -> i64 {
        let mut diff = self.secs - earlier.secs;
        if self.nanos < earlier.nanos {
            diff -= 1;
        }
        diff
    }

    /// Exact nanoseconds elapsed since `earlier`: `self - earlier`.
    ///
    /// Computed without narrowing intermediates. The `i64` result overflows
    /// for differences beyond ~292 years; that range is a documented
    /// limitation, not handled.
    pub fn diff_nanoseconds(&self, earlier: &Timestamp) -> i64 {
        (self.secs - earlier.secs) * NANOS_PER_SEC + (self.nanos as i64 - earlier.nanos as i64)
    }

    /// Format to the compact nanosecond-precision form,
    /// `YYYYMMDD HH:MM:SS.FFFFFFFFF`.
    #[inline]
    pub fn format(&self) -> formats::CompactNanoseconds {
        format::format_compact_nanos(self.calendar(), self.nanos)
    }

    /// Format to the historical compact microsecond-precision form,
    /// `YYYYMMDD HH:MM:SS.FFFFFF`, still emitted for consumers of
    /// previously-persisted data.
    #[inline]
    pub fn format_microseconds(&self) -> formats::CompactMicroseconds {
        format::format_compact_micros(self.calendar(), self.nanos)
    }

    /// Format to the ISO-8601 form, `YYYY-MM-DDTHH:MM:SS.FFFFFFZ` (UTC only,
    /// fixed 6-digit fraction).
    #[inline]
    pub fn format_iso8601(&self) -> formats::Iso8601 {
        format::format_iso8601(self.calendar(), self.nanos)
    }
}

#[cfg(feature = "std")]
impl Timestamp {
    /// Capture the current instant from the system real-time clock.
    ///
    /// A single synchronous clock read; thread-safety of the read itself is a
    /// property of the host platform's clock, not of this type.
    #[inline]
    pub fn now() -> Self {
        SystemTime::now().into()
    }

    /// Re-capture the current instant in place, invalidating the cache.
    #[inline]
    pub fn set_now(&mut self) {
        *self = Self::now();
    }

    /// Format to an unpadded filename-friendly form, `Y-M-D_H:M:S-USEC`.
    pub fn format_filename(&self) -> String {
        let cal = self.calendar();

        format!(
            "{}-{}-{}_{}:{}:{}-{}",
            cal.year as i32 + 1900,
            cal.month + 1,
            cal.day,
            cal.hour,
            cal.minute,
            cal.second,
            self.microsecond(),
        )
    }
}

// The cache is pure derived state; comparisons and hashing see only the
// absolute time.

impl PartialEq for Timestamp {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        (self.secs, self.nanos) == (other.secs, other.nanos)
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        (self.secs, self.nanos).cmp(&(other.secs, other.nanos))
    }
}

impl Hash for Timestamp {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.secs, self.nanos).hash(state);
    }
}

impl Clone for Timestamp {
    /// Copies the absolute time only; the clone's cache starts invalid.
    #[inline]
    fn clone(&self) -> Self {
        Self::from_raw(self.secs, self.nanos)
    }
}

impl Default for Timestamp {
    /// The epoch-blank value.
    #[inline]
    fn default() -> Self {
        Self::UNIX_EPOCH
    }
}

impl fmt::Debug for Timestamp {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Timestamp").field(&self.format()).finish()
    }
}

impl fmt::Display for Timestamp {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl FromStr for Timestamp {
    type Err = Infallible;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Timestamp {
    #[inline]
    fn from(ts: &str) -> Self {
        Self::parse(ts)
    }
}

impl From<Option<&str>> for Timestamp {
    /// An absent string is unparseable input and resolves to the epoch-blank
    /// value, like any other.
    #[inline]
    fn from(ts: Option<&str>) -> Self {
        match ts {
            Some(ts) => Self::parse(ts),
            None => Self::UNIX_EPOCH,
        }
    }
}

#[cfg(feature = "std")]
impl From<SystemTime> for Timestamp {
    fn from(ts: SystemTime) -> Self {
        match ts.duration_since(SystemTime::UNIX_EPOCH) {
            Ok(dur) => Self::from_raw(dur.as_secs() as i64, dur.subsec_nanos()),
            Err(err) => {
                let dur = err.duration();
                Self::from_parts(-(dur.as_secs() as i64), -(dur.subsec_nanos() as i64))
            }
        }
    }
}

#[cfg(feature = "std")]
impl From<Timestamp> for SystemTime {
    fn from(ts: Timestamp) -> Self {
        use std::time::Duration;

        if ts.secs >= 0 {
            SystemTime::UNIX_EPOCH + Duration::new(ts.secs as u64, ts.nanos)
        } else {
            // nanos counts forward from the prior whole second
            SystemTime::UNIX_EPOCH - Duration::new(ts.secs.unsigned_abs(), 0)
                + Duration::new(0, ts.nanos)
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::de::{Deserialize, Deserializer, Error, Visitor};
    use serde::ser::{Serialize, Serializer};

    use super::Timestamp;

    impl Serialize for Timestamp {
        #[inline]
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            if serializer.is_human_readable() {
                self.format().serialize(serializer)
            } else {
                self.epoch_nanoseconds().serialize(serializer)
            }
        }
    }

    const OUT_OF_RANGE: &str = "Nanoseconds out of range";

    impl<'de> Deserialize<'de> for Timestamp {
        #[inline]
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            use core::fmt;

            struct TsVisitor;

            impl<'de> Visitor<'de> for TsVisitor {
                type Value = Timestamp;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a timestamp string or nanoseconds since the epoch")
                }

                #[inline]
                fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
                where
                    E: Error,
                {
                    // total parse; malformed strings become the epoch
                    Ok(Timestamp::parse(v))
                }

                #[inline]
                fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
                where
                    E: Error,
                {
                    Ok(Timestamp::from_unix_nanos(v))
                }

                #[inline]
                fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
                where
                    E: Error,
                {
                    if v > i64::MAX as u64 {
                        return Err(E::custom(OUT_OF_RANGE));
                    }

                    Ok(Timestamp::from_unix_nanos(v as i64))
                }
            }

            deserializer.deserialize_any(TsVisitor)
        }
    }
}

#[cfg(feature = "quickcheck")]
mod quickcheck_impl {
    extern crate alloc;

    use alloc::boxed::Box;
    use quickcheck::{Arbitrary, Gen};

    use super::Timestamp;

    impl Arbitrary for Timestamp {
        #[inline(always)]
        fn arbitrary(g: &mut Gen) -> Self {
            Timestamp::from_parts(i64::arbitrary(g), i64::arbitrary(g))
        }

        fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
            Box::new(
                (self.epoch_seconds(), self.nanosecond())
                    .shrink()
                    .map(|(secs, nanos)| Timestamp::from_parts(secs, nanos as i64)),
            )
        }
    }
}

// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use crate::error::ParseError;
use crate::protocol::NtpTimestamp;
#[cfg(feature = "std")]
use std::time;

/// The number of seconds from 1st January 1900 UTC to the start of the Unix epoch.
pub const EPOCH_DELTA: i64 = 2_208_988_800;

/// Nanoseconds in one second.
pub const NANOS_PER_SEC: i32 = 1_000_000_000;

const NANOS_PER_MILLI: i32 = 1_000_000;
const MILLIS_PER_SEC: i64 = 1_000;

/// Describes an instant relative to the `UNIX_EPOCH` - 00:00:00 Coordinated Universal Time (UTC),
/// Thursday, 1 January 1970 in seconds with the fractional part in nanoseconds.
///
/// The nanosecond part is always in `[0, 1_000_000_000)`. An instant before the epoch has a
/// negative `secs` and a positive `subsec_nanos`, so `-0.25 s` is `{ secs: -1, subsec_nanos:
/// 750_000_000 }`.
///
/// ## Example
///
/// Displaying the **Instant** in local time using the chrono crate:
///
/// ```ignore
/// use chrono::TimeZone;
///
/// let unix_time = ntpv3_proto::unix_time::Instant::now();
/// let local_time = chrono::Local.timestamp_opt(unix_time.secs(), unix_time.subsec_nanos() as _);
/// println!("{:?}", local_time);
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Instant {
    secs: i64,
    subsec_nanos: i32,
}

impl Instant {
    /// The Unix epoch itself.
    pub const UNIX_EPOCH: Instant = Instant {
        secs: 0,
        subsec_nanos: 0,
    };

    /// Create a new **Instant** given its `secs` and `subsec_nanos` components.
    ///
    /// Fails with [`ParseError::InvalidField`] unless `subsec_nanos` is in
    /// `[0, 1_000_000_000)`.
    pub fn new(secs: i64, subsec_nanos: i32) -> Result<Instant, ParseError> {
        if !(0..NANOS_PER_SEC).contains(&subsec_nanos) {
            return Err(ParseError::InvalidField {
                field: "subsec_nanos",
                value: subsec_nanos as i64,
            });
        }
        Ok(Instant { secs, subsec_nanos })
    }

    /// Reads the host wall clock through `std::time::SystemTime`.
    ///
    /// This is deliberately not a monotonic clock: it follows any adjustment made to the
    /// system time.
    ///
    /// ## Example
    ///
    /// ```
    /// println!("{:?}", ntpv3_proto::unix_time::Instant::now());
    /// ```
    #[cfg(feature = "std")]
    pub fn now() -> Self {
        match time::SystemTime::now().duration_since(time::UNIX_EPOCH) {
            Ok(duration) => Instant {
                secs: duration.as_secs() as i64,
                subsec_nanos: duration.subsec_nanos() as i32,
            },
            Err(sys_time_err) => {
                let before = sys_time_err.duration();
                let secs = -(before.as_secs() as i64);
                let nanos = before.subsec_nanos() as i32;
                if nanos == 0 {
                    Instant {
                        secs,
                        subsec_nanos: 0,
                    }
                } else {
                    Instant {
                        secs: secs - 1,
                        subsec_nanos: NANOS_PER_SEC - nanos,
                    }
                }
            }
        }
    }

    /// The "seconds" component of the **Instant**.
    pub fn secs(&self) -> i64 {
        self.secs
    }

    /// The fractional component of the **Instant** in nanoseconds.
    pub fn subsec_nanos(&self) -> i32 {
        self.subsec_nanos
    }

    /// Milliseconds since the epoch, dropping any sub-millisecond remainder.
    pub fn as_millis(&self) -> i64 {
        self.secs * MILLIS_PER_SEC + (self.subsec_nanos / NANOS_PER_MILLI) as i64
    }

    /// Shorthand for [`apply_offset`].
    pub fn apply_offset(self, offset_ms: i64) -> Instant {
        apply_offset(self, offset_ms)
    }
}

// Fixed-point fraction conversion.

/// Scale a microsecond count to an NTP fraction of a second, `usec * 2^32 / 10^6`.
///
/// Computes `4294 * usec + (1981 * usec) >> 11` so no intermediate exceeds 32 bits for
/// `usec` in `[0, 999_999]`. The result is at most 11 fraction units (about 2.6 ns) below
/// the exact scaling. Larger inputs wrap.
pub const fn ntp_fraction_from_micros(usec: u32) -> u32 {
    4294u32
        .wrapping_mul(usec)
        .wrapping_add(1981u32.wrapping_mul(usec) >> 11)
}

/// Scale an NTP fraction of a second back to whole microseconds, `fine * 10^6 / 2^32`,
/// truncated.
///
/// Exact in 64-bit integer arithmetic, so
/// `micros_from_ntp_fraction(ntp_fraction_from_micros(u))` is `u` or `u - 1`.
pub const fn micros_from_ntp_fraction(fine: u32) -> u32 {
    ((fine as u64 * 1_000_000) >> 32) as u32
}

/// The legacy client's fraction-to-microseconds scaling,
/// `(fine >> 12) - 759 * (((fine >> 10) + 32768) >> 16)`.
///
/// Reproduces that client's output bit for bit. It reads up to about 380 µs high, so
/// [`micros_from_ntp_fraction`] is preferred unless the old readings must be matched. The
/// result never exceeds 999_999.
pub const fn micros_from_ntp_fraction_legacy(fine: u32) -> u32 {
    (fine >> 12) - 759 * (((fine >> 10) + 32768) >> 16)
}

/// Convert a local wall-clock instant to an NTP timestamp.
///
/// `coarse` is `secs + EPOCH_DELTA` reduced modulo 2^32 (the NTP era is not carried). `fine`
/// is the microsecond part of `subsec_nanos` scaled by [`ntp_fraction_from_micros`]; the
/// sub-microsecond remainder is dropped.
pub fn to_ntp(t: Instant) -> NtpTimestamp {
    let usec = (t.subsec_nanos / 1_000) as u32;
    NtpTimestamp {
        coarse: t.secs.wrapping_add(EPOCH_DELTA) as u32,
        fine: ntp_fraction_from_micros(usec),
    }
}

/// Convert an NTP timestamp to a local wall-clock instant with microsecond resolution.
///
/// Timestamps are taken to be in NTP era 0 (1900-2036).
pub fn from_ntp(ts: NtpTimestamp) -> Instant {
    Instant {
        secs: ts.coarse as i64 - EPOCH_DELTA,
        subsec_nanos: micros_from_ntp_fraction(ts.fine) as i32 * 1_000,
    }
}

/// [`from_ntp`] using [`micros_from_ntp_fraction_legacy`] for the fraction.
pub fn from_ntp_legacy(ts: NtpTimestamp) -> Instant {
    Instant {
        secs: ts.coarse as i64 - EPOCH_DELTA,
        subsec_nanos: micros_from_ntp_fraction_legacy(ts.fine) as i32 * 1_000,
    }
}

/// Add a signed millisecond correction to `t`.
///
/// Whole seconds go to `secs`; the remainder goes to `subsec_nanos` with a carry into `secs`
/// when it reaches one second, or a borrow from `secs` when a negative remainder exceeds the
/// current nanoseconds. Seconds wrap on overflow, so
/// `apply_offset(apply_offset(t, d), -d) == t` for every `d` except `i64::MIN`.
pub fn apply_offset(t: Instant, offset_ms: i64) -> Instant {
    let mut secs = t.secs;
    let mut nanos = t.subsec_nanos;
    if offset_ms >= 0 {
        secs = secs.wrapping_add(offset_ms / MILLIS_PER_SEC);
        nanos += (offset_ms % MILLIS_PER_SEC) as i32 * NANOS_PER_MILLI;
        if nanos >= NANOS_PER_SEC {
            nanos -= NANOS_PER_SEC;
            secs = secs.wrapping_add(1);
        }
    } else {
        let magnitude = offset_ms.unsigned_abs();
        secs = secs.wrapping_sub((magnitude / MILLIS_PER_SEC as u64) as i64);
        let remainder = (magnitude % MILLIS_PER_SEC as u64) as i32 * NANOS_PER_MILLI;
        if nanos < remainder {
            secs = secs.wrapping_sub(1);
            nanos += NANOS_PER_SEC;
        }
        nanos -= remainder;
    }
    Instant {
        secs,
        subsec_nanos: nanos,
    }
}

// Conversion implementations.

impl From<Instant> for NtpTimestamp {
    fn from(t: Instant) -> Self {
        to_ntp(t)
    }
}

impl From<NtpTimestamp> for Instant {
    fn from(ts: NtpTimestamp) -> Self {
        from_ntp(ts)
    }
}

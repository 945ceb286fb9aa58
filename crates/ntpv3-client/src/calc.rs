// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Result calculators: what one decoded reply is turned into.
//!
//! The exchange decodes the reply once and hands it, together with the local
//! arrival instant (T4), to a [`Calculator`]. Offsets and delays are computed
//! on whole milliseconds, truncating each timestamp's sub-millisecond part
//! before any arithmetic.

use log::debug;

use crate::protocol::{NtpTimestamp, Packet};
use crate::unix_time::{self, Instant};

/// How the fraction word of a reply timestamp is scaled to microseconds.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum FractionDecoding {
    /// [`unix_time::from_ntp`]: exact truncating scaling.
    #[default]
    Exact,
    /// [`unix_time::from_ntp_legacy`]: the older client's approximation.
    Legacy,
}

impl FractionDecoding {
    /// Convert `ts` to a local instant.
    pub fn decode(self, ts: NtpTimestamp) -> Instant {
        match self {
            FractionDecoding::Exact => unix_time::from_ntp(ts),
            FractionDecoding::Legacy => unix_time::from_ntp_legacy(ts),
        }
    }
}

/// Turns a decoded reply into a caller-facing result.
pub trait Calculator {
    /// The result type.
    type Output;

    /// Compute the result from the reply and the local instant it arrived at, reading
    /// reply timestamps through `decoding`.
    fn calculate(
        &self,
        packet: &Packet,
        arrival: Instant,
        decoding: FractionDecoding,
    ) -> Self::Output;
}

/// The server's transmit time, as local wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct AbsoluteTime;

/// The local clock offset in milliseconds; positive when the server is ahead.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClockOffset;

/// Server time, offset, and round-trip delay from the same exchange.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoundTrip;

/// The decoded reply itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReplyPacket;

/// One complete four-timestamp measurement.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct TimeSample {
    /// The server's transmit time (T3).
    pub server_time: Instant,
    /// `((T2 - T1) + (T3 - T4)) / 2` in milliseconds.
    pub offset_ms: i64,
    /// `(T4 - T1) - (T3 - T2)` in milliseconds.
    pub delay_ms: i64,
}

/// Clock offset `((T2 - T1) + (T3 - T4)) / 2` in truncated milliseconds.
///
/// Positive when the server clock is ahead of the local one.
pub fn offset_ms(t1: Instant, t2: Instant, t3: Instant, t4: Instant) -> i64 {
    ((t2.as_millis() - t1.as_millis()) + (t3.as_millis() - t4.as_millis())) / 2
}

/// Round-trip delay `(T4 - T1) - (T3 - T2)` in truncated milliseconds.
pub fn delay_ms(t1: Instant, t2: Instant, t3: Instant, t4: Instant) -> i64 {
    (t4.as_millis() - t1.as_millis()) - (t3.as_millis() - t2.as_millis())
}

/// T1, T2 and T3 carried by a reply.
fn server_timestamps(packet: &Packet, decoding: FractionDecoding) -> (Instant, Instant, Instant) {
    (
        decoding.decode(packet.originate_timestamp),
        decoding.decode(packet.receive_timestamp),
        decoding.decode(packet.transmit_timestamp),
    )
}

impl Calculator for AbsoluteTime {
    type Output = Instant;

    fn calculate(&self, packet: &Packet, _arrival: Instant, decoding: FractionDecoding) -> Instant {
        decoding.decode(packet.transmit_timestamp)
    }
}

impl Calculator for ClockOffset {
    type Output = i64;

    fn calculate(&self, packet: &Packet, arrival: Instant, decoding: FractionDecoding) -> i64 {
        let (t1, t2, t3) = server_timestamps(packet, decoding);
        let offset = offset_ms(t1, t2, t3, arrival);
        debug!("offset: {} ms", offset);
        offset
    }
}

impl Calculator for RoundTrip {
    type Output = TimeSample;

    fn calculate(
        &self,
        packet: &Packet,
        arrival: Instant,
        decoding: FractionDecoding,
    ) -> TimeSample {
        let (t1, t2, t3) = server_timestamps(packet, decoding);
        let sample = TimeSample {
            server_time: t3,
            offset_ms: offset_ms(t1, t2, t3, arrival),
            delay_ms: delay_ms(t1, t2, t3, arrival),
        };
        debug!(
            "offset: {} ms, delay: {} ms",
            sample.offset_ms, sample.delay_ms
        );
        sample
    }
}

impl Calculator for ReplyPacket {
    type Output = Packet;

    fn calculate(&self, packet: &Packet, _arrival: Instant, _decoding: FractionDecoding) -> Packet {
        *packet
    }
}

// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Shared helpers for integration tests.

// Integration test helpers are `pub` so each `tests/*.rs` file can import them
// via `mod common`, but not every file uses every helper.
#![allow(unreachable_pub, dead_code)]

use std::collections::VecDeque;
use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::thread;
use std::time::Duration;

use ntpv3_client::clock::Clock;
use ntpv3_client::protocol::{
    Header, LeapIndicator, Mode, NtpTimestamp, Packet, Stratum, Version, decode_reply,
};
use ntpv3_client::transport::Transport;
use ntpv3_client::unix_time::{self, Instant};

/// 2024-01-01T00:00:00Z in NTP seconds.
pub const NTP_2024: u32 = 3_913_056_000;

/// 2024-01-01T00:00:00Z in Unix seconds.
pub const UNIX_2024: i64 = 1_704_067_200;

/// Returns `true` if the I/O error indicates a network-level failure that
/// should cause the test to be **skipped** (not panicked).
pub fn is_network_skip_error(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::TimedOut
            | io::ErrorKind::WouldBlock
            | io::ErrorKind::NotFound
            | io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::AddrNotAvailable
    ) || e.raw_os_error() == Some(101) // ENETUNREACH  (Network is unreachable)
      || e.raw_os_error() == Some(113) // EHOSTUNREACH (No route to host)
}

/// An NTP timestamp that decodes to exactly `secs` and `millis`.
pub fn ntp_at(secs: i64, millis: u32) -> NtpTimestamp {
    NtpTimestamp {
        coarse: (secs + unix_time::EPOCH_DELTA) as u32,
        fine: ((millis as u64) << 32).div_ceil(1_000) as u32,
    }
}

/// A local instant at `secs` and `millis`.
pub fn local_at(secs: i64, millis: i32) -> Instant {
    Instant::new(secs, millis * 1_000_000).unwrap()
}

/// A synchronized stratum 1 server reply.
pub fn server_reply(
    originate: NtpTimestamp,
    receive: NtpTimestamp,
    transmit: NtpTimestamp,
) -> Packet {
    Packet {
        header: Header {
            leap_indicator: LeapIndicator::NoWarning,
            version: Version::V3,
            mode: Mode::Server,
            stratum: Stratum::PRIMARY,
            poll: 4,
            precision: -20,
        },
        reference_id: u32::from_be_bytes(*b"GPS\0"),
        reference_timestamp: transmit,
        originate_timestamp: originate,
        receive_timestamp: receive,
        transmit_timestamp: transmit,
        ..Packet::default()
    }
}

/// A clock that always reads the same instant.
pub struct FixedClock(pub Instant);

impl Clock for FixedClock {
    fn now(&self) -> Instant {
        self.0
    }
}

/// A clock that returns a scripted sequence of readings, repeating the last one.
pub struct ScriptedClock {
    readings: std::cell::RefCell<VecDeque<Instant>>,
}

impl ScriptedClock {
    pub fn new(readings: impl IntoIterator<Item = Instant>) -> Self {
        ScriptedClock {
            readings: std::cell::RefCell::new(readings.into_iter().collect()),
        }
    }
}

impl Clock for ScriptedClock {
    fn now(&self) -> Instant {
        let mut readings = self.readings.borrow_mut();
        if readings.len() > 1 {
            readings.pop_front().unwrap()
        } else {
            *readings.front().unwrap()
        }
    }
}

/// What a [`FakeTransport`] does when asked for a reply.
pub enum Reply {
    /// Deliver these bytes.
    Bytes(Vec<u8>),
    /// Let the timeout elapse.
    Silence,
    /// Fail the receive.
    Error(io::ErrorKind),
}

/// An in-memory transport that records what was sent and replays a canned reply.
pub struct FakeTransport {
    pub sent: Vec<Vec<u8>>,
    pub reply: Reply,
    pub send_limit: Option<usize>,
    pub send_error: Option<io::ErrorKind>,
    pub waited: Vec<Duration>,
}

impl FakeTransport {
    pub fn new(reply: Reply) -> Self {
        FakeTransport {
            sent: Vec::new(),
            reply,
            send_limit: None,
            send_error: None,
            waited: Vec::new(),
        }
    }

    pub fn replying_with(packet: &Packet) -> Self {
        FakeTransport::new(Reply::Bytes(packet.to_wire().to_vec()))
    }

    /// The request packet that was sent, decoded.
    pub fn request(&self) -> Packet {
        decode_reply(&self.sent[0]).unwrap()
    }
}

impl Transport for FakeTransport {
    fn send(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(kind) = self.send_error {
            return Err(io::Error::new(kind, "fake send failure"));
        }
        let n = self.send_limit.map_or(buf.len(), |limit| limit.min(buf.len()));
        self.sent.push(buf[..n].to_vec());
        Ok(n)
    }

    fn recv_within(&mut self, buf: &mut [u8], timeout: Duration) -> io::Result<Option<usize>> {
        self.waited.push(timeout);
        match &self.reply {
            Reply::Bytes(bytes) => {
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                Ok(Some(n))
            }
            Reply::Silence => Ok(None),
            Reply::Error(kind) => Err(io::Error::new(*kind, "fake recv failure")),
        }
    }
}

/// Spawn a loopback UDP responder that answers one request.
///
/// `respond` maps the decoded request to the reply bytes; returning `None`
/// drops the request without answering.
pub fn spawn_responder<F>(respond: F) -> (SocketAddr, thread::JoinHandle<()>)
where
    F: FnOnce(Packet) -> Option<Vec<u8>> + Send + 'static,
{
    let sock = UdpSocket::bind("127.0.0.1:0").unwrap();
    let addr = sock.local_addr().unwrap();
    sock.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    let handle = thread::spawn(move || {
        let mut buf = [0u8; 1024];
        let Ok((n, peer)) = sock.recv_from(&mut buf) else {
            return;
        };
        let request = decode_reply(&buf[..n]).unwrap();
        if let Some(reply) = respond(request) {
            sock.send_to(&reply, peer).unwrap();
        }
    });
    (addr, handle)
}

/// A reply that echoes the request's transmit timestamp as originate and
/// stamps receive/transmit with the local clock shifted by `skew_ms`.
pub fn echo_reply(request: Packet, skew_ms: i64) -> Vec<u8> {
    let server_now = Instant::now().apply_offset(skew_ms);
    let ts = unix_time::to_ntp(server_now);
    server_reply(request.transmit_timestamp, ts, ts)
        .to_wire()
        .to_vec()
}

// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Error types for the NTP client.
//!
//! Every public API returns `Result<T, NtpError>`. Each failure class of an
//! exchange is a distinct variant, so callers can match on it directly:
//!
//! ```no_run
//! use ntpv3_client::error::NtpError;
//!
//! match ntpv3_client::get_offset_ms("pool.ntp.org") {
//!     Ok(offset) => println!("offset: {offset} ms"),
//!     Err(NtpError::Timeout { after }) => eprintln!("no reply within {after:?}"),
//!     Err(e) => eprintln!("NTP error: {e}"),
//! }
//! ```
//!
//! Callers working in terms of `io::Result` can convert with `?` and recover
//! the original error through `io::Error::get_ref()`.

// Re-export proto error types for convenience.
pub use ntpv3_proto::error::ParseError;

use std::fmt;
use std::io;
use std::time::Duration;

/// Errors that can occur during one NTP exchange.
#[derive(Debug)]
pub enum NtpError {
    /// The server address could not be resolved.
    Resolution(ResolutionError),
    /// Socket creation, connect, send, or receive failed.
    Transport(io::Error),
    /// No reply arrived within the configured bound.
    Timeout {
        /// The bound that elapsed.
        after: Duration,
    },
    /// The reply could not be used as an NTP packet.
    MalformedPacket(ProtocolError),
}

/// Address resolution failures.
#[derive(Debug)]
pub enum ResolutionError {
    /// The lookup succeeded but yielded no socket addresses.
    NoAddresses {
        /// The address as given by the caller.
        address: String,
    },
    /// The lookup itself failed.
    Lookup {
        /// The address as given by the caller.
        address: String,
        /// The resolver's error.
        source: io::Error,
    },
}

/// Reply validation failures.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProtocolError {
    /// Response packet too short (< 48 bytes).
    ResponseTooShort {
        /// Number of bytes received.
        received: usize,
    },
    /// Response has wrong mode (expected Server).
    UnexpectedMode {
        /// The raw mode bits of the reply.
        mode: u8,
    },
    /// Response version is not 1 through 4.
    UnsupportedVersion {
        /// The raw version bits of the reply.
        version: u8,
    },
    /// Server transmit timestamp is zero (unsent).
    ZeroTransmitTimestamp,
    /// Server reports unsynchronized clock (LI=3 with non-zero stratum).
    UnsynchronizedServer,
    /// A decoded field holds a value outside its range.
    InvalidField {
        /// Name of the field.
        field: &'static str,
        /// The rejected value.
        value: i64,
    },
}

// Display implementations.

impl fmt::Display for NtpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NtpError::Resolution(e) => write!(f, "NTP resolution error: {e}"),
            NtpError::Transport(e) => write!(f, "NTP transport error: {e}"),
            NtpError::Timeout { after } => write!(f, "NTP reply timed out after {after:?}"),
            NtpError::MalformedPacket(e) => write!(f, "malformed NTP packet: {e}"),
        }
    }
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionError::NoAddresses { address } => {
                write!(f, "address resolved to no socket addresses: {address}")
            }
            ResolutionError::Lookup { address, source } => {
                write!(f, "failed to resolve {address}: {source}")
            }
        }
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::ResponseTooShort { received } => {
                write!(f, "NTP response too short ({received} bytes)")
            }
            ProtocolError::UnexpectedMode { mode } => {
                write!(f, "unexpected response mode {mode} (expected Server)")
            }
            ProtocolError::UnsupportedVersion { version } => {
                write!(f, "unsupported NTP version {version}")
            }
            ProtocolError::ZeroTransmitTimestamp => {
                write!(f, "server transmit timestamp is zero")
            }
            ProtocolError::UnsynchronizedServer => {
                write!(f, "server reports unsynchronized clock")
            }
            ProtocolError::InvalidField { field, value } => {
                write!(f, "invalid {field} value: {value}")
            }
        }
    }
}

// Error trait implementations.

impl std::error::Error for NtpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NtpError::Resolution(e) => Some(e),
            NtpError::Transport(e) => Some(e),
            NtpError::MalformedPacket(e) => Some(e),
            NtpError::Timeout { .. } => None,
        }
    }
}

impl std::error::Error for ResolutionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResolutionError::Lookup { source, .. } => Some(source),
            ResolutionError::NoAddresses { .. } => None,
        }
    }
}

impl std::error::Error for ProtocolError {}

// From conversions.

impl From<NtpError> for io::Error {
    fn from(err: NtpError) -> io::Error {
        let kind = match &err {
            NtpError::Resolution(_) => io::ErrorKind::NotFound,
            NtpError::Transport(e) => e.kind(),
            NtpError::Timeout { .. } => io::ErrorKind::TimedOut,
            NtpError::MalformedPacket(_) => io::ErrorKind::InvalidData,
        };
        io::Error::new(kind, err)
    }
}

impl From<ResolutionError> for NtpError {
    fn from(err: ResolutionError) -> NtpError {
        NtpError::Resolution(err)
    }
}

impl From<ProtocolError> for NtpError {
    fn from(err: ProtocolError) -> NtpError {
        NtpError::MalformedPacket(err)
    }
}

impl From<ParseError> for NtpError {
    fn from(err: ParseError) -> NtpError {
        match err {
            ParseError::BufferTooShort { available, .. } => {
                NtpError::MalformedPacket(ProtocolError::ResponseTooShort {
                    received: available,
                })
            }
            ParseError::InvalidField { field, value } => {
                NtpError::MalformedPacket(ProtocolError::InvalidField { field, value })
            }
        }
    }
}

// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Types and constants for the NTPv3 packet header (RFC 1305).
//!
//! All in-memory types hold host-order values. The only places that deal with
//! network byte order are the whole-packet transcoders [`Packet::to_wire`] and
//! [`Packet::from_wire`], which share one fixed field list so the 48-byte layout
//! is defined exactly once.
//!
//! ```text
//!  0   2     5     8               16              24              32
//!  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!  |LI | VN  |Mode |    Stratum    |     Poll      |   Precision   |
//!  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!  |                          Root Delay                           |
//!  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!  |                       Root Dispersion                         |
//!  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!  |                     Reference Identifier                      |
//!  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!  |                   Reference Timestamp (64)                    |
//!  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!  |                   Originate Timestamp (64)                    |
//!  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!  |                    Receive Timestamp (64)                     |
//!  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!  |                    Transmit Timestamp (64)                    |
//!  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```

/// NTP server port number.
pub const PORT: u16 = 123;

/// Leap indicator sent in client requests (no warning).
pub const REQUEST_LEAP_INDICATOR: u8 = 0;

/// Protocol version sent in client requests.
pub const REQUEST_VERSION: u8 = 3;

/// Association mode sent in client requests (client).
pub const REQUEST_MODE: u8 = 3;

/// Stratum sent in client requests (unspecified).
pub const REQUEST_STRATUM: u8 = 0;

/// Poll exponent sent in client requests (2^4 = 16 s).
pub const REQUEST_POLL: i8 = 4;

/// Precision exponent sent in client requests (2^-6 s, about 15.6 ms).
pub const REQUEST_PRECISION: i8 = -6;

mod bytes;
mod types;

pub use self::bytes::decode_reply;
pub use self::types::*;

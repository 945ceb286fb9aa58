// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use core::fmt;

use super::{
    REQUEST_LEAP_INDICATOR, REQUEST_MODE, REQUEST_POLL, REQUEST_PRECISION, REQUEST_STRATUM,
    REQUEST_VERSION,
};
use crate::unix_time;

/// Value written to the low word of the originate timestamp by the legacy
/// client. It has no protocol meaning and is only sent on request.
pub const LEGACY_ORIGINATE_FRACTION: u32 = 1 << 16;

/// **NTP Short Format** - Used in the root delay and root dispersion header fields. It is a
/// Q16.16 fixed point value: a 16-bit unsigned seconds field and a 16-bit fraction field.
///
/// ### Layout
///
/// ```ignore
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |          Seconds              |           Fraction            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ShortFormat {
    /// Seconds component (16-bit unsigned).
    pub seconds: u16,
    /// Fractional seconds component (16-bit unsigned).
    pub fraction: u16,
}

impl ShortFormat {
    /// Exactly one second (`0x0001_0000`).
    pub const ONE_SECOND: Self = ShortFormat {
        seconds: 1,
        fraction: 0,
    };

    /// Build a short format value from its packed 32-bit representation.
    pub const fn from_bits(bits: u32) -> Self {
        ShortFormat {
            seconds: (bits >> 16) as u16,
            fraction: bits as u16,
        }
    }

    /// The packed 32-bit representation (seconds in the high half).
    pub const fn to_bits(self) -> u32 {
        ((self.seconds as u32) << 16) | self.fraction as u32
    }

    /// The value in whole microseconds, truncated.
    pub const fn to_micros(self) -> u64 {
        (self.to_bits() as u64 * 1_000_000) >> 16
    }
}

/// **NTP Timestamp Format** - A 32-bit unsigned seconds field (`coarse`) spanning 136 years and a
/// 32-bit binary fraction of a second (`fine`) resolving 232 picoseconds.
///
/// The prime epoch is 0 h 1 January 1900 UTC, when all bits are zero.
///
/// ### Layout
///
/// ```ignore
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                            Coarse                             |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                             Fine                              |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NtpTimestamp {
    /// Whole seconds since 1900-01-01 00:00:00 UTC.
    pub coarse: u32,
    /// Fraction of a second scaled to 2^32.
    pub fine: u32,
}

impl NtpTimestamp {
    /// Whether both words are zero (an unset timestamp).
    pub fn is_zero(&self) -> bool {
        self.coarse == 0 && self.fine == 0
    }
}

/// A 2-bit integer warning of an impending leap second to be inserted or deleted in the last
/// minute of the current day.
///
/// Note that this field is packed in the actual header.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum LeapIndicator {
    /// No leap required.
    #[default]
    NoWarning = 0,
    /// Last minute of the day has 61 seconds.
    AddOne = 1,
    /// Last minute of the day has 59 seconds.
    SubOne = 2,
    /// Clock unsynchronized.
    Unknown = 3,
}

impl LeapIndicator {
    /// Decode the low two bits of `bits`. Every bit pattern is valid.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => LeapIndicator::NoWarning,
            1 => LeapIndicator::AddOne,
            2 => LeapIndicator::SubOne,
            _ => LeapIndicator::Unknown,
        }
    }
}

/// A 3-bit integer representing the NTP version number.
///
/// Note that while this struct is 8-bits, this field is packed to 3 in the actual header, and
/// only the low three bits are kept when packing.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Version(pub u8);

impl Version {
    /// NTP version 1.
    pub const V1: Self = Version(1);
    /// NTP version 2.
    pub const V2: Self = Version(2);
    /// NTP version 3 (RFC 1305), the version this crate speaks.
    pub const V3: Self = Version(3);
    /// NTP version 4.
    pub const V4: Self = Version(4);

    /// Returns the raw version number as a `u8`.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Whether or not the version is a known, valid version (1-4).
    pub fn is_known(&self) -> bool {
        (1..=4).contains(&self.0)
    }
}

/// A 3-bit integer representing the association mode.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Mode {
    /// Reserved mode (value 0).
    #[default]
    Reserved = 0,
    /// Symmetric active mode (value 1).
    SymmetricActive = 1,
    /// Symmetric passive mode (value 2).
    SymmetricPassive = 2,
    /// Client mode (value 3).
    Client = 3,
    /// Server mode (value 4).
    Server = 4,
    /// Broadcast mode (value 5).
    Broadcast = 5,
    /// NTP control message mode (value 6).
    NtpControlMessage = 6,
    /// Reserved for private use (value 7).
    ReservedForPrivateUse = 7,
}

impl Mode {
    /// Decode the low three bits of `bits`. Every bit pattern is valid.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0 => Mode::Reserved,
            1 => Mode::SymmetricActive,
            2 => Mode::SymmetricPassive,
            3 => Mode::Client,
            4 => Mode::Server,
            5 => Mode::Broadcast,
            6 => Mode::NtpControlMessage,
            _ => Mode::ReservedForPrivateUse,
        }
    }
}

/// An 8-bit integer representing the stratum.
///
/// ```ignore
/// +--------+-----------------------------------------------------+
/// | Value  | Meaning                                             |
/// +--------+-----------------------------------------------------+
/// | 0      | unspecified or invalid                              |
/// | 1      | primary server (e.g., equipped with a GPS receiver) |
/// | 2-15   | secondary server (via NTP)                          |
/// | 16-255 | reserved                                            |
/// +--------+-----------------------------------------------------+
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Stratum(pub u8);

impl Stratum {
    /// Unspecified or invalid.
    pub const UNSPECIFIED: Self = Stratum(0);
    /// The primary server (e.g. equipped with a GPS receiver).
    pub const PRIMARY: Self = Stratum(1);
    /// The minimum value specifying a secondary server (via NTP).
    pub const SECONDARY_MIN: Self = Stratum(2);
    /// The maximum value specifying a secondary server (via NTP).
    pub const SECONDARY_MAX: Self = Stratum(15);

    /// Whether or not the stratum represents a secondary server.
    pub fn is_secondary(&self) -> bool {
        Self::SECONDARY_MIN <= *self && *self <= Self::SECONDARY_MAX
    }
}

/// The first 32-bit word of the packet: leap indicator, version, mode, stratum, poll and
/// precision.
///
/// The sub-byte fields share the top byte as `li << 6 | vn << 3 | mode`, followed by one byte
/// each for stratum, poll and precision. Unpacking is total: any 32-bit word decodes.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Header {
    /// Leap second warning.
    pub leap_indicator: LeapIndicator,
    /// Protocol version.
    pub version: Version,
    /// Association mode.
    pub mode: Mode,
    /// Distance from the reference clock.
    pub stratum: Stratum,
    /// Maximum interval between messages, log2 seconds.
    pub poll: i8,
    /// Clock precision, log2 seconds.
    pub precision: i8,
}

impl Header {
    /// The header of every request this client sends: LI 0, version 3, client mode,
    /// stratum 0, poll 4, precision -6.
    pub const CLIENT_REQUEST: Header = Header {
        leap_indicator: LeapIndicator::from_bits(REQUEST_LEAP_INDICATOR),
        version: Version(REQUEST_VERSION),
        mode: Mode::from_bits(REQUEST_MODE),
        stratum: Stratum(REQUEST_STRATUM),
        poll: REQUEST_POLL,
        precision: REQUEST_PRECISION,
    };

    /// Pack into the host-order header word.
    pub const fn to_word(&self) -> u32 {
        ((self.leap_indicator as u32) << 30)
            | (((self.version.0 & 0b111) as u32) << 27)
            | ((self.mode as u32) << 24)
            | ((self.stratum.0 as u32) << 16)
            | ((self.poll as u8 as u32) << 8)
            | (self.precision as u8 as u32)
    }

    /// Unpack a host-order header word.
    pub const fn from_word(word: u32) -> Header {
        Header {
            leap_indicator: LeapIndicator::from_bits((word >> 30) as u8),
            version: Version(((word >> 27) & 0b111) as u8),
            mode: Mode::from_bits((word >> 24) as u8),
            stratum: Stratum((word >> 16) as u8),
            poll: (word >> 8) as u8 as i8,
            precision: word as u8 as i8,
        }
    }
}

/// **Packet Header** - the fixed 48-byte NTPv3 message, twelve 32-bit words in host order.
///
/// `Packet::default()` is the all-zero packet. Use [`make_request`] to build a client request.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Packet {
    /// Leap indicator, version, mode, stratum, poll and precision.
    pub header: Header,
    /// Total round-trip delay to the reference clock.
    pub root_delay: ShortFormat,
    /// Maximum error relative to the reference clock.
    pub root_dispersion: ShortFormat,
    /// Reference clock identifier. Opaque to this client.
    pub reference_id: u32,
    /// Time when the system clock was last set or corrected.
    pub reference_timestamp: NtpTimestamp,
    /// Time at the client when the request departed for the server (T1).
    pub originate_timestamp: NtpTimestamp,
    /// Time at the server when the request arrived from the client (T2).
    pub receive_timestamp: NtpTimestamp,
    /// Time at the server when the response left for the client (T3).
    pub transmit_timestamp: NtpTimestamp,
}

impl Packet {
    /// Number of 32-bit words in the packet.
    pub const WORDS: usize = 12;

    /// Size of the packet on the wire, in bytes.
    pub const SIZE: usize = Packet::WORDS * 4;

    /// Set the originate fraction word to [`LEGACY_ORIGINATE_FRACTION`], reproducing the
    /// request bytes of the legacy client.
    pub fn with_legacy_originate_placeholder(mut self) -> Packet {
        self.originate_timestamp.fine = LEGACY_ORIGINATE_FRACTION;
        self
    }
}

/// Build a client request whose transmit timestamp is `transmit_time`.
///
/// Every other field is zero except the header ([`Header::CLIENT_REQUEST`]) and the root delay,
/// which is set to one second.
pub fn make_request(transmit_time: unix_time::Instant) -> Packet {
    Packet {
        header: Header::CLIENT_REQUEST,
        root_delay: ShortFormat::ONE_SECOND,
        transmit_timestamp: unix_time::to_ntp(transmit_time),
        ..Packet::default()
    }
}

// Display implementations.

impl fmt::Display for NtpTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}.{:08x}", self.coarse, self.fine)
    }
}

// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use byteorder::{BE, ByteOrder};

use crate::error::ParseError;

use super::{Header, NtpTimestamp, Packet, ShortFormat};

impl Packet {
    /// The packet as twelve host-order words in wire order.
    ///
    /// This is the single definition of the field layout; every transcoder goes through it.
    pub fn to_words(&self) -> [u32; Packet::WORDS] {
        [
            self.header.to_word(),
            self.root_delay.to_bits(),
            self.root_dispersion.to_bits(),
            self.reference_id,
            self.reference_timestamp.coarse,
            self.reference_timestamp.fine,
            self.originate_timestamp.coarse,
            self.originate_timestamp.fine,
            self.receive_timestamp.coarse,
            self.receive_timestamp.fine,
            self.transmit_timestamp.coarse,
            self.transmit_timestamp.fine,
        ]
    }

    /// Rebuild a packet from twelve host-order words in wire order.
    pub fn from_words(words: &[u32; Packet::WORDS]) -> Packet {
        Packet {
            header: Header::from_word(words[0]),
            root_delay: ShortFormat::from_bits(words[1]),
            root_dispersion: ShortFormat::from_bits(words[2]),
            reference_id: words[3],
            reference_timestamp: NtpTimestamp {
                coarse: words[4],
                fine: words[5],
            },
            originate_timestamp: NtpTimestamp {
                coarse: words[6],
                fine: words[7],
            },
            receive_timestamp: NtpTimestamp {
                coarse: words[8],
                fine: words[9],
            },
            transmit_timestamp: NtpTimestamp {
                coarse: words[10],
                fine: words[11],
            },
        }
    }

    /// Encode the packet in network byte order.
    pub fn to_wire(&self) -> [u8; Packet::SIZE] {
        let mut buf = [0u8; Packet::SIZE];
        BE::write_u32_into(&self.to_words(), &mut buf);
        buf
    }

    /// Decode a packet from network byte order.
    ///
    /// Only the first 48 bytes are read; anything after them (extension fields, MAC) is
    /// ignored. Header fields are not validated.
    pub fn from_wire(buf: &[u8]) -> Result<Packet, ParseError> {
        if buf.len() < Packet::SIZE {
            return Err(ParseError::BufferTooShort {
                needed: Packet::SIZE,
                available: buf.len(),
            });
        }
        let mut words = [0u32; Packet::WORDS];
        BE::read_u32_into(&buf[..Packet::SIZE], &mut words);
        Ok(Packet::from_words(&words))
    }
}

/// Decode a server reply.
///
/// Fails with [`ParseError::BufferTooShort`] when `buf` holds fewer than 48 bytes. Any reply of
/// sufficient length is accepted as-is: leap indicator, version, mode and stratum are not
/// checked here.
pub fn decode_reply(buf: &[u8]) -> Result<Packet, ParseError> {
    Packet::from_wire(buf)
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::protocol::{LeapIndicator, Mode, Stratum, Version};

    #[test]
    fn decode_reply_rejects_47_bytes() {
        let buf = [0u8; 47];
        assert_eq!(
            decode_reply(&buf),
            Err(ParseError::BufferTooShort {
                needed: 48,
                available: 47
            })
        );
    }

    #[test]
    fn decode_reply_accepts_48_bytes() {
        let buf = [0u8; 48];
        assert_eq!(decode_reply(&buf), Ok(Packet::default()));
    }

    #[test]
    fn decode_reply_ignores_trailing_bytes() {
        let mut buf = [0xFFu8; 68];
        buf[..48].copy_from_slice(&[0u8; 48]);
        assert_eq!(decode_reply(&buf), Ok(Packet::default()));
    }

    #[test]
    fn to_wire_is_big_endian() {
        let packet = Packet {
            reference_id: 0x0102_0304,
            transmit_timestamp: NtpTimestamp {
                coarse: 0xAABB_CCDD,
                fine: 0x1122_3344,
            },
            ..Packet::default()
        };
        let wire = packet.to_wire();
        assert_eq!(&wire[12..16], &[1, 2, 3, 4]);
        assert_eq!(&wire[40..48], &[0xAA, 0xBB, 0xCC, 0xDD, 0x11, 0x22, 0x33, 0x44]);
    }

    #[test]
    fn from_wire_accepts_any_header_bits() {
        let mut buf = [0u8; 48];
        buf[0] = 0xFF;
        let packet = decode_reply(&buf).unwrap();
        assert_eq!(packet.header.leap_indicator, LeapIndicator::Unknown);
        assert_eq!(packet.header.version, Version(7));
        assert_eq!(packet.header.mode, Mode::ReservedForPrivateUse);
        assert_eq!(packet.header.stratum, Stratum::UNSPECIFIED);
    }

    #[test]
    fn words_round_trip() {
        let words: [u32; Packet::WORDS] = [
            0x2403_03F0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 0xFFFF_FFFF, 0x8000_0000,
        ];
        assert_eq!(Packet::from_words(&words).to_words(), words);
    }
}

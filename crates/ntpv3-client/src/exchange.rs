// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! One request/reply round trip over a [`Transport`].

use log::{debug, trace};

use crate::calc::Calculator;
use crate::clock::Clock;
use crate::config::ClientConfig;
use crate::error::{NtpError, ProtocolError};
use crate::protocol::{self, LeapIndicator, Mode, Packet, Stratum};
use crate::transport::Transport;

/// Size of the receive buffer. Replies longer than the fixed packet are accepted and the
/// trailing bytes ignored.
const RECV_BUF_SIZE: usize = 1024;

/// Build the request this client sends at `clock`'s current time.
pub fn build_request<C: Clock + ?Sized>(clock: &C, config: &ClientConfig) -> Packet {
    let request = protocol::make_request(clock.now());
    if config.legacy_originate_placeholder {
        request.with_legacy_originate_placeholder()
    } else {
        request
    }
}

/// Check that a decoded reply comes from a synchronized NTP server.
///
/// Rejects replies whose mode is not server, whose version is outside 1-4, whose transmit
/// timestamp is zero, or that carry LI=3 with a non-zero stratum.
pub fn validate_reply(packet: &Packet) -> Result<(), ProtocolError> {
    let header = &packet.header;
    if header.mode != Mode::Server {
        return Err(ProtocolError::UnexpectedMode {
            mode: header.mode as u8,
        });
    }
    if !header.version.is_known() {
        return Err(ProtocolError::UnsupportedVersion {
            version: header.version.value(),
        });
    }
    if packet.transmit_timestamp.is_zero() {
        return Err(ProtocolError::ZeroTransmitTimestamp);
    }
    if header.leap_indicator == LeapIndicator::Unknown && header.stratum != Stratum::UNSPECIFIED
    {
        return Err(ProtocolError::UnsynchronizedServer);
    }
    Ok(())
}

/// Run one exchange: send a request, wait up to `config.timeout` for the reply, decode it and
/// hand it to `calculator`.
///
/// The arrival instant is read from `clock` as soon as the reply is received, before decoding.
/// Reply timestamps are read with the scaling chosen by `config.legacy_fraction_decode`.
/// Nothing is retried.
///
/// # Errors
///
/// - [`NtpError::Transport`] if the send or receive fails, or fewer than 48 bytes were sent
/// - [`NtpError::Timeout`] if no reply arrives within the bound
/// - [`NtpError::MalformedPacket`] if the reply is shorter than 48 bytes, or fails
///   [`validate_reply`] when `config.strict` is set
pub fn perform_exchange<T, C, K>(
    transport: &mut T,
    clock: &C,
    calculator: &K,
    config: &ClientConfig,
) -> Result<K::Output, NtpError>
where
    T: Transport + ?Sized,
    C: Clock + ?Sized,
    K: Calculator + ?Sized,
{
    let request = build_request(clock, config);
    trace!("request: {:?}", request);

    let sent = transport
        .send(&request.to_wire())
        .map_err(NtpError::Transport)?;
    debug!("sent: {}", sent);
    if sent != Packet::SIZE {
        return Err(NtpError::Transport(std::io::Error::new(
            std::io::ErrorKind::WriteZero,
            format!("short send: {sent} of {} bytes", Packet::SIZE),
        )));
    }

    let mut recv_buf = [0u8; RECV_BUF_SIZE];
    let received = transport
        .recv_within(&mut recv_buf, config.timeout)
        .map_err(NtpError::Transport)?;
    let Some(recv_len) = received else {
        debug!("no reply within {:?}", config.timeout);
        return Err(NtpError::Timeout {
            after: config.timeout,
        });
    };
    let arrival = clock.now();
    debug!("recv: {} bytes", recv_len);

    if recv_len < Packet::SIZE {
        return Err(ProtocolError::ResponseTooShort { received: recv_len }.into());
    }
    let reply = protocol::decode_reply(&recv_buf[..recv_len])?;
    trace!("reply: {:?}", reply);

    if config.strict {
        validate_reply(&reply)?;
    }
    Ok(calculator.calculate(&reply, arrival, config.fraction_decoding()))
}

// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Tests for error type downcasting through the io::Error boundary.

use std::io;
use std::time::Duration;

use ntpv3_client::error::{NtpError, ParseError, ProtocolError, ResolutionError};

fn downcast(io_err: &io::Error) -> &NtpError {
    io_err
        .get_ref()
        .unwrap()
        .downcast_ref::<NtpError>()
        .unwrap()
}

#[test]
fn test_malformed_packet_roundtrip() {
    let err = NtpError::MalformedPacket(ProtocolError::ResponseTooShort { received: 10 });
    let io_err: io::Error = err.into();

    assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);
    assert!(matches!(
        downcast(&io_err),
        NtpError::MalformedPacket(ProtocolError::ResponseTooShort { received: 10 })
    ));
}

#[test]
fn test_timeout_roundtrip() {
    let err = NtpError::Timeout {
        after: Duration::from_secs(1),
    };
    let io_err: io::Error = err.into();

    assert_eq!(io_err.kind(), io::ErrorKind::TimedOut);
    assert!(matches!(
        downcast(&io_err),
        NtpError::Timeout { after } if *after == Duration::from_secs(1)
    ));
}

#[test]
fn test_resolution_roundtrip() {
    let err = NtpError::Resolution(ResolutionError::NoAddresses {
        address: "ntp.example".to_string(),
    });
    let io_err: io::Error = err.into();

    assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
    assert!(matches!(
        downcast(&io_err),
        NtpError::Resolution(ResolutionError::NoAddresses { address }) if address == "ntp.example"
    ));
}

#[test]
fn test_transport_keeps_kind() {
    let err = NtpError::Transport(io::Error::new(io::ErrorKind::AddrNotAvailable, "no addr"));
    let io_err: io::Error = err.into();

    assert_eq!(io_err.kind(), io::ErrorKind::AddrNotAvailable);
    assert!(matches!(downcast(&io_err), NtpError::Transport(_)));
}

#[test]
fn test_question_mark_into_io_result() {
    fn as_io() -> io::Result<()> {
        Err(NtpError::MalformedPacket(ProtocolError::UnsynchronizedServer))?;
        Ok(())
    }
    let io_err = as_io().unwrap_err();
    assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);
    assert_eq!(
        io_err.to_string(),
        "malformed NTP packet: server reports unsynchronized clock"
    );
}

#[test]
fn test_parse_error_conversions() {
    let short = ParseError::BufferTooShort {
        needed: 48,
        available: 12,
    };
    assert_eq!(
        io::Error::from(short.clone()).kind(),
        io::ErrorKind::UnexpectedEof
    );
    assert!(matches!(
        NtpError::from(short),
        NtpError::MalformedPacket(ProtocolError::ResponseTooShort { received: 12 })
    ));
}

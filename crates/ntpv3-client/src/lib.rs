// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

/*!
Blocking NTPv3 client: one request, one reply, no retries.

# Example
Fetch the current time from a server, and correct the local clock reading by
the measured offset.

```rust,no_run
extern crate chrono;
extern crate ntpv3_client;

use chrono::TimeZone;

fn main() -> Result<(), ntpv3_client::NtpError> {
    let server_time = ntpv3_client::get_time("pool.ntp.org")?;
    let local_time = chrono::Local
        .timestamp_opt(server_time.secs(), server_time.subsec_nanos() as _)
        .unwrap();
    println!("{}", local_time);

    let offset = ntpv3_client::get_offset_ms("pool.ntp.org")?;
    let corrected = ntpv3_client::apply_offset(ntpv3_client::unix_time::Instant::now(), offset);
    println!("offset: {} ms, corrected: {}.{:09}", offset, corrected.secs(), corrected.subsec_nanos());
    Ok(())
}
```

Each call resolves the server, opens a UDP socket, performs one exchange
through [`exchange::perform_exchange`], and closes the socket on return.
Custom transports and clocks can drive the same exchange directly.
*/

#![deny(unsafe_code)]
#![warn(missing_docs)]

// Re-export protocol types from ntpv3_proto for convenience.
pub use ntpv3_proto::{protocol, unix_time};

pub use ntpv3_proto::unix_time::apply_offset;

/// Result calculators applied to a decoded reply.
pub mod calc;

/// Local wall-clock source.
pub mod clock;

/// Per-exchange configuration.
pub mod config;

/// Error types for the NTP client.
pub mod error;

/// The request/reply round trip.
pub mod exchange;

/// Datagram transport and address resolution.
pub mod transport;

pub use calc::TimeSample;
pub use config::ClientConfig;
pub use error::NtpError;

use crate::calc::{AbsoluteTime, Calculator, ClockOffset, RoundTrip};
use crate::clock::SystemClock;
use crate::transport::UdpTransport;
use crate::unix_time::Instant;

/// Run one exchange with `server` over UDP using `calculator`.
fn exchange_with<K: Calculator>(
    server: &str,
    config: &ClientConfig,
    calculator: &K,
) -> Result<K::Output, NtpError> {
    let mut transport = UdpTransport::connect(server, config)?;
    exchange::perform_exchange(&mut transport, &SystemClock, calculator, config)
}

/// Query `server` for the current time.
///
/// `server` may be a hostname, an IP literal, or `host:port`; port 123 is used when none is
/// given. Waits at most one second for the reply.
///
/// # Examples
///
/// ```no_run
/// let now = ntpv3_client::get_time("time.nist.gov")?;
/// println!("{}.{:09}", now.secs(), now.subsec_nanos());
/// # Ok::<(), ntpv3_client::NtpError>(())
/// ```
pub fn get_time(server: &str) -> Result<Instant, NtpError> {
    get_time_with_config(server, &ClientConfig::default())
}

/// [`get_time`] with explicit configuration.
pub fn get_time_with_config(server: &str, config: &ClientConfig) -> Result<Instant, NtpError> {
    exchange_with(server, config, &AbsoluteTime)
}

/// Measure the local clock offset against `server`, in milliseconds.
///
/// A positive offset means the server is ahead of the local clock; add it with
/// [`apply_offset`] to obtain the corrected time.
pub fn get_offset_ms(server: &str) -> Result<i64, NtpError> {
    get_offset_ms_with_config(server, &ClientConfig::default())
}

/// [`get_offset_ms`] with explicit configuration.
pub fn get_offset_ms_with_config(server: &str, config: &ClientConfig) -> Result<i64, NtpError> {
    exchange_with(server, config, &ClockOffset)
}

/// Measure server time, clock offset and round-trip delay in a single exchange.
pub fn query(server: &str, config: &ClientConfig) -> Result<TimeSample, NtpError> {
    exchange_with(server, config, &RoundTrip)
}

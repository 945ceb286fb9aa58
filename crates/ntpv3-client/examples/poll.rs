// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

// Polling client example demonstrating:
// - One exchange per call, retried by the caller on a fixed interval
// - Server time, clock offset, and reply header fields
// - EnvFilter for RUST_LOG support (library `log` records included)
//
// Run with:
//   cargo run -p ntpv3-client --example poll -- [server] [count]
//
// Show the library's per-exchange logging:
//   RUST_LOG=ntpv3_client=debug cargo run -p ntpv3-client --example poll -- time.nist.gov 3

use std::thread;
use std::time::Duration;

use chrono::{Local, TimeZone};
use ntpv3_client::calc::ReplyPacket;
use ntpv3_client::clock::SystemClock;
use ntpv3_client::exchange::perform_exchange;
use ntpv3_client::transport::UdpTransport;
use ntpv3_client::unix_time::Instant;
use ntpv3_client::{ClientConfig, NtpError};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_SERVER: &str = "cn.pool.ntp.org";
const POLL_INTERVAL: Duration = Duration::from_secs(4);

fn format_time(t: Instant) -> String {
    match Local.timestamp_opt(t.secs(), t.subsec_nanos() as u32) {
        chrono::LocalResult::Single(dt) => dt.format("%a %b %e %H:%M:%S%.3f %Y").to_string(),
        _ => format!("{}.{:09}", t.secs(), t.subsec_nanos()),
    }
}

/// Print the reply header fields of one extra exchange.
fn log_reply_header(server: &str, config: &ClientConfig) -> Result<(), NtpError> {
    let mut transport = UdpTransport::connect(server, config)?;
    let reply = perform_exchange(&mut transport, &SystemClock, &ReplyPacket, config)?;
    info!(
        peer = %transport.peer_addr(),
        version = reply.header.version.value(),
        stratum = reply.header.stratum.0,
        poll = reply.header.poll,
        precision = reply.header.precision,
        root_delay_us = reply.root_delay.to_micros(),
        root_dispersion_us = reply.root_dispersion.to_micros(),
        "reply header"
    );
    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let server = args.next().unwrap_or_else(|| DEFAULT_SERVER.to_string());
    let count: Option<u64> = args.next().and_then(|c| c.parse().ok());
    let config = ClientConfig::default();

    info!(server = %server, interval_s = POLL_INTERVAL.as_secs(), "polling");
    if let Err(e) = log_reply_header(&server, &config) {
        warn!(error = %e, "header query failed");
    }

    let mut round = 0u64;
    loop {
        round += 1;
        match ntpv3_client::get_time_with_config(&server, &config) {
            Ok(server_time) => {
                println!("TIME: {}", format_time(server_time));
                match ntpv3_client::get_offset_ms_with_config(&server, &config) {
                    Ok(offset) => {
                        let corrected = ntpv3_client::apply_offset(Instant::now(), offset);
                        println!("offset: {offset} ms");
                        info!(offset_ms = offset, corrected = %format_time(corrected), "offset");
                    }
                    Err(e) => warn!(error = %e, "offset query failed"),
                }
            }
            Err(e) => warn!(error = %e, "time query failed"),
        }

        if count.is_some_and(|n| round >= n) {
            break;
        }
        thread::sleep(POLL_INTERVAL);
    }
}

// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Tests against public NTP servers. Run with `--ignored` on a networked host.

mod common;

use std::io;
use std::time::Duration;

use ntpv3_client::error::NtpError;
use ntpv3_client::{ClientConfig, get_offset_ms_with_config, get_time_with_config, query};

/// Maximum acceptable clock offset (5 seconds).
const MAX_OFFSET_MS: i64 = 5_000;

fn config() -> ClientConfig {
    ClientConfig::builder()
        .timeout(Duration::from_secs(5))
        .strict(true)
        .build()
}

fn skip_or_panic(server: &str, err: NtpError) {
    let io_err: io::Error = err.into();
    if common::is_network_skip_error(&io_err) {
        eprintln!("skipping {server}: {io_err}");
    } else {
        panic!("unexpected error from {server}: {io_err}");
    }
}

#[test]
#[ignore = "requires outbound UDP/123"]
fn live_pool_time() {
    let server = "pool.ntp.org";
    match get_time_with_config(server, &config()) {
        // Later than 2024-01-01.
        Ok(t) => assert!(t.secs() > common::UNIX_2024),
        Err(e) => skip_or_panic(server, e),
    }
}

#[test]
#[ignore = "requires outbound UDP/123"]
fn live_nist_offset() {
    let server = "time.nist.gov";
    match get_offset_ms_with_config(server, &config()) {
        Ok(offset) => assert!(offset.abs() < MAX_OFFSET_MS, "offset {offset} ms"),
        Err(e) => skip_or_panic(server, e),
    }
}

#[test]
#[ignore = "requires outbound UDP/123"]
fn live_cloudflare_query() {
    let server = "time.cloudflare.com:123";
    match query(server, &config()) {
        Ok(sample) => {
            assert!(sample.offset_ms.abs() < MAX_OFFSET_MS);
            assert!(sample.delay_ms >= 0 && sample.delay_ms < 2_000);
        }
        Err(e) => skip_or_panic(server, e),
    }
}

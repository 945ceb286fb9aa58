// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Per-exchange client configuration.

use std::time::Duration;

use crate::calc::FractionDecoding;
use crate::protocol;

/// Default bound on the wait for a reply.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Settings for a single NTP exchange.
///
/// The defaults reproduce the classic client: one second reply timeout, port
/// 123, IPv4 preferred, permissive reply decoding, zero originate timestamp.
/// Timestamp fractions are decoded exactly unless `legacy_fraction_decode` is set.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientConfig {
    /// Bound on the wait for a reply after the request has been sent.
    pub timeout: Duration,
    /// Port used when the server address does not carry one.
    pub port: u16,
    /// Prefer IPv4 addresses when the server resolves to both families.
    pub prefer_ipv4: bool,
    /// Reject replies that are not from a synchronized NTP server.
    ///
    /// When unset, any reply of at least 48 bytes is accepted.
    pub strict: bool,
    /// Send 65536 in the originate fraction of the request, as older
    /// clients did.
    pub legacy_originate_placeholder: bool,
    /// Decode reply timestamp fractions with the older client's approximate
    /// scaling, which reads up to about 380 µs high.
    pub legacy_fraction_decode: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            timeout: DEFAULT_TIMEOUT,
            port: protocol::PORT,
            prefer_ipv4: true,
            strict: false,
            legacy_originate_placeholder: false,
            legacy_fraction_decode: false,
        }
    }
}

impl ClientConfig {
    /// How reply timestamps are turned into local instants.
    pub fn fraction_decoding(&self) -> FractionDecoding {
        if self.legacy_fraction_decode {
            FractionDecoding::Legacy
        } else {
            FractionDecoding::Exact
        }
    }

    /// Start building a configuration from the defaults.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: ClientConfig::default(),
        }
    }
}

/// Builder for [`ClientConfig`].
///
/// ```
/// use std::time::Duration;
/// use ntpv3_client::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .timeout(Duration::from_millis(500))
///     .strict(true)
///     .build();
/// assert_eq!(config.port, 123);
/// ```
#[derive(Clone, Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the reply timeout (default: 1 second).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the default server port (default: 123).
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Prefer IPv4 addresses during resolution (default: `true`).
    pub fn prefer_ipv4(mut self, prefer: bool) -> Self {
        self.config.prefer_ipv4 = prefer;
        self
    }

    /// Enable strict reply validation (default: `false`).
    pub fn strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    /// Send the legacy originate placeholder (default: `false`).
    pub fn legacy_originate_placeholder(mut self, enabled: bool) -> Self {
        self.config.legacy_originate_placeholder = enabled;
        self
    }

    /// Decode fractions with the legacy scaling (default: `false`).
    pub fn legacy_fraction_decode(mut self, enabled: bool) -> Self {
        self.config.legacy_fraction_decode = enabled;
        self
    }

    /// Finish building.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! NTPv3 protocol types, packet codec, and integer fixed-point timestamp
//! conversion.
//!
//! This crate provides the foundational types for a minimal NTPv3 client
//! (RFC 1305): the 48-byte packet layout with its network byte order
//! transcoders, and conversion between local wall-clock time and the NTP
//! 64-bit timestamp format without floating point.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Custom error types for buffer-based NTP packet parsing and serialization.
pub mod error;

/// NTP protocol types and constants (RFC 1305).
pub mod protocol;

/// Unix time conversion utilities for NTP timestamps.
///
/// Provides the `Instant` type for converting between NTP timestamps
/// (seconds since 1900-01-01) and Unix timestamps (seconds since 1970-01-01),
/// and for applying millisecond clock corrections.
pub mod unix_time;

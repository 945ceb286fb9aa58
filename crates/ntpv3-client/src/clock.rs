// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Local wall-clock source.

use crate::unix_time::Instant;

/// A source of local wall-clock readings.
///
/// The exchange reads it twice: once for the request's transmit timestamp and
/// once, immediately after the reply arrives, for the arrival instant.
pub trait Clock {
    /// The current local time.
    fn now(&self) -> Instant;
}

/// The host's wall clock (not monotonic).
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

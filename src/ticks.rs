//! Wrapping millisecond tick timestamps.
//!
//! Scanner peripherals stamp their events with a free-running millisecond
//! counter that wraps at a fixed width. Comparing two such stamps with plain
//! integer `<` silently breaks at the wrap boundary, so this module provides
//! a ring-aware ordering instead.
//!
//! ## Conventions
//! - Ticks are `u32` milliseconds and wrap at 2^32 ms (~49.7 days).
//! - [`TickMs::is_before`] is correct while the two stamps are within half
//!   the ring (2^31 ms, about 24.8 days) of each other.
//! - `TickMs` intentionally does **not** implement `Ord`/`PartialOrd`: ring
//!   order is not a total order, and exposing the naive integer order would
//!   reintroduce the wraparound bug this type exists to avoid.

use std::fmt;
use std::time::Instant;

/// A wrapping millisecond timestamp from a monotonic tick counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TickMs(pub u32);

impl TickMs {
    /// Wraps a raw millisecond count into a tick stamp.
    #[inline]
    pub const fn new(ms: u32) -> Self {
        Self(ms)
    }

    /// Ring-aware strict ordering: `true` if `self` comes before `other`.
    ///
    /// Evaluates the sign of the wrapping difference, so stamps taken on
    /// either side of the wrap boundary still order correctly. Returns
    /// `false` for equal stamps.
    #[inline]
    pub fn is_before(self, other: TickMs) -> bool {
        (self.0.wrapping_sub(other.0) as i32) < 0
    }

    /// The stamp `ms` milliseconds after `self`, wrapping.
    #[inline]
    pub const fn wrapping_add_ms(self, ms: u32) -> TickMs {
        TickMs(self.0.wrapping_add(ms))
    }

    /// Milliseconds elapsed from `earlier` to `self`, wrapping.
    #[inline]
    pub const fn ms_since(self, earlier: TickMs) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }
}

impl From<u32> for TickMs {
    #[inline]
    fn from(ms: u32) -> Self {
        Self(ms)
    }
}

impl fmt::Display for TickMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Host-side tick source deriving wrapping ticks from a monotonic clock.
///
/// Embedded integrations stamp events from their own hardware counter; this
/// helper exists for demos, tests, and host-thread producers such as
/// [`ChannelPad`](crate::backends::channel::ChannelPad) feeders.
#[derive(Clone, Debug)]
pub struct TickClock {
    epoch: Instant,
}

impl TickClock {
    /// Starts a clock; `now()` counts from this moment.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }

    /// Current tick stamp, truncated into the wrapping tick ring.
    #[inline]
    pub fn now(&self) -> TickMs {
        TickMs(self.epoch.elapsed().as_millis() as u32)
    }
}

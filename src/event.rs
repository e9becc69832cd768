//! Key transition events.
//!
//! padmux represents input as small, scanner-agnostic transition records:
//! the raw per-scanner [`KeyEvent`] and the merged, provenance-tagged
//! [`PadEvent`] yielded by the queue.
//!
//! ## Value conventions
//! - **Key numbers** are scanner-local in [`KeyEvent`] and (by default)
//!   unified in [`PadEvent`]: the queue adds the cumulative key count of all
//!   lower-indexed pads, so every physical key gets one global number.
//! - **Transitions:** `pressed == true` is a press edge, otherwise a release
//!   edge. Exactly one of press/release holds for every event.
//! - **Timestamps** are wrapping [`TickMs`] stamps taken by the scanner at
//!   capture time, not at delivery time.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::ticks::TickMs;

/// A single key transition as produced by one scanner.
///
/// This is the untouched record a [`Scanner`](crate::scanner::Scanner)
/// hands out: the key number is local to that scanner and nothing identifies
/// which scanner produced it. The merge queue wraps it into a [`PadEvent`]
/// for delivery.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// Scanner-local key number, starting at 0.
    pub key_number: u16,
    /// `true` for a press edge, `false` for a release edge.
    pub pressed: bool,
    /// Capture time from the scanner's tick counter.
    pub timestamp: TickMs,
}

impl KeyEvent {
    /// A press edge for `key_number` stamped `at`.
    #[inline]
    pub const fn press(key_number: u16, at: TickMs) -> Self {
        Self {
            key_number,
            pressed: true,
            timestamp: at,
        }
    }

    /// A release edge for `key_number` stamped `at`.
    #[inline]
    pub const fn release(key_number: u16, at: TickMs) -> Self {
        Self {
            key_number,
            pressed: false,
            timestamp: at,
        }
    }

    /// `true` for a release edge. Always the inverse of `pressed`.
    #[inline]
    pub fn released(&self) -> bool {
        !self.pressed
    }
}

/// A merged key transition, tagged with the pad that produced it.
///
/// `key_number` is the delivered key number: unified across pads when the
/// queue renumbers (the default), scanner-local otherwise. The original
/// scanner record is kept in [`raw`](Self::raw) for consumers that need
/// untouched access, e.g. to the pad-local key number.
///
/// # Equality and hashing
/// Two events are equal iff `pad_number`, `key_number`, `pressed` and
/// `timestamp` all match; `raw` is provenance, not identity. Hashing uses
/// the packed [`key_id`](Self::key_id), which assumes fewer than 8192 keys
/// in the delivered namespace; beyond that, distinct keys may share a hash
/// bucket (lookups stay correct, they just collide). Known limitation, not
/// a guarantee.
#[derive(Clone, Copy, Debug, Default)]
pub struct PadEvent {
    /// Index of the scanner that produced this event, in queue order.
    pub pad_number: u8,
    /// Delivered key number (see type-level docs).
    pub key_number: u16,
    /// `true` for a press edge, `false` for a release edge.
    pub pressed: bool,
    /// Capture time copied from the raw event.
    pub timestamp: TickMs,
    /// The untouched scanner record this event was built from.
    pub raw: KeyEvent,
}

impl PadEvent {
    /// Builds a delivered event from a raw scanner record, renumbering the
    /// key by `offset` (0 leaves it pad-local).
    pub(crate) fn renumbered(pad_number: u8, raw: KeyEvent, offset: u16) -> Self {
        Self {
            pad_number,
            key_number: raw.key_number + offset,
            pressed: raw.pressed,
            timestamp: raw.timestamp,
            raw,
        }
    }

    /// `true` for a release edge. Always the inverse of `pressed`.
    #[inline]
    pub fn released(&self) -> bool {
        !self.pressed
    }

    /// Packed identity distinguishing pad, delivered key number, and edge:
    /// `pad << 14 | key << 1 | pressed`.
    ///
    /// Key numbers must stay below 8192 for the packing to be collision
    /// free; see the type-level docs.
    #[inline]
    pub fn key_id(&self) -> u32 {
        (self.pad_number as u32) << 14 | (self.key_number as u32) << 1 | self.pressed as u32
    }
}

impl PartialEq for PadEvent {
    fn eq(&self, other: &Self) -> bool {
        self.pad_number == other.pad_number
            && self.key_number == other.key_number
            && self.pressed == other.pressed
            && self.timestamp == other.timestamp
    }
}

impl Eq for PadEvent {}

impl Hash for PadEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Subset of the equality fields: equal events always hash equal,
        // events differing only in timestamp may collide.
        state.write_u32(self.key_id());
    }
}

impl fmt::Display for PadEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edge = if self.pressed { "pressed" } else { "released" };
        write!(
            f,
            "pad {} key {} {} @{}",
            self.pad_number, self.key_number, edge, self.timestamp
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::pretty_assertions::assert_eq;

    use std::collections::hash_map::DefaultHasher;

    fn hash_of(event: &PadEvent) -> u64 {
        let mut hasher = DefaultHasher::new();
        event.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn press_and_release_constructors() {
        let down = KeyEvent::press(3, TickMs(10));
        assert!(down.pressed);
        assert!(!down.released());

        let up = KeyEvent::release(3, TickMs(12));
        assert!(!up.pressed);
        assert!(up.released());
    }

    #[test]
    fn renumbering_offsets_the_key_and_keeps_the_raw_record() {
        let raw = KeyEvent::press(2, TickMs(40));
        let event = PadEvent::renumbered(1, raw, 3);

        assert_eq!(event.key_number, 5);
        assert_eq!(event.pad_number, 1);
        assert_eq!(event.timestamp, TickMs(40));
        assert_eq!(event.raw, raw);
        assert_eq!(event.raw.key_number, 2);
    }

    /// Identity is `(pad, key, edge, timestamp)`; the raw record carries
    /// provenance only.
    #[test]
    fn equality_ignores_the_raw_record() {
        let a = PadEvent::renumbered(0, KeyEvent::press(4, TickMs(7)), 0);
        let mut b = a;
        b.raw.key_number = 99;
        assert_eq!(a, b);

        let later = PadEvent::renumbered(0, KeyEvent::press(4, TickMs(8)), 0);
        assert_ne!(a, later);

        let release = PadEvent::renumbered(0, KeyEvent::release(4, TickMs(7)), 0);
        assert_ne!(a, release);
    }

    #[test]
    fn equal_events_hash_equal() {
        let a = PadEvent::renumbered(2, KeyEvent::press(1, TickMs(100)), 8);
        let b = PadEvent::renumbered(2, KeyEvent::press(1, TickMs(100)), 8);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn key_id_separates_pad_key_and_edge() {
        let press = PadEvent::renumbered(1, KeyEvent::press(5, TickMs(0)), 0);
        let release = PadEvent::renumbered(1, KeyEvent::release(5, TickMs(0)), 0);
        let other_pad = PadEvent::renumbered(2, KeyEvent::press(5, TickMs(0)), 0);
        let other_key = PadEvent::renumbered(1, KeyEvent::press(6, TickMs(0)), 0);

        assert_eq!(press.key_id(), 1 << 14 | 5 << 1 | 1);
        assert_ne!(press.key_id(), release.key_id());
        assert_ne!(press.key_id(), other_pad.key_id());
        assert_ne!(press.key_id(), other_key.key_id());
    }

    #[test]
    fn display_is_human_readable() {
        let event = PadEvent::renumbered(1, KeyEvent::press(2, TickMs(1234)), 3);
        assert_eq!(event.to_string(), "pad 1 key 5 pressed @1234ms");
    }
}

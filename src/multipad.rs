//! One-stop facade over a set of keypads.
//!
//! [`MultiKeypad`] owns the scanners, wires them into an
//! [`EventMultiQueue`] with unified key numbering, and remembers the
//! combined key count so callers can size key-state tables without
//! re-deriving it. Firmware loops that want the pieces individually can
//! build an [`EventMultiQueue`] directly instead.

use crate::event::PadEvent;
use crate::queue::{EventMultiQueue, KeyNumbering};
use crate::scanner::Scanner;

/// Several keypads presented as one: a merged event queue plus the summed
/// key count.
///
/// Keys are renumbered into one namespace in pad order. With pads of 3, 5
/// and 2 keys, pad 0 owns keys 0..3, pad 1 owns 3..8 and pad 2 owns 8..10,
/// for a [`key_count`](Self::key_count) of 10.
pub struct MultiKeypad {
    /// The merged stream. Poll it directly:
    /// `while let Some(event) = pads.events.get() { .. }`.
    pub events: EventMultiQueue,
    key_count: u16,
}

impl MultiKeypad {
    /// Bundles `pads` into one logical keypad.
    pub fn new(pads: Vec<Box<dyn Scanner>>) -> Self {
        let key_count = pads.iter().map(|pad| pad.key_count()).sum();
        let events = EventMultiQueue::new(pads, KeyNumbering::Unified);
        Self { events, key_count }
    }

    /// Total number of keys across all pads.
    #[inline]
    pub fn key_count(&self) -> u16 {
        self.key_count
    }

    /// Number of pads behind the facade.
    #[inline]
    pub fn pad_count(&self) -> usize {
        self.events.pad_count()
    }

    /// Shorthand for `self.events.get()`.
    pub fn next_event(&mut self) -> Option<PadEvent> {
        self.events.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::pretty_assertions::assert_eq;

    use crate::backends::virtual_pad::VirtualPad;
    use crate::ticks::TickMs;

    fn pads(counts: &[u16]) -> Vec<Box<dyn Scanner>> {
        counts
            .iter()
            .map(|&count| Box::new(VirtualPad::new(count)) as Box<dyn Scanner>)
            .collect()
    }

    #[test]
    fn sums_key_counts_across_pads() {
        let pads = MultiKeypad::new(pads(&[3, 5, 2]));
        assert_eq!(pads.key_count(), 10);
        assert_eq!(pads.pad_count(), 3);
    }

    #[test]
    fn events_use_the_unified_namespace() {
        let mut a = VirtualPad::new(3);
        let mut b = VirtualPad::new(5);
        a.press(1, TickMs(10));
        b.press(0, TickMs(20));

        let mut pads = MultiKeypad::new(vec![Box::new(a), Box::new(b)]);
        let first = pads.next_event().unwrap();
        let second = pads.events.get().unwrap();

        assert_eq!((first.pad_number, first.key_number), (0, 1));
        assert_eq!((second.pad_number, second.key_number), (1, 3));
        assert_eq!(pads.next_event(), None);
    }

    #[test]
    fn facade_over_no_pads_is_empty() {
        let mut pads = MultiKeypad::new(Vec::new());
        assert_eq!(pads.key_count(), 0);
        assert_eq!(pads.next_event(), None);
        assert!(pads.events.is_empty());
        assert!(!pads.events.overflowed());
    }
}

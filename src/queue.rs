//! The merge-by-timestamp event queue.
//!
//! [`EventMultiQueue`] fronts N independent [`Scanner`]s and yields their
//! transitions as one stream in capture-time order, as if every key belonged
//! to a single keypad.
//!
//! ## How the merge works
//! The queue keeps exactly one pending slot per pad. A [`get`] pass:
//! 1. polls each pad **whose slot is empty** for its next event (a pad with
//!    a cached event is not re-polled, so nothing is ever skipped);
//! 2. picks the occupied slot with the earliest timestamp under ring-aware
//!    comparison ([`TickMs::is_before`]);
//! 3. empties that slot and delivers its event, renumbering the key when
//!    [`KeyNumbering::Unified`] is configured.
//!
//! ## Ordering guarantees
//! - Events come out in non-decreasing timestamp order across all pads.
//! - On an exact timestamp tie the lowest pad index wins: pads are visited
//!   in index order and the selection is only overwritten on a strictly
//!   earlier stamp, never on an equal one. Deterministic by construction.
//! - With no new scanner activity, repeated [`get`] calls drain exactly the
//!   events that were pending, each once, then return `None`.
//!
//! ## Memory
//! Bounded at construction: one `Option<KeyEvent>` slot per pad, nothing
//! else. Backlog beyond that stays inside the scanners' own buffers.
//!
//! [`get`]: EventMultiQueue::get
//! [`Scanner`]: crate::scanner::Scanner
//! [`TickMs::is_before`]: crate::ticks::TickMs::is_before

use log::trace;

use crate::event::{KeyEvent, PadEvent};
use crate::scanner::Scanner;
use crate::ticks::TickMs;

/// How delivered key numbers relate to scanner-local ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyNumbering {
    /// Renumber every key into one global namespace: a pad's keys start
    /// after all keys of lower-indexed pads (prefix-sum offsets).
    Unified,
    /// Deliver scanner-local key numbers unchanged.
    PadLocal,
}

/// Merges the event streams of several scanners into one, ordered by
/// capture timestamp.
///
/// Construction fixes the pad list for the queue's lifetime; the only
/// mutations afterwards are [`get`](Self::get) (pulls and drains) and
/// [`clear`](Self::clear).
pub struct EventMultiQueue {
    pads: Vec<Box<dyn Scanner>>,
    /// One cached, already-polled-but-undelivered event per pad.
    pending: Vec<Option<KeyEvent>>,
    /// Key-number offset per pad: cumulative key count of all lower-indexed
    /// pads, or all zeros in [`KeyNumbering::PadLocal`] mode.
    offsets: Vec<u16>,
}

impl EventMultiQueue {
    /// Builds a queue over `pads`, visited in the given order forever.
    ///
    /// With [`KeyNumbering::Unified`] the summed key count must fit `u16`;
    /// keep it below 8192 if events are used as hash keys (see
    /// [`PadEvent`]).
    pub fn new(pads: Vec<Box<dyn Scanner>>, numbering: KeyNumbering) -> Self {
        let offsets = match numbering {
            KeyNumbering::Unified => {
                let mut offsets = Vec::with_capacity(pads.len());
                let mut total: u16 = 0;
                for pad in &pads {
                    offsets.push(total);
                    total += pad.key_count();
                }
                offsets
            }
            KeyNumbering::PadLocal => vec![0; pads.len()],
        };
        let pending = vec![None; pads.len()];
        Self {
            pads,
            pending,
            offsets,
        }
    }

    /// Returns the next key transition across all pads, or `None` if no pad
    /// has anything pending. Non-blocking; O(pad count).
    pub fn get(&mut self) -> Option<PadEvent> {
        let mut earliest: Option<(usize, TickMs)> = None;

        for (index, (pad, slot)) in self
            .pads
            .iter_mut()
            .zip(self.pending.iter_mut())
            .enumerate()
        {
            // Only re-poll a pad whose cached event has been delivered.
            if slot.is_none() {
                *slot = pad.poll_event();
            }
            if let Some(event) = slot {
                let earlier = match earliest {
                    None => true,
                    // Strict comparison: on a timestamp tie the pad seen
                    // first (lowest index) keeps the win.
                    Some((_, held)) => event.timestamp.is_before(held),
                };
                if earlier {
                    earliest = Some((index, event.timestamp));
                }
            }
        }

        let (winner, _) = earliest?;
        let raw = self.pending[winner].take()?;
        let event = PadEvent::renumbered(winner as u8, raw, self.offsets[winner]);
        trace!("delivering {event}");
        Some(event)
    }

    /// Overwrites `target` in place with the result of [`get`](Self::get).
    ///
    /// Returns `true` and updates every field of `target` when an event was
    /// available; returns `false` and leaves `target` untouched otherwise.
    /// Exists for call sites that recycle one event record instead of
    /// binding a fresh one per poll; behaviorally identical to `get`.
    pub fn get_into(&mut self, target: &mut PadEvent) -> bool {
        match self.get() {
            Some(event) => {
                *target = event;
                true
            }
            None => false,
        }
    }

    /// Drains events until the queue is momentarily empty.
    ///
    /// Equivalent to calling [`get`](Self::get) until it returns `None`.
    pub fn drain(&mut self) -> Drain<'_> {
        Drain { queue: self }
    }

    /// Discards all queued transitions: every pad's internal buffer and
    /// this layer's pending cache. Also resets the pads' overflow flags.
    pub fn clear(&mut self) {
        for (pad, slot) in self.pads.iter_mut().zip(self.pending.iter_mut()) {
            pad.clear();
            // A stale cached event must not survive the clear.
            *slot = None;
        }
        trace!("queue cleared");
    }

    /// `true` if any pad dropped a transition since the last
    /// [`clear`](Self::clear) because its buffer was full.
    pub fn overflowed(&self) -> bool {
        self.pads.iter().any(|pad| pad.overflowed())
    }

    /// Total transitions retrievable right now: the pads' buffered backlogs
    /// plus events already cached in this layer's pending slots.
    pub fn len(&self) -> usize {
        let queued: usize = self.pads.iter().map(|pad| pad.queued()).sum();
        let cached = self.pending.iter().filter(|slot| slot.is_some()).count();
        queued + cached
    }

    /// `true` if [`len`](Self::len) is zero.
    pub fn is_empty(&self) -> bool {
        self.pending.iter().all(Option::is_none) && self.pads.iter().all(|pad| pad.queued() == 0)
    }

    /// Number of pads this queue merges.
    #[inline]
    pub fn pad_count(&self) -> usize {
        self.pads.len()
    }
}

/// Iterator returned by [`EventMultiQueue::drain`].
pub struct Drain<'a> {
    queue: &'a mut EventMultiQueue,
}

impl Iterator for Drain<'_> {
    type Item = PadEvent;

    fn next(&mut self) -> Option<PadEvent> {
        self.queue.get()
    }
}

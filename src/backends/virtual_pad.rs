//! A scriptable in-memory keypad.
//!
//! [`VirtualPad`] buffers whatever transitions the test or demo feeds it
//! and plays them back through the [`Scanner`] interface, FIFO, with the
//! same bounded-buffer overflow behavior as real keypad firmware.

use std::collections::VecDeque;

use log::debug;

use crate::event::KeyEvent;
use crate::scanner::Scanner;
use crate::ticks::TickMs;

/// Default buffer depth, sized like the small event queues of keypad
/// firmware.
pub const DEFAULT_CAPACITY: usize = 64;

/// A keypad whose events are injected by the caller instead of scanned
/// from hardware.
pub struct VirtualPad {
    key_count: u16,
    buffer: VecDeque<KeyEvent>,
    capacity: usize,
    overflowed: bool,
}

impl VirtualPad {
    /// A pad with `key_count` keys and the [`DEFAULT_CAPACITY`] buffer.
    pub fn new(key_count: u16) -> Self {
        Self::with_capacity(key_count, DEFAULT_CAPACITY)
    }

    /// A pad holding at most `capacity` undelivered transitions.
    pub fn with_capacity(key_count: u16, capacity: usize) -> Self {
        Self {
            key_count,
            buffer: VecDeque::with_capacity(capacity),
            capacity,
            overflowed: false,
        }
    }

    /// Injects a raw transition into the pad's buffer.
    ///
    /// A full buffer drops the incoming event and latches the overflow
    /// flag, exactly like a scan ISR with nowhere to put a transition.
    pub fn feed(&mut self, event: KeyEvent) {
        debug_assert!(
            event.key_number < self.key_count,
            "key {} out of range for a {}-key pad",
            event.key_number,
            self.key_count
        );
        if self.buffer.len() >= self.capacity {
            debug!(
                "virtual pad buffer full, dropping key {} at {}",
                event.key_number, event.timestamp
            );
            self.overflowed = true;
            return;
        }
        self.buffer.push_back(event);
    }

    /// Injects a press of `key_number` stamped `at`.
    pub fn press(&mut self, key_number: u16, at: TickMs) {
        self.feed(KeyEvent::press(key_number, at));
    }

    /// Injects a release of `key_number` stamped `at`.
    pub fn release(&mut self, key_number: u16, at: TickMs) {
        self.feed(KeyEvent::release(key_number, at));
    }
}

impl Scanner for VirtualPad {
    fn poll_event(&mut self) -> Option<KeyEvent> {
        self.buffer.pop_front()
    }

    fn key_count(&self) -> u16 {
        self.key_count
    }

    fn queued(&self) -> usize {
        self.buffer.len()
    }

    fn clear(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }

    fn overflowed(&self) -> bool {
        self.overflowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::pretty_assertions::assert_eq;

    #[test]
    fn plays_events_back_in_fifo_order() {
        let mut pad = VirtualPad::new(4);
        pad.press(0, TickMs(1));
        pad.press(3, TickMs(2));
        pad.release(0, TickMs(3));

        assert_eq!(pad.queued(), 3);
        assert_eq!(pad.poll_event(), Some(KeyEvent::press(0, TickMs(1))));
        assert_eq!(pad.poll_event(), Some(KeyEvent::press(3, TickMs(2))));
        assert_eq!(pad.poll_event(), Some(KeyEvent::release(0, TickMs(3))));
        assert_eq!(pad.poll_event(), None);
    }

    /// A full buffer drops the newest transition and latches the flag; the
    /// buffered backlog is untouched.
    #[test]
    fn overflow_drops_the_incoming_event() {
        let mut pad = VirtualPad::with_capacity(2, 2);
        pad.press(0, TickMs(1));
        pad.press(1, TickMs(2));
        pad.release(0, TickMs(3));

        assert!(pad.overflowed());
        assert_eq!(pad.queued(), 2);
        assert_eq!(pad.poll_event(), Some(KeyEvent::press(0, TickMs(1))));

        // Draining frees a slot but does not forgive the flag.
        assert!(pad.overflowed());
    }

    #[test]
    fn clear_empties_the_buffer_and_resets_overflow() {
        let mut pad = VirtualPad::with_capacity(1, 1);
        pad.press(0, TickMs(1));
        pad.press(0, TickMs(2));
        assert!(pad.overflowed());

        pad.clear();
        assert_eq!(pad.queued(), 0);
        assert_eq!(pad.poll_event(), None);
        assert!(!pad.overflowed());
    }
}

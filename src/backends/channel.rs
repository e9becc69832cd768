//! A keypad fed through an `mpsc` channel.
//!
//! [`ChannelPad`] adapts an event source that lives on another thread to
//! the single-threaded [`Scanner`] pull model: producers push transitions
//! through a cloned [`PadSender`]; the pad drains the channel into a
//! bounded buffer each time it is polled. Useful for serial readers,
//! network bridges and anything else that cannot be polled in the main
//! loop.

use std::collections::VecDeque;
use std::sync::mpsc;

use log::debug;

use crate::event::KeyEvent;
use crate::scanner::Scanner;
use crate::ticks::TickMs;

use super::virtual_pad::DEFAULT_CAPACITY;

/// Producer handle for a [`ChannelPad`]. Cheap to clone, safe to move to
/// another thread.
#[derive(Clone)]
pub struct PadSender {
    tx: mpsc::Sender<KeyEvent>,
}

impl PadSender {
    /// Pushes a raw transition toward the pad. Returns `false` if the pad
    /// has been dropped.
    pub fn send(&self, event: KeyEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    /// Pushes a press of `key_number` stamped `at`.
    pub fn press(&self, key_number: u16, at: TickMs) -> bool {
        self.send(KeyEvent::press(key_number, at))
    }

    /// Pushes a release of `key_number` stamped `at`.
    pub fn release(&self, key_number: u16, at: TickMs) -> bool {
        self.send(KeyEvent::release(key_number, at))
    }
}

/// A [`Scanner`] whose transitions arrive over a channel.
///
/// Events still in flight in the channel are, to this pad, what unscanned
/// switch state is to a matrix scanner: they do not count as
/// [`queued`](Scanner::queued) until a poll has pumped them into the
/// buffer.
pub struct ChannelPad {
    key_count: u16,
    rx: mpsc::Receiver<KeyEvent>,
    buffer: VecDeque<KeyEvent>,
    capacity: usize,
    overflowed: bool,
}

impl ChannelPad {
    /// A channel-fed pad with `key_count` keys and the default buffer
    /// depth. Returns the pad and its producer handle.
    pub fn new(key_count: u16) -> (Self, PadSender) {
        Self::with_capacity(key_count, DEFAULT_CAPACITY)
    }

    /// A channel-fed pad buffering at most `capacity` transitions.
    pub fn with_capacity(key_count: u16, capacity: usize) -> (Self, PadSender) {
        let (tx, rx) = mpsc::channel();
        let pad = Self {
            key_count,
            rx,
            buffer: VecDeque::with_capacity(capacity),
            capacity,
            overflowed: false,
        };
        (pad, PadSender { tx })
    }

    /// Moves everything waiting in the channel into the bounded buffer,
    /// dropping (and flagging) transitions that do not fit.
    fn pump(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            if self.buffer.len() >= self.capacity {
                debug!(
                    "channel pad buffer full, dropping key {} at {}",
                    event.key_number, event.timestamp
                );
                self.overflowed = true;
                continue;
            }
            self.buffer.push_back(event);
        }
    }
}

impl Scanner for ChannelPad {
    fn poll_event(&mut self) -> Option<KeyEvent> {
        self.pump();
        self.buffer.pop_front()
    }

    fn key_count(&self) -> u16 {
        self.key_count
    }

    fn queued(&self) -> usize {
        self.buffer.len()
    }

    fn clear(&mut self) {
        // Discard in-flight transitions too, or they would surface on the
        // next poll as if nothing had been cleared.
        while self.rx.try_recv().is_ok() {}
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

    use std::thread;

    #[test]
    fn delivers_sent_events_in_order() {
        let (mut pad, sender) = ChannelPad::new(4);
        assert!(sender.press(2, TickMs(10)));
        assert!(sender.release(2, TickMs(30)));

        assert_eq!(pad.poll_event(), Some(KeyEvent::press(2, TickMs(10))));
        assert_eq!(pad.queued(), 1);
        assert_eq!(pad.poll_event(), Some(KeyEvent::release(2, TickMs(30))));
        assert_eq!(pad.poll_event(), None);
    }

    #[test]
    fn receives_from_another_thread() {
        let (mut pad, sender) = ChannelPad::new(8);
        let worker = thread::spawn(move || {
            for key in 0..4u16 {
                sender.press(key, TickMs(key as u32 * 10));
            }
        });
        worker.join().unwrap();

        let keys: Vec<u16> = std::iter::from_fn(|| pad.poll_event())
            .map(|event| event.key_number)
            .collect();
        assert_eq!(keys, vec![0, 1, 2, 3]);
    }

    #[test]
    fn overflow_drops_what_the_buffer_cannot_hold() {
        let (mut pad, sender) = ChannelPad::with_capacity(1, 2);
        for stamp in 0..5u32 {
            sender.press(0, TickMs(stamp));
        }

        assert_eq!(pad.poll_event(), Some(KeyEvent::press(0, TickMs(0))));
        assert!(pad.overflowed());
        // Two buffered, three dropped; the freed slot does not resurrect
        // them.
        assert_eq!(pad.queued(), 1);
        assert_eq!(pad.poll_event(), Some(KeyEvent::press(0, TickMs(1))));
        assert_eq!(pad.poll_event(), None);
    }

    #[test]
    fn clear_discards_buffered_and_in_flight_events() {
        let (mut pad, sender) = ChannelPad::new(2);
        sender.press(0, TickMs(1));
        assert!(pad.poll_event().is_some());
        sender.press(1, TickMs(2)); // still in the channel
        sender.press(0, TickMs(3));

        pad.clear();
        assert_eq!(pad.poll_event(), None);
        assert_eq!(pad.queued(), 0);
        assert!(!pad.overflowed());
    }

    #[test]
    fn send_reports_a_dropped_pad() {
        let (pad, sender) = ChannelPad::new(1);
        drop(pad);
        assert!(!sender.press(0, TickMs(1)));
    }
}

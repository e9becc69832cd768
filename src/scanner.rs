//! The scanner capability interface consumed by the merge queue.

use crate::event::KeyEvent;

/// One physical group of keys, polled for transition events.
///
/// Implementations wrap whatever actually scans the hardware (a debounced
/// GPIO group, a matrix scanner behind an interrupt, a test bench). The
/// queue only ever reads from this interface; it never drives scanning
/// itself. Every method is called from the consumer's context, so
/// implementations with concurrent producers must synchronize internally.
pub trait Scanner {
    /// Returns the oldest unread transition, or `None`. Non-blocking.
    fn poll_event(&mut self) -> Option<KeyEvent>;

    /// Number of keys this scanner manages. Fixed for its lifetime.
    fn key_count(&self) -> u16;

    /// Number of transitions currently buffered and not yet polled.
    fn queued(&self) -> usize;

    /// Discards all buffered transitions and resets the overflow flag.
    fn clear(&mut self);

    /// Sticky flag: `true` if a transition was dropped because the internal
    /// buffer was full. Reset by [`clear`](Self::clear).
    fn overflowed(&self) -> bool;
}

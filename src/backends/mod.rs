//! Keypad backends for `padmux`.
//!
//! Implementations of [`Scanner`](crate::scanner::Scanner) for event
//! sources that are not memory-mapped key matrices:
//!
//! - [`virtual_pad`] — a scriptable in-memory pad for tests, demos and
//!   replay tooling.
//! - [`channel`] — a pad fed through an `mpsc` channel, for event sources
//!   that live on another thread (serial readers, network bridges).
//!
//! Hardware matrix scanners live in board crates and implement
//! [`Scanner`](crate::scanner::Scanner) directly; `padmux` itself does not
//! talk to GPIO.

pub mod channel;
pub mod virtual_pad;

pub use self::channel::{ChannelPad, PadSender};
pub use self::virtual_pad::VirtualPad;

//! padmux — several keypads, one event stream.
//!
//! Provides a unified interface for polling multiple keypad scanners,
//! merging their key transitions in capture-time order, and renumbering
//! keys into a single namespace so application code can treat the whole
//! desk as one big keypad.
//!
//! # Quick start
//! ```
//! use padmux::{MultiKeypad, TickMs, VirtualPad};
//!
//! let mut left = VirtualPad::new(4);
//! let mut right = VirtualPad::new(4);
//! left.press(0, TickMs(10));
//! right.press(3, TickMs(5));
//!
//! let mut pads = MultiKeypad::new(vec![Box::new(left), Box::new(right)]);
//! assert_eq!(pads.key_count(), 8);
//!
//! // The right pad pressed first, so it comes out first, renumbered
//! // into the unified namespace.
//! let first = pads.events.get().unwrap();
//! assert_eq!((first.pad_number, first.key_number), (1, 7));
//! ```
//!
//! # Feature flags
//! - **`profiles`** — serializable key layout profiles ([`layout`]),
//!   enabled by default.

pub mod backends;
pub mod event;
#[cfg(feature = "profiles")]
#[cfg_attr(docsrs, doc(cfg(feature = "profiles")))]
pub mod layout;
pub mod multipad;
pub mod queue;
pub mod scanner;
pub mod ticks;

pub use backends::{ChannelPad, PadSender, VirtualPad};
pub use event::*;
#[cfg(feature = "profiles")]
pub use layout::*;
pub use multipad::*;
pub use queue::*;
pub use scanner::*;
pub use ticks::*;

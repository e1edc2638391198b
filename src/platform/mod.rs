//! Key feed producers.
//!
//! On Windows a low-level keyboard hook observes every key press system-wide
//! on its own thread. Elsewhere the overlay falls back to polling raylib's
//! window input, which only sees keys while the overlay has focus.
//!
//! Both push raw [`KeyEvent`](crate::events::keyboard::KeyEvent)s into the
//! sender half of [`key_feed`](crate::resources::keyfeed::key_feed).

pub mod polling;
#[cfg(windows)]
pub mod windows;

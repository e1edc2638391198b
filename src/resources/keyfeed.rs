//! Key feed resources.
//!
//! The key feed is the only path by which another thread reaches the
//! overlay: the keyboard hook (or the window poller) owns the [`Sender`]
//! half of a bounded channel and the main thread drains the [`KeyFeed`]
//! receiver once per frame. The hook never blocks; when the queue is full
//! events are dropped.
//!
//! [`KeyTracker`] turns the raw transitions into once-per-press actions on
//! the main thread, so no key state is shared across threads.

use bevy_ecs::prelude::Resource;
use crossbeam_channel::{Receiver, Sender, bounded};
use rustc_hash::FxHashSet;

use crate::events::keyboard::{KeyActivation, KeyEvent};
use crate::keymap;

/// Maximum number of raw key events buffered between frames.
pub const KEY_FEED_CAPACITY: usize = 256;

/// Receiving half of the key feed.
#[derive(Resource)]
pub struct KeyFeed {
    pub rx: Receiver<KeyEvent>,
}

/// Create a bounded key feed; the sender goes to the producer thread.
pub fn key_feed() -> (Sender<KeyEvent>, KeyFeed) {
    let (tx, rx) = bounded(KEY_FEED_CAPACITY);
    (tx, KeyFeed { rx })
}

/// What a raw key event resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Activate(KeyActivation),
    Quit,
    Ignored,
}

/// Set of keys currently held down.
#[derive(Resource, Debug, Default)]
pub struct KeyTracker {
    pressed: FxHashSet<u32>,
}

impl KeyTracker {
    /// Feed one raw transition.
    ///
    /// A press activates only if the key is not already held (auto-repeat
    /// is ignored). Pressing F while Ctrl and Alt are held requests exit.
    pub fn handle(&mut self, event: KeyEvent) -> KeyAction {
        if !event.pressed {
            self.pressed.remove(&event.code);
            return KeyAction::Ignored;
        }
        if event.code == keymap::VK_F && self.ctrl_held() && self.alt_held() {
            return KeyAction::Quit;
        }
        if !self.pressed.insert(event.code) {
            return KeyAction::Ignored;
        }
        KeyAction::Activate(KeyActivation {
            code: event.code,
            label: keymap::display_label(event.code),
            sound_name: keymap::sound_name(event.code),
        })
    }

    pub fn is_held(&self, code: u32) -> bool {
        self.pressed.contains(&code)
    }

    fn ctrl_held(&self) -> bool {
        self.pressed.iter().any(|code| keymap::is_control(*code))
    }

    fn alt_held(&self) -> bool {
        self.pressed.iter().any(|code| keymap::is_alt(*code))
    }
}

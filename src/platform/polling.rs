//! Window input polling.

use crossbeam_channel::Sender;
use raylib::RaylibHandle;
use raylib::ffi::KeyboardKey;

use crate::events::keyboard::KeyEvent;
use crate::keymap::from_raylib_key;

/// Feeds key transitions seen by the overlay window into the key feed.
pub struct WindowKeyPoller {
    tx: Sender<KeyEvent>,
    held: Vec<KeyboardKey>,
}

impl WindowKeyPoller {
    pub fn new(tx: Sender<KeyEvent>) -> Self {
        Self {
            tx,
            held: Vec::new(),
        }
    }

    /// Forward this frame's presses and releases. Call once per frame,
    /// before the update schedule runs.
    pub fn poll(&mut self, rl: &mut RaylibHandle) {
        while let Some(key) = rl.get_key_pressed() {
            let Some(code) = from_raylib_key(key as i32) else {
                continue;
            };
            if !self.held.contains(&key) {
                self.held.push(key);
            }
            let _ = self.tx.try_send(KeyEvent::down(code));
        }

        let tx = &self.tx;
        self.held.retain(|key| {
            if !rl.is_key_up(*key) {
                return true;
            }
            if let Some(code) = from_raylib_key(*key as i32) {
                let _ = tx.try_send(KeyEvent::up(code));
            }
            false
        });
    }
}

//! Keyboard events.
//!
//! [`KeyEvent`] is the raw transition reported by the key feed (the global
//! hook thread or the window polling fallback). [`KeyActivation`] is the
//! resolved, once-per-press message the rest of the overlay reacts to.

use bevy_ecs::message::Message;

/// Raw key transition carrying a Windows virtual-key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: u32,
    pub pressed: bool,
}

impl KeyEvent {
    pub fn down(code: u32) -> Self {
        Self {
            code,
            pressed: true,
        }
    }

    pub fn up(code: u32) -> Self {
        Self {
            code,
            pressed: false,
        }
    }
}

/// A key was pressed (not held) and should produce an effect and a sound.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct KeyActivation {
    pub code: u32,
    /// Label drawn on screen.
    pub label: String,
    /// Override sound name for this key, if it has one.
    pub sound_name: Option<String>,
}

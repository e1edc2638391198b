//! Keyboard systems.
//!
//! - [`update_key_activation_messages`] advances the [`KeyActivation`]
//!   message queue; run it first in the frame.
//! - [`process_key_events`] drains the raw [`KeyFeed`], resolves each event
//!   through the [`KeyTracker`] and writes one [`KeyActivation`] per fresh
//!   press. The exit combination raises [`QuitRequested`] instead.
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::events::keyboard::KeyActivation;
use crate::resources::keyfeed::{KeyAction, KeyFeed, KeyTracker};
use crate::resources::quit::QuitRequested;

/// Advance the ECS message queue for [`KeyActivation`].
pub fn update_key_activation_messages(mut msgs: ResMut<Messages<KeyActivation>>) {
    msgs.update();
}

/// Turn queued raw key events into activations.
pub fn process_key_events(
    feed: Res<KeyFeed>,
    mut tracker: ResMut<KeyTracker>,
    mut writer: MessageWriter<KeyActivation>,
    mut quit: ResMut<QuitRequested>,
) {
    for event in feed.rx.try_iter() {
        match tracker.handle(event) {
            KeyAction::Activate(activation) => {
                debug!("Key pressed: {:#04x} '{}'", activation.code, activation.label);
                writer.write(activation);
            }
            KeyAction::Quit => {
                info!("Exit key combination pressed");
                quit.0 = true;
            }
            KeyAction::Ignored => {}
        }
    }
}

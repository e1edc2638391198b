//! Audio thread and the systems that bridge it with the ECS world.
//!
//! - [`audio_thread`] runs on its own OS thread, owns the raylib audio device
//!   and every loaded [`Sound`], and processes
//!   [`AudioCmd`](crate::events::audio::AudioCmd) messages.
//! - [`poll_audio_messages`] drains the thread's replies each frame and
//!   records which override sounds became available.
//! - [`play_key_sounds`] sends one `PlayFx` per key activation.
//!
//! Raylib audio calls stay on the audio thread; the main thread only talks to
//! it through channels.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use log::{debug, error, info, warn};
use raylib::core::audio::{RaylibAudio, Sound};
use rustc_hash::FxHashMap;

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::events::keyboard::KeyActivation;
use crate::resources::audio::{AudioBridge, KeySounds, MAIN_SOUND_ID};

/// Drain replies from the audio thread.
pub fn poll_audio_messages(bridge: Res<AudioBridge>, mut sounds: ResMut<KeySounds>) {
    for msg in bridge.rx_msg.try_iter() {
        match msg {
            AudioMessage::FxLoaded { id } => {
                if id != MAIN_SOUND_ID {
                    info!("Loaded override sound for '{}'", id);
                    sounds.mark_loaded(id);
                }
            }
            AudioMessage::FxLoadFailed { id, error } => {
                warn!(
                    "Failed to load override sound for '{}': {} (will use main sound)",
                    id, error
                );
            }
            AudioMessage::DeviceFailed { error } => error!("Audio device failed: {}", error),
        }
    }
}

/// Play the matching sound for every key activation of this frame.
pub fn play_key_sounds(
    mut reader: MessageReader<KeyActivation>,
    bridge: Option<Res<AudioBridge>>,
    sounds: Res<KeySounds>,
) {
    let Some(bridge) = bridge else {
        return;
    };
    for activation in reader.read() {
        let id = sounds.sound_for(activation.sound_name.as_deref());
        let _ = bridge.tx_cmd.send(AudioCmd::PlayFx {
            id: id.to_string(),
            volume: sounds.volume,
        });
    }
}

/// Entry point of the dedicated audio thread.
///
/// Initializes the audio device, then blocks on the command channel until
/// [`AudioCmd::Shutdown`] arrives or every sender is gone. If the device
/// cannot be opened, [`AudioMessage::DeviceFailed`] is sent and the thread
/// exits.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_msg: Sender<AudioMessage>) {
    let audio = match RaylibAudio::init_audio_device() {
        Ok(device) => device,
        Err(e) => {
            let _ = tx_msg.send(AudioMessage::DeviceFailed {
                error: e.to_string(),
            });
            return;
        }
    };

    debug!("[audio] thread starting (id={:?})", std::thread::current().id());

    let mut sounds: FxHashMap<String, Sound> = FxHashMap::default();

    for cmd in rx_cmd.iter() {
        match cmd {
            AudioCmd::LoadFx { id, path } => match audio.new_sound(&path) {
                Ok(sound) => {
                    debug!("[audio] fx loaded id='{}' path='{}'", id, path);
                    sounds.insert(id.clone(), sound);
                    let _ = tx_msg.send(AudioMessage::FxLoaded { id });
                }
                Err(e) => {
                    let _ = tx_msg.send(AudioMessage::FxLoadFailed {
                        id,
                        error: format!("'{}': {}", path, e),
                    });
                }
            },
            AudioCmd::PlayFx { id, volume } => {
                if let Some(sound) = sounds.get(&id) {
                    sound.set_volume(volume);
                    sound.play();
                } else {
                    debug!("[audio] fx play failed id='{}' reason='not loaded'", id);
                }
            }
            AudioCmd::Shutdown => {
                debug!("[audio] shutdown requested");
                break;
            }
        }
    }

    // Sounds must drop before the device.
    sounds.clear();
    debug!("[audio] thread exiting (id={:?})", std::thread::current().id());
}

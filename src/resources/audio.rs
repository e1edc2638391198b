//! Resources that bridge the main thread with the background audio thread.
//!
//! Use [`setup_audio`] once during initialization to spawn the audio thread
//! and insert the [`AudioBridge`] resource. Call [`shutdown_audio`] during
//! teardown to stop the thread and free the audio device.
//!
//! [`KeySounds`] remembers which per-key override sounds finished loading and
//! decides which sound a key activation plays.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use rustc_hash::FxHashSet;

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::systems::audio::audio_thread;

/// Id of the sound played for keys without a loaded override.
pub const MAIN_SOUND_ID: &str = "main";

/// Shared bridge between the ECS world and the audio thread.
#[derive(Resource)]
pub struct AudioBridge {
    /// Sender for [`AudioCmd`] messages (ECS -> audio thread).
    pub tx_cmd: Sender<AudioCmd>,
    /// Receiver for [`AudioMessage`] messages (audio thread -> ECS).
    pub rx_msg: Receiver<AudioMessage>,
    /// Join handle for the background audio thread.
    pub handle: std::thread::JoinHandle<()>,
}

impl AudioBridge {
    /// Ask the audio thread to load `path` under `id`.
    pub fn load_fx(&self, id: impl Into<String>, path: impl Into<String>) {
        let _ = self.tx_cmd.send(AudioCmd::LoadFx {
            id: id.into(),
            path: path.into(),
        });
    }

    /// Block until the audio thread reports the outcome of loading `id`.
    ///
    /// Replies for other ids received meanwhile are discarded, so call this
    /// before queueing any other load.
    pub fn wait_for_fx(&self, id: &str) -> Result<(), String> {
        loop {
            match self.rx_msg.recv() {
                Ok(AudioMessage::FxLoaded { id: loaded }) if loaded == id => return Ok(()),
                Ok(AudioMessage::FxLoadFailed { id: failed, error }) if failed == id => {
                    return Err(error);
                }
                Ok(AudioMessage::DeviceFailed { error }) => return Err(error),
                Ok(_) => continue,
                Err(_) => return Err("audio thread exited".to_string()),
            }
        }
    }
}

/// Spawn the audio thread and register the [`AudioBridge`] resource.
pub fn setup_audio(world: &mut World) {
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
    let (tx_msg, rx_msg) = unbounded::<AudioMessage>();

    let handle = std::thread::spawn(move || audio_thread(rx_cmd, tx_msg));

    world.insert_resource(AudioBridge {
        tx_cmd,
        rx_msg,
        handle,
    });
}

/// Request shutdown of the audio thread and join it.
pub fn shutdown_audio(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<AudioBridge>() {
        let _ = bridge.tx_cmd.send(AudioCmd::Shutdown);
        let _ = bridge.handle.join();
    }
}

/// Sound selection state for key activations.
#[derive(Resource, Debug, Clone)]
pub struct KeySounds {
    /// Playback volume as a fraction (1.0 = 100 %).
    pub volume: f32,
    overrides: FxHashSet<String>,
}

impl Default for KeySounds {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl KeySounds {
    pub fn new(volume: f32) -> Self {
        Self {
            volume,
            overrides: FxHashSet::default(),
        }
    }

    /// Record that the override sound `name` is loaded.
    pub fn mark_loaded(&mut self, name: impl Into<String>) {
        self.overrides.insert(name.into());
    }

    /// Sound id to play for a key with override name `sound_name`.
    pub fn sound_for<'a>(&'a self, sound_name: Option<&'a str>) -> &'a str {
        match sound_name {
            Some(name) if self.overrides.contains(name) => name,
            _ => MAIN_SOUND_ID,
        }
    }
}

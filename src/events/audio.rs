//! Messages exchanged with the audio thread.

/// Commands sent *to* the audio thread.
#[derive(Debug, Clone)]
pub enum AudioCmd {
    LoadFx { id: String, path: String },
    PlayFx { id: String, volume: f32 },
    Shutdown,
}

/// Events sent *back* from the audio thread.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioMessage {
    DeviceFailed { error: String },
    FxLoaded { id: String },
    FxLoadFailed { id: String, error: String },
}

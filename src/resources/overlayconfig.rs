//! Overlay configuration resource.
//!
//! Settings are read from a JSON file (`config.json` by default). Every key
//! is optional; missing keys keep their defaults. When the file does not
//! exist a default one is written so users have something to edit.
//!
//! # Configuration File Format
//!
//! ```json
//! {
//!     "volume": 50.0,
//!     "main_sound": "assets/main.wav",
//!     "per_key_overrides": {
//!         "backspace": "assets/backspace.wav",
//!         "enter": "assets/enter.wav"
//!     },
//!     "images": ["assets/fire.webp", "assets/fire2.webp", "assets/fire3.webp"],
//!     "font": "",
//!     "colorize": "#2AD317",
//!     "target_fps": 60
//! }
//! ```
//!
//! `volume` is a percentage clamped to `0..=500`. `colorize` is resolved by
//! [`Tint::from_hex`](crate::components::tint::Tint::from_hex).

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

use bevy_ecs::prelude::Resource;
use log::{error, info};
use serde::{Deserialize, Serialize};

const DEFAULT_VOLUME_PERCENT: f32 = 50.0;
const MAX_VOLUME_PERCENT: f32 = 500.0;
const DEFAULT_MAIN_SOUND: &str = "assets/main.wav";
const DEFAULT_COLORIZE: &str = "#2AD317";
const DEFAULT_TARGET_FPS: u32 = 60;
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Playback volume in percent.
    pub volume: f32,
    /// Sound played for every key without an override. Required.
    pub main_sound: String,
    /// Override sounds keyed by key name (`enter`, `backspace`, `a`, ...).
    pub per_key_overrides: BTreeMap<String, String>,
    /// Sprite sources; one is picked at random per key press.
    pub images: Vec<String>,
    /// Label font path; empty selects raylib's default font.
    pub font: String,
    /// Tint colour as `#RRGGBB`, or `false` for no tint.
    pub colorize: String,
    pub target_fps: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        let per_key_overrides = [
            ("enter", "assets/enter.wav"),
            ("backspace", "assets/backspace.wav"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Self {
            volume: DEFAULT_VOLUME_PERCENT,
            main_sound: DEFAULT_MAIN_SOUND.to_string(),
            per_key_overrides,
            images: vec![
                "assets/fire.webp".to_string(),
                "assets/fire2.webp".to_string(),
                "assets/fire3.webp".to_string(),
            ],
            font: String::new(),
            colorize: DEFAULT_COLORIZE.to_string(),
            target_fps: DEFAULT_TARGET_FPS,
        }
    }
}

impl OverlayConfig {
    /// Parse a JSON document; missing keys keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Load the configuration at `path`.
    ///
    /// A missing file is created with the defaults. Unreadable or malformed
    /// files are logged and the defaults are used.
    pub fn load_or_create(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("Config file not found, creating default: {}", path.display());
                let config = Self::default();
                if let Err(e) = config.save_to_file(path) {
                    error!("{}", e);
                }
                return config;
            }
            Err(e) => {
                error!("Failed to read config file {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&text) {
            Ok(config) => {
                info!(
                    "Loaded config: volume={}%, {} image(s), {} override sound(s), colorize={:?}",
                    config.volume,
                    config.images.len(),
                    config.per_key_overrides.len(),
                    config.colorize
                );
                config
            }
            Err(e) => {
                error!("Failed to parse config file: {}", e);
                info!("Using default configuration");
                Self::default()
            }
        }
    }

    /// Write the configuration as pretty JSON with a four-space indent.
    pub fn save_to_file(&self, path: &Path) -> Result<(), String> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        std::fs::write(path, out).map_err(|e| format!("Failed to create config file: {}", e))?;
        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Volume as a playback fraction, clamped to `0.0..=5.0`.
    pub fn volume_fraction(&self) -> f32 {
        self.volume.clamp(0.0, MAX_VOLUME_PERCENT) / 100.0
    }

    /// Path of the label font, if one is configured.
    pub fn font_path(&self) -> Option<&str> {
        Some(self.font.as_str()).filter(|font| !font.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("keyflare-config-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = OverlayConfig::from_json(r#"{ "volume": 120, "colorize": "false" }"#).unwrap();
        assert_eq!(config.volume, 120.0);
        assert_eq!(config.colorize, "false");
        assert_eq!(config.main_sound, "assets/main.wav");
        assert_eq!(config.images.len(), 3);
        assert_eq!(config.target_fps, 60);
    }

    #[test]
    fn test_overrides_replace_defaults() {
        let config =
            OverlayConfig::from_json(r#"{ "per_key_overrides": { "space": "s.wav" }, "images": [] }"#)
                .unwrap();
        assert_eq!(config.per_key_overrides.len(), 1);
        assert_eq!(config.per_key_overrides["space"], "s.wav");
        assert!(config.images.is_empty());
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(OverlayConfig::from_json("{ volume: }").is_err());
        assert!(OverlayConfig::from_json(r#"{ "images": "fire.gif" }"#).is_err());
    }

    #[test]
    fn test_volume_fraction_is_clamped() {
        let mut config = OverlayConfig::default();
        assert_eq!(config.volume_fraction(), 0.5);
        config.volume = -20.0;
        assert_eq!(config.volume_fraction(), 0.0);
        config.volume = 900.0;
        assert_eq!(config.volume_fraction(), 5.0);
    }

    #[test]
    fn test_font_path_empty_is_none() {
        let mut config = OverlayConfig::default();
        assert_eq!(config.font_path(), None);
        config.font = "fonts/label.ttf".to_string();
        assert_eq!(config.font_path(), Some("fonts/label.ttf"));
    }

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let path = temp_path("created.json");
        let _ = std::fs::remove_file(&path);

        let config = OverlayConfig::load_or_create(&path);

        assert_eq!(config, OverlayConfig::default());
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\n    \"volume\": 50.0"));
        assert_eq!(OverlayConfig::load_or_create(&path), OverlayConfig::default());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_unparsable_file_falls_back_to_defaults() {
        let path = temp_path("broken.json");
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(OverlayConfig::load_or_create(&path), OverlayConfig::default());
        let _ = std::fs::remove_file(path);
    }
}

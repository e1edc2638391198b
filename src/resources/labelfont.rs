//! Label font.
//!
//! The font used to draw key labels. A configured TTF is loaded at setup;
//! when none is configured, or loading fails, raylib's built-in font is used.
//!
//! Note: raylib fonts must be used from the main thread only, so this is not
//! inserted as a regular resource; the main loop owns it and lends it to the
//! renderer.

use log::{info, warn};
use raylib::ffi;
use raylib::prelude::{Font, RaylibHandle, RaylibThread, WeakFont};

pub enum LabelFont {
    /// Font loaded from disk; unloaded on drop.
    Custom(Font),
    /// raylib's default font, owned by raylib itself.
    Builtin(WeakFont),
}

impl LabelFont {
    /// Load the font at `path`, or fall back to the default font.
    pub fn load(rl: &mut RaylibHandle, thread: &RaylibThread, path: Option<&str>) -> Self {
        let Some(path) = path else {
            return Self::Builtin(rl.get_font_default());
        };
        match rl.load_font(thread, path) {
            Ok(font) => {
                info!("Loaded custom font: {}", path);
                Self::Custom(font)
            }
            Err(e) => {
                warn!("Failed to load font {}: {} (using default font)", path, e);
                Self::Builtin(rl.get_font_default())
            }
        }
    }
}

impl AsRef<ffi::Font> for LabelFont {
    fn as_ref(&self) -> &ffi::Font {
        match self {
            Self::Custom(font) => font.as_ref(),
            Self::Builtin(font) => font.as_ref(),
        }
    }
}

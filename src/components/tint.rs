//! Tint colour applied to every effect sprite and fallback circle.
//!
//! The tint comes from the `colorize` configuration string:
//!
//! - six hex digits, optionally prefixed with `#` → that colour, fully opaque
//! - `false`, `False` or `FALSE` → opaque white (no tint)
//! - anything else → the fallback dark green `#327a38`

use bevy_ecs::prelude::Resource;
use raylib::prelude::Color;

/// Colour used when the configured tint string is malformed.
pub const FALLBACK_TINT: Color = Color {
    r: 50,
    g: 122,
    b: 56,
    a: 255,
};

#[derive(Resource, Clone, Debug, Copy)]
pub struct Tint {
    pub color: Color,
}

impl Tint {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            color: Color::new(r, g, b, a),
        }
    }

    /// Resolve a `colorize` configuration string.
    pub fn from_hex(value: &str) -> Self {
        if matches!(value, "false" | "False" | "FALSE") {
            return Self::default();
        }
        let hex = value.strip_prefix('#').unwrap_or(value);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Self { color: FALLBACK_TINT };
        }
        match u32::from_str_radix(hex, 16) {
            Ok(rgb) => Self::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 255),
            Err(_) => Self { color: FALLBACK_TINT },
        }
    }

    /// The tint with its alpha replaced by `opacity * peak_alpha`.
    pub fn faded(&self, opacity: f32, peak_alpha: f32) -> Color {
        fade(self.color, opacity, peak_alpha)
    }
}

impl Default for Tint {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
        }
    }
}

/// `color` with alpha `opacity * peak_alpha`, opacity clamped to `0..=1`.
pub fn fade(color: Color, opacity: f32, peak_alpha: f32) -> Color {
    Color::new(
        color.r,
        color.g,
        color.b,
        (opacity.clamp(0.0, 1.0) * peak_alpha) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba(c: Color) -> (u8, u8, u8, u8) {
        (c.r, c.g, c.b, c.a)
    }

    #[test]
    fn test_hex_with_and_without_hash() {
        assert_eq!(rgba(Tint::from_hex("#2AD317").color), (0x2a, 0xd3, 0x17, 255));
        assert_eq!(rgba(Tint::from_hex("ff8000").color), (255, 128, 0, 255));
    }

    #[test]
    fn test_false_family_is_white() {
        for value in ["false", "False", "FALSE"] {
            assert_eq!(rgba(Tint::from_hex(value).color), (255, 255, 255, 255));
        }
    }

    #[test]
    fn test_malformed_values_fall_back_to_green() {
        for value in ["zzzzzz", "", "#12345", "1234567", "fAlSe", "12zz34", "+12345", "#"] {
            assert_eq!(rgba(Tint::from_hex(value).color), (50, 122, 56, 255), "{value:?}");
        }
    }

    #[test]
    fn test_default_is_white() {
        assert_eq!(rgba(Tint::default().color), (255, 255, 255, 255));
    }

    #[test]
    fn test_faded_scales_alpha_only() {
        let t = Tint::new(10, 20, 30, 255);
        assert_eq!(rgba(t.faded(1.0, 180.0)), (10, 20, 30, 180));
        assert_eq!(rgba(t.faded(0.5, 200.0)), (10, 20, 30, 100));
        assert_eq!(rgba(t.faded(-1.0, 255.0)), (10, 20, 30, 0));
        assert_eq!(rgba(t.faded(3.0, 255.0)), (10, 20, 30, 255));
    }
}

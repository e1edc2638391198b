//! Key effect component.
//!
//! A [`KeyEffect`] is the transient visual spawned for one key activation: a
//! sprite (or a plain circle) with the key's label drawn on top. Its opacity
//! and scale are pure functions of the time elapsed since it was spawned:
//!
//! - opacity fades linearly from 1 to 0 over [`FADE_SECONDS`]
//! - scale grows linearly from 1 at [`SCALE_RATE`] per second
//!
//! The effect is despawned on the first tick its opacity reaches zero, so no
//! effect outlives one fade duration.
//!
//! # Related
//!
//! - [`crate::systems::keyeffect`] – spawning and fading systems
//! - [`crate::systems::render`] – draws the surviving effects

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Time in seconds for an effect to fade from fully opaque to invisible.
pub const FADE_SECONDS: f32 = 1.0;
/// Scale growth per second.
pub const SCALE_RATE: f32 = 0.5;

/// What an effect draws beneath its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteSource {
    /// Index into [`SpriteAssets`](crate::resources::spriteassets::SpriteAssets).
    Asset(usize),
    /// No sprite was available; a circle is drawn instead.
    NoSprite,
}

#[derive(Component, Debug, Clone)]
pub struct KeyEffect {
    /// Text drawn at the centre of the effect.
    pub label: String,
    /// Centre of the effect in screen pixels.
    pub position: Vector2,
    /// World clock value, in seconds, when the effect was spawned.
    pub spawned_at: f64,
    pub sprite: SpriteSource,
    pub opacity: f32,
    pub scale: f32,
    /// Spawn sequence number; effects are drawn in ascending order.
    pub seq: u64,
}

impl KeyEffect {
    pub fn new(
        label: impl Into<String>,
        position: Vector2,
        spawned_at: f64,
        sprite: SpriteSource,
        seq: u64,
    ) -> Self {
        Self {
            label: label.into(),
            position,
            spawned_at,
            sprite,
            opacity: 1.0,
            scale: 1.0,
            seq,
        }
    }

    /// Recompute opacity and scale for the world clock value `now`.
    pub fn update(&mut self, now: f64) {
        let elapsed = (now - self.spawned_at) as f32;
        self.opacity = opacity_at(elapsed);
        self.scale = scale_at(elapsed);
    }

    pub fn is_expired(&self) -> bool {
        self.opacity <= 0.0
    }
}

/// Opacity after `elapsed` seconds, clamped to `0.0..=1.0`.
pub fn opacity_at(elapsed: f32) -> f32 {
    (1.0 - elapsed / FADE_SECONDS).clamp(0.0, 1.0)
}

/// Scale factor after `elapsed` seconds.
pub fn scale_at(elapsed: f32) -> f32 {
    1.0 + SCALE_RATE * elapsed.max(0.0)
}

//! Key effect factory resource.
//!
//! [`EffectSpawner`] owns the random source and the spawn sequence counter
//! used to build new [`KeyEffect`]s. Positions are drawn uniformly from the
//! viewport shrunk by [`SPAWN_MARGIN`] on each edge, and the sprite source is
//! drawn uniformly from the loaded sprite pool.

use bevy_ecs::prelude::Resource;
use fastrand::Rng;
use raylib::prelude::Vector2;

use crate::components::keyeffect::{KeyEffect, SpriteSource};
use crate::resources::screensize::ScreenSize;

/// Minimum distance, in pixels, between a spawn position and a viewport edge.
pub const SPAWN_MARGIN: i32 = 100;

#[derive(Resource)]
pub struct EffectSpawner {
    rng: Rng,
    next_seq: u64,
}

impl Default for EffectSpawner {
    fn default() -> Self {
        Self::with_rng(Rng::new())
    }
}

impl EffectSpawner {
    /// Deterministic spawner, used by tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(Rng::with_seed(seed))
    }

    fn with_rng(rng: Rng) -> Self {
        Self { rng, next_seq: 0 }
    }

    /// Build the next effect for `label`.
    ///
    /// `pool_len` is the number of loaded sprites; zero yields
    /// [`SpriteSource::NoSprite`]. `now` is the world clock in seconds.
    pub fn make_effect(
        &mut self,
        label: impl Into<String>,
        screen: ScreenSize,
        pool_len: usize,
        now: f64,
    ) -> KeyEffect {
        let position = self.random_position(screen);
        let sprite = if pool_len > 0 {
            SpriteSource::Asset(self.rng.usize(..pool_len))
        } else {
            SpriteSource::NoSprite
        };
        let seq = self.next_seq;
        self.next_seq += 1;
        KeyEffect::new(label, position, now, sprite, seq)
    }

    /// Random integer point within the margin; on viewports narrower than
    /// twice the margin the bounds are swapped rather than rejected.
    fn random_position(&mut self, screen: ScreenSize) -> Vector2 {
        let x = self.random_in(SPAWN_MARGIN, screen.w - SPAWN_MARGIN);
        let y = self.random_in(SPAWN_MARGIN, screen.h - SPAWN_MARGIN);
        Vector2 {
            x: x as f32,
            y: y as f32,
        }
    }

    fn random_in(&mut self, a: i32, b: i32) -> i32 {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        self.rng.i32(lo..=hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: ScreenSize = ScreenSize { w: 1920, h: 1080 };

    #[test]
    fn test_positions_respect_margin() {
        let mut spawner = EffectSpawner::with_seed(42);
        for _ in 0..2000 {
            let e = spawner.make_effect("A", SCREEN, 3, 0.0);
            assert!(e.position.x >= 100.0 && e.position.x <= 1820.0);
            assert!(e.position.y >= 100.0 && e.position.y <= 980.0);
        }
    }

    #[test]
    fn test_asset_index_within_pool() {
        let mut spawner = EffectSpawner::with_seed(7);
        let mut seen = [false; 3];
        for _ in 0..500 {
            match spawner.make_effect("A", SCREEN, 3, 0.0).sprite {
                SpriteSource::Asset(i) => {
                    assert!(i < 3);
                    seen[i] = true;
                }
                SpriteSource::NoSprite => panic!("pool is not empty"),
            }
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_empty_pool_spawns_without_sprite() {
        let mut spawner = EffectSpawner::with_seed(1);
        for _ in 0..50 {
            assert_eq!(
                spawner.make_effect("A", SCREEN, 0, 0.0).sprite,
                SpriteSource::NoSprite
            );
        }
    }

    #[test]
    fn test_sequence_and_timestamp() {
        let mut spawner = EffectSpawner::with_seed(1);
        let a = spawner.make_effect("A", SCREEN, 0, 1.5);
        let b = spawner.make_effect("B", SCREEN, 0, 2.5);
        assert_eq!((a.seq, b.seq), (0, 1));
        assert_eq!(a.spawned_at, 1.5);
        assert_eq!(b.label, "B");
        assert_eq!(b.opacity, 1.0);
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let mut spawner = EffectSpawner::with_seed(3);
        let e = spawner.make_effect("A", ScreenSize { w: 150, h: 0 }, 0, 0.0);
        assert!(e.position.x >= 50.0 && e.position.x <= 100.0);
        assert!(e.position.y >= -100.0 && e.position.y <= 100.0);
    }
}

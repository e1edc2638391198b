//! Sprite asset pool resource.
//!
//! Holds every [`AnimatedSprite`] that loaded successfully at startup. Key
//! effects reference sprites by index into this pool. The pool is read-only
//! after setup apart from the per-tick animation advance.
//!
//! An empty pool is valid: effects then fall back to a plain circle.

use std::path::Path;

use bevy_ecs::prelude::Resource;
use log::{info, warn};

use crate::resources::animatedsprite::{AnimatedSprite, FrameUploader, SpriteFrame};

/// Pool of loaded sprites, generic over the frame handle type.
#[derive(Resource)]
pub struct SpriteAssets<F: Send + Sync + 'static> {
    sprites: Vec<AnimatedSprite<F>>,
}

impl<F: SpriteFrame + Send + Sync + 'static> SpriteAssets<F> {
    pub fn new(sprites: Vec<AnimatedSprite<F>>) -> Self {
        Self { sprites }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Load every path, skipping (and logging) the ones that fail.
    pub fn load_all<U, P>(paths: &[P], uploader: &mut U) -> Self
    where
        U: FrameUploader<Frame = F>,
        P: AsRef<Path>,
    {
        let mut sprites = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            match AnimatedSprite::from_file(path, uploader) {
                Ok(sprite) => {
                    info!(
                        "Loaded image: {} ({} frame(s), animated={})",
                        path.display(),
                        sprite.frame_count(),
                        sprite.is_animated()
                    );
                    sprites.push(sprite);
                }
                Err(e) => warn!("Failed to load image: {}", e),
            }
        }
        if sprites.is_empty() {
            info!("No images loaded, will use default circle rendering");
        }
        Self::new(sprites)
    }

    /// Advance every sprite's animation clock by `delta` seconds.
    pub fn advance_all(&mut self, delta: f32) {
        for sprite in self.sprites.iter_mut() {
            sprite.advance(delta);
        }
    }

    pub fn get(&self, index: usize) -> Option<&AnimatedSprite<F>> {
        self.sprites.get(index)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

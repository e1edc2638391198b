//! Sprite animation system.
//!
//! Every sprite in the shared [`SpriteAssets`] pool runs on one clock: all
//! effects that reference the same sprite show the same frame. The system
//! advances each sprite by the frame's scaled delta.

use bevy_ecs::prelude::*;

use crate::resources::animatedsprite::SpriteFrame;
use crate::resources::spriteassets::SpriteAssets;
use crate::resources::worldtime::WorldTime;

/// Advance every pooled sprite by [`WorldTime::delta`].
pub fn sprite_animation_system<F>(mut assets: ResMut<SpriteAssets<F>>, time: Res<WorldTime>)
where
    F: SpriteFrame + Send + Sync + 'static,
{
    assets.advance_all(time.delta);
}

//! Key effect lifecycle systems.
//!
//! # System Flow
//!
//! Each frame:
//!
//! 1. [`spawn_key_effects`] turns every [`KeyActivation`] message into a new
//!    [`KeyEffect`] entity stamped with the current world clock
//! 2. [`key_effect_fade_system`] recomputes opacity and scale from the time
//!    since spawn and despawns effects whose opacity reached zero
//!
//! Rendering happens afterwards, outside the schedule, in spawn order.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::keyeffect::KeyEffect;
use crate::events::keyboard::KeyActivation;
use crate::resources::animatedsprite::SpriteFrame;
use crate::resources::effectspawner::EffectSpawner;
use crate::resources::screensize::ScreenSize;
use crate::resources::spriteassets::SpriteAssets;
use crate::resources::worldtime::WorldTime;

/// Spawn one effect per key activation of this frame.
pub fn spawn_key_effects<F>(
    mut reader: MessageReader<KeyActivation>,
    mut spawner: ResMut<EffectSpawner>,
    assets: Res<SpriteAssets<F>>,
    screen: Res<ScreenSize>,
    time: Res<WorldTime>,
    mut commands: Commands,
) where
    F: SpriteFrame + Send + Sync + 'static,
{
    for activation in reader.read() {
        let effect = spawner.make_effect(
            activation.label.as_str(),
            *screen,
            assets.len(),
            time.elapsed,
        );
        debug!(
            "Key effect '{}' at ({}, {}) sprite={:?}",
            effect.label, effect.position.x, effect.position.y, effect.sprite
        );
        commands.spawn(effect);
    }
}

/// Spawn an effect for `label` directly into `world`.
///
/// Same as a [`KeyActivation`] going through [`spawn_key_effects`], without
/// running a schedule.
pub fn spawn_key_effect<F>(world: &mut World, label: &str) -> Entity
where
    F: SpriteFrame + Send + Sync + 'static,
{
    let screen = *world.resource::<ScreenSize>();
    let now = world.resource::<WorldTime>().elapsed;
    let pool_len = world.resource::<SpriteAssets<F>>().len();
    let effect = world
        .resource_mut::<EffectSpawner>()
        .make_effect(label, screen, pool_len, now);
    world.spawn(effect).id()
}

/// Update opacity and scale, and despawn expired effects.
pub fn key_effect_fade_system(
    time: Res<WorldTime>,
    mut query: Query<(Entity, &mut KeyEffect)>,
    mut commands: Commands,
) {
    for (entity, mut effect) in query.iter_mut() {
        effect.update(time.elapsed);
        if effect.is_expired() {
            commands.entity(entity).try_despawn();
        }
    }
}

//! Overlay world assembly.
//!
//! [`init_world`] inserts every resource the update schedule needs and
//! [`build_schedule`] wires the systems in frame order:
//!
//! 1. advance the [`KeyActivation`] queue
//! 2. drain the key feed into activations
//! 3. play sounds and spawn effects for those activations
//! 4. advance sprite animations
//! 5. fade effects and despawn expired ones
//!
//! Drawing happens after the schedule with
//! [`render_key_effects`](crate::systems::render::render_key_effects).

use bevy_ecs::prelude::*;

use crate::components::tint::Tint;
use crate::events::keyboard::KeyActivation;
use crate::resources::animatedsprite::SpriteFrame;
use crate::resources::audio::{AudioBridge, KeySounds};
use crate::resources::effectspawner::EffectSpawner;
use crate::resources::keyfeed::{KeyFeed, KeyTracker};
use crate::resources::quit::QuitRequested;
use crate::resources::screensize::ScreenSize;
use crate::resources::spriteassets::SpriteAssets;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::sprite_animation_system;
use crate::systems::audio::{play_key_sounds, poll_audio_messages};
use crate::systems::keyboard::{process_key_events, update_key_activation_messages};
use crate::systems::keyeffect::{key_effect_fade_system, spawn_key_effects};
use crate::systems::time::update_world_time;

/// Build a world holding the overlay's resources.
pub fn init_world<F>(screen: ScreenSize, assets: SpriteAssets<F>, tint: Tint, feed: KeyFeed) -> World
where
    F: SpriteFrame + Send + Sync + 'static,
{
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(screen);
    world.insert_resource(assets);
    world.insert_resource(tint);
    world.insert_resource(feed);
    world.insert_resource(KeyTracker::default());
    world.insert_resource(KeySounds::default());
    world.insert_resource(EffectSpawner::default());
    world.insert_resource(QuitRequested::default());
    world.init_resource::<Messages<KeyActivation>>();
    world
}

/// The per-frame update schedule.
pub fn build_schedule<F>() -> Schedule
where
    F: SpriteFrame + Send + Sync + 'static,
{
    let mut update = Schedule::default();
    update.add_systems(
        (
            update_key_activation_messages,
            process_key_events,
            (play_key_sounds, spawn_key_effects::<F>),
            sprite_animation_system::<F>,
            key_effect_fade_system,
        )
            .chain(),
    );
    update.add_systems(poll_audio_messages.run_if(resource_exists::<AudioBridge>));
    update
}

/// Advance the world clock by `dt` seconds and run one update.
pub fn tick(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
}

//! Simulation clock resource.
//!
//! `elapsed` is the monotonic world clock that key effects are timestamped
//! against; it is kept in `f64` so that long-running sessions do not lose
//! sub-frame precision. `delta` is the last frame's delta in seconds.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct WorldTime {
    pub elapsed: f64,
    pub delta: f32,
}

//! Viewport size resource.
//!
//! Fixed at startup from the monitor the overlay covers. Effect spawning
//! reads it to keep new effects away from the edges.

use bevy_ecs::prelude::Resource;

/// Viewport size in pixels.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

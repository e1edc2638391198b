//! Exit request resource.
//!
//! Set by the key processing system when the exit combination (Ctrl+Alt+F)
//! is pressed; the main loop stops once it is raised.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct QuitRequested(pub bool);

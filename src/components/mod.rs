//! ECS components for entities.
//!
//! Submodules overview:
//! - [`keyeffect`] – transient visual spawned for a key activation
//! - [`tint`] – colour applied to sprites and the fallback circle

pub mod keyeffect;
pub mod tint;

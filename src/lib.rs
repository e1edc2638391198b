//! keyflare library.
//!
//! This module exposes the overlay's ECS components, resources, systems, and
//! events for use in integration tests and by the binary.

pub mod components;
pub mod events;
pub mod keymap;
pub mod overlay;
pub mod platform;
pub mod resources;
pub mod systems;

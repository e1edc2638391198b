//! Overlay systems.
//!
//! This module groups all ECS systems that drain input, advance time and
//! animation, manage effect lifetimes, and draw the frame.
//!
//! Submodules overview
//! - [`animation`] – advance the shared sprite animation clocks
//! - [`audio`] – bridge with the audio thread and key sound playback
//! - [`keyboard`] – resolve raw key events into activations
//! - [`keyeffect`] – spawn, fade and despawn key effects
//! - [`render`] – draw key effects through an [`render::EffectCanvas`]
//! - [`time`] – update simulation time and delta

pub mod animation;
pub mod audio;
pub mod keyboard;
pub mod keyeffect;
pub mod render;
pub mod time;

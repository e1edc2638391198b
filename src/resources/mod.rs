//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: the key feed, timing, the sprite
//! pool, audio and configuration. Each submodule documents the semantics and
//! intended usage of its resource(s).
//!
//! Overview
//! - `animatedsprite` – decoded GIF/WebP/still sprites and their playback clock
//! - `audio` – bridge and channels for the background audio thread
//! - `effectspawner` – random placement and sprite choice for new effects
//! - `gpu` – raylib texture upload for sprite frames
//! - `keyfeed` – bounded raw key event queue and pressed-key tracking
//! - `labelfont` – font used for key labels
//! - `overlayconfig` – user settings loaded from JSON
//! - `quit` – exit request flag
//! - `screensize` – viewport dimensions in pixels
//! - `spriteassets` – pool of loaded sprites shared by all effects
//! - `worldtime` – simulation time and delta
pub mod animatedsprite;
pub mod audio;
pub mod effectspawner;
pub mod gpu;
pub mod keyfeed;
pub mod labelfont;
pub mod overlayconfig;
pub mod quit;
pub mod screensize;
pub mod spriteassets;
pub mod worldtime;

//! Event and message types.
//!
//! Submodules:
//! - [`audio`] – commands and replies for the background audio thread
//! - [`keyboard`] – raw key transitions and resolved key activations
pub mod audio;
pub mod keyboard;

//! Enemy formations for Starfall Invaders.
//!
//! Variant profiles, level-gated variant rolls, wave layouts and the
//! per-tick motion laws. Pure functions over plain data, no registry or
//! renderer dependency.

pub mod layout;
pub mod motion;
pub mod profiles;

pub use invaders_core as core;

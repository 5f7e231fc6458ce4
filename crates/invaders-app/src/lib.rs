//! Starfall host application.
//!
//! Wires the headless simulation to a game-loop thread, a JSON high-score
//! file and a command channel. Rendering and audio backends plug in through
//! the `invaders_sim` collaborator traits.

pub mod config;
pub mod game_loop;
pub mod persistence;
pub mod state;

pub use invaders_core as core;

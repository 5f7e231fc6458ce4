//! Simulation engine for the starfall arcade shooter.
//!
//! Owns the entity registries, runs systems once per frame against
//! wall-clock time, and drives an external scene, audio sink and
//! high-score store through traits.

pub mod collaborators;
pub mod engine;
pub mod input;
pub mod registry;
pub mod scheduler;
pub mod scoring;
pub mod session;
pub mod systems;
pub mod world;
pub mod world_setup;

pub use collaborators::{
    AudioSink, HighScoreStore, MemoryHighScoreStore, NullScene, PersistenceError, Scene,
    SilentAudio, SpawnState,
};
pub use engine::{SimConfig, SimulationEngine};
pub use invaders_core as core;

#[cfg(test)]
mod tests;

//! Systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` plus whichever
//! collaborators they touch. They do not own state; all state lives in
//! the world.

pub mod abilities;
pub mod combat;
pub mod director;
pub mod enemies;
pub mod environment;
pub mod projectiles;
pub mod render_sync;
pub mod ships;
pub mod shooting;
pub mod snapshot;
pub mod timers;

//! Snapshot system: reads the world and builds the HUD snapshot.
//!
//! This system is read-only. It never modifies the world.

use invaders_core::events::GameEvent;
use invaders_core::state::HudSnapshot;
use invaders_core::types::SimTime;

use crate::world::World;

/// Build the HUD snapshot for the tick that just ran.
pub fn build_snapshot(world: &World, time: &SimTime, events: Vec<GameEvent>) -> HudSnapshot {
    let session = &world.session;
    HudSnapshot {
        time: *time,
        score: session.score,
        high_score: session.high_score,
        lives: session.lives,
        level: session.level,
        wave: session.wave,
        time_left: session.time_left,
        combo: session.combo.combo,
        multiplier: session.combo.multiplier,
        shield_charges: session.shield_charges,
        active_powerup: session.active_powerup.map(|active| active.kind),
        cooldowns: session.cooldowns.view(),
        time_scale: session.time_scale,
        wave_phase: session.wave_phase,
        is_paused: session.is_paused,
        is_game_over: session.is_game_over,
        events,
    }
}

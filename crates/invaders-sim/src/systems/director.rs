//! Wave director: detects a cleared wave, pays the time bonus, holds the
//! transition pause and spawns the next formation.
//!
//! `Active` → (no living enemies) → `Transitioning` → (pause elapsed) →
//! `Active`. The clear check runs only while `Active` and unpaused, so a
//! wave is cleared exactly once.

use rand_chacha::ChaCha8Rng;
use tracing::info;

use invaders_core::constants::*;
use invaders_core::enums::{ScoreReason, WavePhase};
use invaders_core::events::GameEvent;

use crate::collaborators::{AudioSink, Scene};
use crate::scoring::{add_score, time_bonus};
use crate::world::World;
use crate::world_setup::spawn_wave;

/// Start the transition if the wave is empty.
pub fn check_wave_clear(world: &mut World, audio: &mut dyn AudioSink, now_ms: u64) {
    let session = &mut world.session;
    if session.wave_phase != WavePhase::Active
        || session.is_paused
        || world.enemies.live_count() > 0
    {
        return;
    }

    let bonus = time_bonus(session.time_left);
    add_score(
        &mut session.score,
        bonus,
        ScoreReason::TimeBonus,
        &mut world.events,
    );
    audio.play_level_complete();
    world.events.push(GameEvent::WaveCleared {
        level: session.level,
        wave: session.wave,
        time_bonus: bonus,
    });
    info!(level = session.level, wave = session.wave, bonus, "wave cleared");

    session.wave_phase = WavePhase::Transitioning;
    session.is_paused = true;
    session.transition_ends_at_ms = Some(now_ms + WAVE_TRANSITION_MS);
}

/// Finish the transition once its pause has elapsed: clear the field,
/// advance wave and level, spawn the next formation and resume.
pub fn advance_if_due(
    world: &mut World,
    scene: &mut dyn Scene,
    audio: &mut dyn AudioSink,
    rng: &mut ChaCha8Rng,
    now_ms: u64,
) {
    let due = world.session.wave_phase == WavePhase::Transitioning
        && world
            .session
            .transition_ends_at_ms
            .is_some_and(|deadline| now_ms >= deadline);
    if !due {
        return;
    }

    world.player_bullets.clear(scene);
    world.enemy_bullets.clear(scene);
    world.enemies.clear(scene);
    world.session.stop_alarm(audio);

    let session = &mut world.session;
    session.wave += 1;
    if session.wave > WAVES_PER_LEVEL {
        session.level += 1;
        session.wave = 1;
        session.time_left = session.round_secs;
        info!(level = session.level, "level up");
    }
    session.countdown_anchor_ms = now_ms;

    spawn_wave(world, scene, rng);

    let session = &mut world.session;
    session.wave_phase = WavePhase::Active;
    session.transition_ends_at_ms = None;
    session.is_paused = false;
}

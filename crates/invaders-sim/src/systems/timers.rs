//! Clock-driven state: scheduled effects, cooldowns, power-up expiry,
//! time-scale recovery and the round countdown.

use tracing::debug;

use invaders_core::constants::*;
use invaders_core::enums::LifeLossCause;
use invaders_core::events::GameEvent;

use crate::collaborators::Scene;
use crate::scheduler::ScheduledEffect;
use crate::world::World;

/// Fire every scheduled effect due at `now_ms`. Runs every tick, paused or
/// not, so reverts land on time during the wave transition.
pub fn run_scheduled(world: &mut World, scene: &mut dyn Scene, now_ms: u64) {
    for (fire_at, effect) in world.scheduler.take_due(now_ms) {
        match effect {
            ScheduledEffect::DashRevert { player, distance } => {
                world.ship_mut(player).position.z += distance;
            }
            ScheduledEffect::SlowTimeEnd => {
                world.session.slow_time_held = false;
            }
            ScheduledEffect::HitFlashRevert { body } => {
                // The enemy may have died since; its visual is gone then.
                if let Some(enemy) = world.enemies.live().find(|enemy| enemy.body == body) {
                    scene.set_tint(body, enemy.color);
                }
            }
            ScheduledEffect::InvincibilityFlicker { step } => {
                flicker(world, fire_at, step);
            }
            ScheduledEffect::ComboReset => {
                world.session.combo.expire();
            }
        }
    }
}

fn flicker(world: &mut World, fire_at: u64, step: u32) {
    if step >= FLICKER_STEPS {
        for ship in world.ships.iter_mut() {
            ship.visible = true;
        }
        world.session.is_invincible = false;
        world.session.flicker_timer = None;
        return;
    }

    for ship in world.ships.iter_mut() {
        ship.visible = !ship.visible;
    }
    world.session.flicker_timer = Some(world.scheduler.schedule(
        fire_at + FLICKER_STEP_MS,
        ScheduledEffect::InvincibilityFlicker { step: step + 1 },
    ));
}

/// Cooldowns, power-up expiry and slow-time recovery.
pub fn run_modifiers(world: &mut World, now_ms: u64) {
    let session = &mut world.session;

    session.cooldowns.tick(FRAME_MS * session.time_scale);

    if let Some(active) = session.active_powerup {
        if now_ms > active.expires_at_ms {
            session.active_powerup = None;
            world
                .events
                .push(GameEvent::PowerUpExpired { kind: active.kind });
        }
    }

    if !session.slow_time_held && session.time_scale < 1.0 {
        session.time_scale = (session.time_scale + TIME_SCALE_RECOVERY).min(1.0);
    }
}

/// One-second countdown. Hitting zero costs a life and restarts the round;
/// losing the last life ends the game.
pub fn run_countdown(world: &mut World, now_ms: u64) {
    let session = &mut world.session;
    if now_ms.saturating_sub(session.countdown_anchor_ms) < COUNTDOWN_STEP_MS {
        return;
    }

    session.countdown_anchor_ms = now_ms;
    session.time_left = session.time_left.saturating_sub(1);
    if session.time_left > 0 {
        return;
    }

    debug!(lives = session.lives, "countdown expired");
    if !session.lose_life(LifeLossCause::TimeExpired, &mut world.events) {
        session.time_left = session.round_secs;
    }
}

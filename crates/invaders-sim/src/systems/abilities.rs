//! Player-1 special abilities: dash, slow time and bomb.
//!
//! Each ability fires only when its input flag is held and its cooldown is
//! zero. Activation clears the flag, so holding the key does not retrigger
//! the ability the moment it recharges.

use tracing::debug;

use invaders_core::commands::Action;
use invaders_core::constants::*;
use invaders_core::enums::{Ability, PlayerSlot};
use invaders_core::events::GameEvent;

use crate::scheduler::ScheduledEffect;
use crate::world::World;

const OWNER: PlayerSlot = PlayerSlot::One;

pub fn run(world: &mut World, now_ms: u64) {
    if try_activate(world, Action::Dash, Ability::Dash) {
        dash(world, now_ms);
    }
    if try_activate(world, Action::SlowTime, Ability::SlowTime) {
        slow_time(world, now_ms);
    }
    if try_activate(world, Action::Bomb, Ability::Bomb) {
        bomb(world);
    }
}

fn try_activate(world: &mut World, action: Action, ability: Ability) -> bool {
    if !world.input.is_held(OWNER, action) || !world.session.cooldowns.is_ready(ability) {
        return false;
    }
    world.input.consume(OWNER, action);
    world.session.cooldowns.start(ability);
    world.events.push(GameEvent::AbilityActivated { ability });
    debug!(?ability, "ability activated");
    true
}

/// Lunge forward, snapping back after `DASH_REVERT_MS`.
fn dash(world: &mut World, now_ms: u64) {
    world.ship_mut(OWNER).position.z -= DASH_DISTANCE;
    world.scheduler.schedule(
        now_ms + DASH_REVERT_MS,
        ScheduledEffect::DashRevert {
            player: OWNER,
            distance: DASH_DISTANCE,
        },
    );
}

/// Hold the time-scale at `SLOW_TIME_SCALE` for the slow period; it ramps
/// back afterwards.
fn slow_time(world: &mut World, now_ms: u64) {
    world.session.time_scale = SLOW_TIME_SCALE;
    world.session.slow_time_held = true;
    world
        .scheduler
        .schedule(now_ms + SLOW_TIME_DURATION_MS, ScheduledEffect::SlowTimeEnd);
}

/// Zero the health of every living enemy closer than `BOMB_MIN_Z`. The
/// kills themselves resolve in the combat pass, which sweeps zero-health
/// enemies through the regular death pipeline.
fn bomb(world: &mut World) {
    for enemy in world.enemies.iter_mut() {
        if enemy.alive && enemy.position.z > BOMB_MIN_Z {
            enemy.health = 0;
        }
    }
    world.session.shake(SHAKE_BOMB);
}

//! Player fire control.

use invaders_core::commands::Action;
use invaders_core::constants::*;
use invaders_core::enums::{PlayerSlot, PowerUpKind, ShotKind};
use invaders_core::types::Vec3;

use crate::collaborators::{AudioSink, Scene};
use crate::world::World;
use crate::world_setup::{spawn_muzzle_flash, spawn_player_bullet};

/// Fire for every player holding the trigger whose interval has elapsed.
pub fn run(world: &mut World, scene: &mut dyn Scene, audio: &mut dyn AudioSink, now_ms: u64) {
    let interval = if world.session.has_powerup(PowerUpKind::Rapid) {
        RAPID_FIRE_INTERVAL_MS
    } else {
        FIRE_INTERVAL_MS
    };

    for slot in PlayerSlot::ALL {
        if !world.input.is_held(slot, Action::Fire) {
            continue;
        }
        let ready = world.session.last_shot_ms[slot.index()]
            .map_or(true, |last| now_ms.saturating_sub(last) > interval);
        if ready {
            fire(world, scene, audio, slot);
            world.session.last_shot_ms[slot.index()] = Some(now_ms);
        }
    }
}

/// One volley shaped by the global power-up slot. The wing-gun toggle
/// advances on every volley, even when it is not used.
fn fire(world: &mut World, scene: &mut dyn Scene, audio: &mut dyn AudioSink, slot: PlayerSlot) {
    let ship = world.ship(slot).position;
    let left_gun = world.session.left_gun_next[slot.index()];

    match world.session.active_powerup.map(|active| active.kind) {
        Some(PowerUpKind::Spread) => {
            for offset in [-SPREAD_OFFSET, 0.0, SPREAD_OFFSET] {
                let muzzle = Vec3::new(ship.x + offset, ship.y, ship.z - MUZZLE_OFFSET_Z);
                spawn_player_bullet(&mut world.player_bullets, scene, slot, ShotKind::Bolt, muzzle);
                spawn_muzzle_flash(&mut world.muzzle_flashes, scene, muzzle);
            }
        }
        Some(PowerUpKind::Laser) => {
            let beam = Vec3::new(ship.x, ship.y, ship.z - LASER_OFFSET_Z);
            spawn_player_bullet(&mut world.player_bullets, scene, slot, ShotKind::Laser, beam);
        }
        _ => {
            let side = if left_gun { -WING_OFFSET } else { WING_OFFSET };
            let muzzle = Vec3::new(ship.x + side, ship.y, ship.z - MUZZLE_OFFSET_Z);
            spawn_player_bullet(&mut world.player_bullets, scene, slot, ShotKind::Bolt, muzzle);
            spawn_muzzle_flash(&mut world.muzzle_flashes, scene, muzzle);
        }
    }

    world.session.left_gun_next[slot.index()] = !left_gun;
    audio.play_shoot();
}

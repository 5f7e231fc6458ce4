//! Ambient updates: camera shake, starfield, debris, muzzle flashes and
//! drifting power-ups (including pickup).

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use invaders_core::constants::*;
use invaders_core::enums::PowerUpKind;
use invaders_core::events::GameEvent;
use invaders_core::types::Vec2;

use crate::collaborators::Scene;
use crate::session::ActivePowerUp;
use crate::world::World;
use crate::world_setup::random_star_position;

/// Decay the shake and roll this tick's camera offset.
pub fn update_camera_shake(world: &mut World, rng: &mut ChaCha8Rng) {
    let session = &mut world.session;
    if session.camera_shake > 0.0 {
        let half = session.camera_shake / 2.0;
        session.camera_offset = Vec2::new(
            rng.gen_range(-half..=half),
            rng.gen_range(-half..=half),
        );
        session.camera_shake *= SHAKE_DECAY;
        if session.camera_shake < SHAKE_CUTOFF {
            session.camera_shake = 0.0;
        }
    } else {
        session.camera_offset = Vec2::ZERO;
    }
}

/// Drift stars toward the camera and recycle the ones that pass it.
pub fn drift_stars(world: &mut World, rng: &mut ChaCha8Rng) {
    for star in world.stars.iter_mut() {
        star.position.z += STAR_DRIFT;
        if star.position.z > NEAR_FIELD_Z {
            star.position = random_star_position(rng);
        }
    }
}

/// Move and age debris and muzzle flashes, then drop the expired ones.
pub fn age_effects(world: &mut World, scene: &mut dyn Scene) {
    for particle in world.particles.iter_mut() {
        particle.position += particle.velocity;
        particle.rotation += particle.spin;
        particle.life.step();
    }
    for flash in world.muzzle_flashes.iter_mut() {
        flash.life.step();
    }
    world.particles.compact(scene);
    world.muzzle_flashes.compact(scene);
}

/// Drift power-ups, resolve pickups against either ship and drop the ones
/// that leave the field.
pub fn update_power_ups(world: &mut World, scene: &mut dyn Scene, now_ms: u64) {
    let World {
        ships,
        power_ups,
        session,
        events,
        ..
    } = world;

    for power_up in power_ups.iter_mut() {
        if !power_up.active {
            continue;
        }
        power_up.position.z += POWERUP_DRIFT;
        power_up.spin += POWERUP_SPIN_RATE;

        let collector = ships
            .iter()
            .find(|ship| ship.position.distance(power_up.position) < POWERUP_PICKUP_RADIUS);

        if let Some(ship) = collector {
            power_up.active = false;
            match power_up.kind {
                PowerUpKind::Shield => session.shield_charges += SHIELD_CHARGES_PER_PICKUP,
                kind => {
                    session.active_powerup = Some(ActivePowerUp {
                        kind,
                        expires_at_ms: now_ms + POWERUP_DURATION_MS,
                    });
                }
            }
            events.push(GameEvent::PowerUpCollected {
                kind: power_up.kind,
                player: ship.slot,
            });
        } else if power_up.position.z > NEAR_FIELD_Z {
            power_up.active = false;
        }
    }

    power_ups.compact(scene);
}

//! Player bullet flight and enemy return fire.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use invaders_core::constants::*;

use crate::collaborators::{AudioSink, Scene};
use crate::world::World;
use crate::world_setup::spawn_enemy_bullet;

/// Age beams, move every player shot and drop the ones that expire or
/// leave the far field.
pub fn advance_player_bullets(world: &mut World, scene: &mut dyn Scene) {
    let time_scale = world.session.time_scale;
    for bullet in world.player_bullets.iter_mut() {
        if !bullet.active {
            continue;
        }
        if let Some(life) = bullet.lifetime.as_mut() {
            if life.step() {
                bullet.active = false;
                continue;
            }
        }
        bullet.position.z -= PLAYER_BULLET_SPEED * time_scale;
        if bullet.position.z < PLAYER_BULLET_MIN_Z {
            bullet.active = false;
        }
    }
    world.player_bullets.compact(scene);
}

/// From level 2 on, with no enemy bullet in flight, each living enemy rolls
/// to open fire. The first success launches a single bullet and starts the
/// alarm.
pub fn enemy_fire(
    world: &mut World,
    scene: &mut dyn Scene,
    audio: &mut dyn AudioSink,
    rng: &mut ChaCha8Rng,
) {
    let session = &world.session;
    if session.level < ENEMY_FIRE_MIN_LEVEL || !world.enemy_bullets.is_empty() {
        return;
    }

    let chance = ENEMY_FIRE_CHANCE_PER_LEVEL * session.level as f32 * session.time_scale;
    let shooter = world
        .enemies
        .live()
        .find(|_| rng.gen::<f32>() < chance)
        .map(|enemy| enemy.position);

    if let Some(origin) = shooter {
        spawn_enemy_bullet(&mut world.enemy_bullets, scene, origin);
        world.session.start_alarm(audio);
    }
}

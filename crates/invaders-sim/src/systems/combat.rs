//! Collision resolution and the enemy death pipeline.
//!
//! Three passes, in order:
//! 1. enemy bullets advance and trade hits with player bullets,
//! 2. enemy bullets against ships (shield, then lives),
//! 3. player bullets against enemies, followed by a sweep that kills any
//!    enemy left at zero health (the bomb's victims).
//!
//! Every kill, however caused, goes through `kill_enemy`.

use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use invaders_core::components::Enemy;
use invaders_core::constants::*;
use invaders_core::enums::{LifeLossCause, ScoreReason};
use invaders_core::events::GameEvent;
use invaders_core::types::Color;

use crate::collaborators::{AudioSink, Scene};
use crate::scheduler::ScheduledEffect;
use crate::scoring::{add_score, kill_points};
use crate::world::World;
use crate::world_setup::{maybe_drop_power_up, spawn_explosion};

/// Move enemy bullets and resolve them against player bullets. An enemy
/// bullet absorbs `ENEMY_BULLET_HEALTH` hits; every hit consumes the
/// player bullet.
pub fn enemy_bullets_vs_player_bullets(
    world: &mut World,
    scene: &mut dyn Scene,
    audio: &mut dyn AudioSink,
    rng: &mut ChaCha8Rng,
) {
    let time_scale = world.session.time_scale;
    let World {
        enemy_bullets,
        player_bullets,
        particles,
        session,
        ..
    } = world;

    for enemy_bullet in enemy_bullets.iter_mut() {
        if !enemy_bullet.active {
            continue;
        }
        enemy_bullet.position.z += ENEMY_BULLET_SPEED * time_scale;

        for bullet in player_bullets.iter_mut() {
            if !bullet.active
                || enemy_bullet.position.distance(bullet.position) >= BULLET_BULLET_HIT_RADIUS
            {
                continue;
            }
            bullet.active = false;
            enemy_bullet.health = enemy_bullet.health.saturating_sub(1);
            if enemy_bullet.health == 0 {
                enemy_bullet.active = false;
                spawn_explosion(particles, scene, rng, enemy_bullet.position, Color::RED);
                break;
            }
        }
    }

    player_bullets.compact(scene);
    enemy_bullets.compact(scene);
    if enemy_bullets.is_empty() {
        session.stop_alarm(audio);
    }
}

/// Resolve enemy bullets against both ships and drop the ones that pass
/// the near field. Ignored entirely while invincible.
pub fn enemy_bullets_vs_ships(
    world: &mut World,
    scene: &mut dyn Scene,
    audio: &mut dyn AudioSink,
    now_ms: u64,
) {
    for index in 0..world.enemy_bullets.len() {
        let Some(bullet) = world.enemy_bullets.get(index) else {
            continue;
        };
        if !bullet.active {
            continue;
        }
        let position = bullet.position;

        let hit = !world.session.is_invincible
            && world
                .ships
                .iter()
                .any(|ship| ship.position.distance(position) < BULLET_SHIP_HIT_RADIUS);

        if hit {
            if let Some(bullet) = world.enemy_bullets.get_mut(index) {
                bullet.active = false;
            }
            world.session.shake(SHAKE_SHIP_HIT);
            resolve_ship_hit(world, now_ms);
            if world.session.is_game_over {
                break;
            }
        } else if position.z > NEAR_FIELD_Z {
            if let Some(bullet) = world.enemy_bullets.get_mut(index) {
                bullet.active = false;
            }
        }
    }

    world.enemy_bullets.compact(scene);
    if world.enemy_bullets.is_empty() {
        world.session.stop_alarm(audio);
    }
}

/// A shield charge absorbs the hit. Otherwise the combo breaks, a life is
/// lost, and if any remain the ships flicker through an invincibility window.
fn resolve_ship_hit(world: &mut World, now_ms: u64) {
    let session = &mut world.session;
    if session.shield_charges > 0 {
        session.shield_charges -= 1;
        world.events.push(GameEvent::ShieldAbsorbed {
            charges_left: session.shield_charges,
        });
        return;
    }

    session.combo.reset();
    if session.lose_life(LifeLossCause::ShipHit, &mut world.events) {
        return;
    }

    info!(lives = session.lives, "ship hit");
    session.is_invincible = true;
    session.flicker_timer = Some(world.scheduler.schedule(
        now_ms + FLICKER_STEP_MS,
        ScheduledEffect::InvincibilityFlicker { step: 1 },
    ));
}

/// Player bullets against enemies, then the zero-health sweep.
///
/// Enemies are scanned newest first and a bullet stops at its first hit.
pub fn player_bullets_vs_enemies(
    world: &mut World,
    scene: &mut dyn Scene,
    audio: &mut dyn AudioSink,
    rng: &mut ChaCha8Rng,
    now_ms: u64,
) {
    for bullet_index in 0..world.player_bullets.len() {
        let Some(bullet_position) = world
            .player_bullets
            .get(bullet_index)
            .filter(|bullet| bullet.active)
            .map(|bullet| bullet.position)
        else {
            continue;
        };

        for enemy_index in (0..world.enemies.len()).rev() {
            let Some(enemy) = world.enemies.get_mut(enemy_index) else {
                continue;
            };
            if !enemy.alive || enemy.position.distance(bullet_position) >= BULLET_ENEMY_HIT_RADIUS {
                continue;
            }

            enemy.health = enemy.health.saturating_sub(1);
            let survived = enemy.health > 0;
            let body = enemy.body;
            if let Some(bullet) = world.player_bullets.get_mut(bullet_index) {
                bullet.active = false;
            }

            if survived {
                scene.set_tint(body, Color::RED);
                world.scheduler.schedule(
                    now_ms + HIT_FLASH_MS,
                    ScheduledEffect::HitFlashRevert { body },
                );
            } else {
                kill_enemy(world, enemy_index, scene, audio, rng, now_ms);
            }
            break;
        }
    }

    for enemy_index in (0..world.enemies.len()).rev() {
        let doomed = world
            .enemies
            .get(enemy_index)
            .is_some_and(|enemy| enemy.alive && enemy.health == 0);
        if doomed {
            kill_enemy(world, enemy_index, scene, audio, rng, now_ms);
        }
    }

    world.player_bullets.compact(scene);
    world.enemies.compact(scene);
}

/// The one death pipeline: mark dead, explode, maybe drop a pickup, play
/// the explosion, shake, extend the combo and award points.
fn kill_enemy(
    world: &mut World,
    index: usize,
    scene: &mut dyn Scene,
    audio: &mut dyn AudioSink,
    rng: &mut ChaCha8Rng,
    now_ms: u64,
) {
    let Some(enemy) = world.enemies.get_mut(index) else {
        return;
    };
    if !enemy.alive {
        return;
    }
    enemy.alive = false;
    let Enemy {
        variant,
        position,
        color,
        ..
    } = *enemy;

    spawn_explosion(&mut world.particles, scene, rng, position, color);
    if let Some(kind) = maybe_drop_power_up(&mut world.power_ups, scene, rng, position) {
        debug!(?kind, "power-up dropped");
    }
    audio.play_explosion(variant);

    let session = &mut world.session;
    session.shake(SHAKE_KILL);
    let multiplier = session.combo.register_kill(now_ms, &mut world.scheduler);

    world
        .events
        .push(GameEvent::EnemyDestroyed { variant, position });
    add_score(
        &mut session.score,
        kill_points(multiplier),
        ScoreReason::Kill,
        &mut world.events,
    );
}

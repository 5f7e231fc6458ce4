//! Enemy descent, formation motion and the breach line.

use invaders_core::constants::ENEMY_SPIN_RATE;
use invaders_core::events::GameEvent;
use invaders_core::types::Vec3;
use invaders_formations::layout::base_speed;
use invaders_formations::motion::{self, MotionContext};

use crate::collaborators::Scene;
use crate::world::World;

/// Advance every living enemy by its formation's motion law. An enemy that
/// crosses the breach line is dropped without penalty.
pub fn run(world: &mut World, scene: &mut dyn Scene) {
    let time_scale = world.session.time_scale;
    let base = base_speed(world.session.level);
    let spin = ENEMY_SPIN_RATE * time_scale;

    for enemy in world.enemies.iter_mut() {
        if !enemy.alive {
            continue;
        }

        let update = motion::step(&MotionContext {
            formation: enemy.formation,
            variant: enemy.variant,
            position: enemy.position,
            anchor: enemy.anchor,
            speed_multiplier: enemy.speed_multiplier,
            base_speed: base,
            circle_phase: enemy.circle_phase,
            zigzag_phase: enemy.zigzag_phase,
            time_scale,
        });
        enemy.position = update.position;
        enemy.circle_phase = update.circle_phase;
        enemy.zigzag_phase = update.zigzag_phase;
        enemy.rotation += Vec3::new(spin, spin, 0.0);

        if motion::has_breached(enemy.position.z) {
            enemy.alive = false;
            world.events.push(GameEvent::EnemyBreached {
                variant: enemy.variant,
            });
        }
    }

    world.enemies.compact(scene);
}

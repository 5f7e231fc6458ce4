//! The simulation world: every registry plus session-wide state.

use invaders_core::components::{Bullet, Enemy, MuzzleFlash, Particle, PowerUp, Ship, Star};
use invaders_core::enums::PlayerSlot;
use invaders_core::events::GameEvent;

use crate::collaborators::Scene;
use crate::input::InputState;
use crate::registry::Registry;
use crate::scheduler::Scheduler;
use crate::session::SessionState;

/// All mutable game state. Systems receive it by `&mut` along with the
/// collaborators they need.
#[derive(Debug, Clone)]
pub struct World {
    pub ships: [Ship; 2],
    pub enemies: Registry<Enemy>,
    pub player_bullets: Registry<Bullet>,
    pub enemy_bullets: Registry<Bullet>,
    pub particles: Registry<Particle>,
    pub muzzle_flashes: Registry<MuzzleFlash>,
    pub power_ups: Registry<PowerUp>,
    pub stars: Registry<Star>,
    pub session: SessionState,
    pub input: InputState,
    pub scheduler: Scheduler,
    /// Events emitted so far this tick.
    pub events: Vec<GameEvent>,
}

impl World {
    pub fn ship(&self, slot: PlayerSlot) -> &Ship {
        &self.ships[slot.index()]
    }

    pub fn ship_mut(&mut self, slot: PlayerSlot) -> &mut Ship {
        &mut self.ships[slot.index()]
    }

    /// Depth of the nearest living enemy (largest z), if any.
    pub fn nearest_enemy_z(&self) -> Option<f32> {
        self.enemies
            .live()
            .map(|enemy| enemy.position.z)
            .fold(None, |best, z| Some(best.map_or(z, |b: f32| b.max(z))))
    }

    /// Despawn every visual the world owns, ships and stars included.
    pub fn teardown(&mut self, scene: &mut dyn Scene) {
        self.enemies.clear(scene);
        self.player_bullets.clear(scene);
        self.enemy_bullets.clear(scene);
        self.particles.clear(scene);
        self.muzzle_flashes.clear(scene);
        self.power_ups.clear(scene);
        self.stars.clear(scene);
        for ship in &self.ships {
            scene.despawn(ship.visual);
            scene.despawn(ship.crosshair_left);
            scene.despawn(ship.crosshair_right);
        }
        self.scheduler.cancel_all();
    }
}

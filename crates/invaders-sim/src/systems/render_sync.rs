//! Pushes entity state to the scene and draws the frame.

use invaders_core::constants::WING_OFFSET;
use invaders_core::types::Vec3;

use crate::collaborators::Scene;
use crate::world::World;

/// Sync every transform, visibility flag and fade, then render once.
pub fn run(world: &World, scene: &mut dyn Scene) {
    let shielded = world.session.shield_charges > 0;
    for ship in &world.ships {
        scene.set_transform(ship.visual, ship.position, Vec3::ZERO, 1.0);
        scene.set_visible(ship.visual, ship.visible);
        scene.set_visible(ship.shield_visual, shielded);

        let aim = Vec3::new(ship.position.x, ship.position.y, ship.aim_z);
        scene.set_transform(ship.crosshair_left, aim - Vec3::X * WING_OFFSET, Vec3::ZERO, 1.0);
        scene.set_transform(ship.crosshair_right, aim + Vec3::X * WING_OFFSET, Vec3::ZERO, 1.0);
    }

    for enemy in world.enemies.live() {
        scene.set_transform(enemy.visual, enemy.position, enemy.rotation, enemy.scale);
    }
    for bullet in world.player_bullets.live().chain(world.enemy_bullets.live()) {
        scene.set_transform(bullet.visual, bullet.position, Vec3::ZERO, 1.0);
    }
    for particle in world.particles.live() {
        scene.set_transform(particle.visual, particle.position, particle.rotation, 1.0);
        scene.set_opacity(particle.visual, particle.life.remaining_fraction());
    }
    for flash in world.muzzle_flashes.live() {
        scene.set_transform(flash.visual, flash.position, Vec3::ZERO, 1.0);
        scene.set_opacity(flash.visual, flash.life.remaining_fraction());
    }
    for power_up in world.power_ups.live() {
        let rotation = Vec3::new(power_up.spin, power_up.spin, 0.0);
        scene.set_transform(power_up.visual, power_up.position, rotation, 1.0);
    }
    for star in world.stars.iter() {
        scene.set_transform(star.visual, star.position, Vec3::ZERO, 1.0);
    }

    scene.set_camera_shake(world.session.camera_offset);
    scene.render();
}

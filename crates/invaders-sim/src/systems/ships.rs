//! Ship movement and crosshair tracking.

use invaders_core::commands::Action;
use invaders_core::constants::*;
use invaders_core::enums::PlayerSlot;

use crate::world::World;

/// Move each ship by its held directions, clamped to the play box.
/// Not time-scaled.
pub fn run_movement(world: &mut World) {
    for slot in PlayerSlot::ALL {
        let input = *world.input.player(slot);
        let ship = world.ship_mut(slot);

        if input.is_held(Action::MoveLeft) && ship.position.x > -SHIP_BOUND_X {
            ship.position.x -= SHIP_SPEED;
        }
        if input.is_held(Action::MoveRight) && ship.position.x < SHIP_BOUND_X {
            ship.position.x += SHIP_SPEED;
        }
        if input.is_held(Action::MoveUp) && ship.position.y < SHIP_BOUND_Y {
            ship.position.y += SHIP_SPEED;
        }
        if input.is_held(Action::MoveDown) && ship.position.y > -SHIP_BOUND_Y {
            ship.position.y -= SHIP_SPEED;
        }
    }
}

/// Project both crosshairs of each ship to the nearest enemy's depth.
pub fn update_crosshairs(world: &mut World) {
    let aim_z = world.nearest_enemy_z().unwrap_or(CROSSHAIR_DEFAULT_Z);
    for ship in world.ships.iter_mut() {
        ship.aim_z = aim_z;
    }
}

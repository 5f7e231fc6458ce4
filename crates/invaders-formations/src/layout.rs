//! Wave layout: formation choice, grid size, spawn anchors and depth.

use std::f32::consts::TAU;

use invaders_core::constants::*;
use invaders_core::enums::Formation;
use invaders_core::types::Vec2;

/// Grid dimensions of a wave at `level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub rows: u32,
    pub cols: u32,
}

impl GridSize {
    pub fn for_level(level: u32) -> Self {
        Self {
            rows: ENEMY_BASE_ROWS + level / 2,
            cols: ENEMY_BASE_COLS + level / 2,
        }
    }

    pub fn count(&self) -> usize {
        (self.rows * self.cols) as usize
    }
}

/// Formation used for `wave`, cycling wall, circle, v by `wave mod 3`.
pub fn formation_for_wave(wave: u32) -> Formation {
    Formation::CYCLE[wave as usize % Formation::CYCLE.len()]
}

/// Spawn depth of every enemy in a wave at `level`.
pub fn start_z(level: u32) -> f32 {
    ENEMY_START_Z - level as f32 * ENEMY_START_Z_PER_LEVEL
}

/// Base descent speed per tick at `level`, before variant and time-scale.
pub fn base_speed(level: u32) -> f32 {
    ENEMY_BASE_SPEED + level as f32 * ENEMY_SPEED_PER_LEVEL
}

/// Spawn anchor (x, y) of the enemy at `row`, `col`.
pub fn anchor(formation: Formation, row: u32, col: u32, grid: GridSize) -> Vec2 {
    let rows = grid.rows as f32;
    let cols = grid.cols as f32;
    let (row, col) = (row as f32, col as f32);
    let grid_x = col * ENEMY_GRID_SPACING - cols * ENEMY_GRID_SPACING / 2.0
        + ENEMY_GRID_SPACING / 2.0;

    match formation {
        Formation::Wall => Vec2::new(
            grid_x,
            row * ENEMY_GRID_SPACING - rows * ENEMY_GRID_SPACING / 2.0 + ENEMY_GRID_SPACING / 2.0,
        ),
        Formation::Circle => {
            let angle = col / cols * TAU;
            Vec2::new(angle.cos() * CIRCLE_RADIUS, angle.sin() * CIRCLE_RADIUS)
        }
        Formation::V => Vec2::new(
            grid_x,
            (col - cols / 2.0).abs() * V_LIFT_PER_COL + row * ENEMY_GRID_SPACING
                - rows * ENEMY_GRID_SPACING / 2.0,
        ),
    }
}

//! Variant-specific enemy profiles and the level-gated variant roll.

use invaders_core::constants::*;
use invaders_core::enums::EnemyVariant;
use invaders_core::types::Color;

/// Fixed parameters of an enemy variant.
pub struct EnemyProfile {
    pub scale: f32,
    pub health: u32,
    /// Multiplier on the level's base descent speed.
    pub speed_multiplier: f32,
    /// Fixed hull colour, `None` for variants tinted by level and row.
    pub color: Option<Color>,
}

/// Get the profile for a given variant.
pub fn get_profile(variant: EnemyVariant) -> EnemyProfile {
    match variant {
        EnemyVariant::Normal => EnemyProfile {
            scale: 1.0,
            health: 1,
            speed_multiplier: 1.0,
            color: None,
        },
        EnemyVariant::Scout => EnemyProfile {
            scale: 0.7,
            health: 1,
            speed_multiplier: 2.5,
            color: Some(Color::from_hex(0xff00ff)),
        },
        EnemyVariant::Tank => EnemyProfile {
            scale: 1.4,
            health: 3,
            speed_multiplier: 0.6,
            color: Some(Color::from_hex(0xff8800)),
        },
        EnemyVariant::Zigzag => EnemyProfile {
            scale: 1.0,
            health: 2,
            speed_multiplier: 1.3,
            color: Some(Color::from_hex(0x00ffff)),
        },
    }
}

/// Hull colour of an enemy spawned on `row` at `level`.
pub fn enemy_color(variant: EnemyVariant, level: u32, row: u32) -> Color {
    get_profile(variant).color.unwrap_or_else(|| {
        let hue = (level as f32 * 0.1 + row as f32 * 0.1).rem_euclid(1.0);
        Color::from_hsl(hue, 1.0, 0.5)
    })
}

/// Pick a variant from one uniform roll in `0.0..1.0`.
///
/// Gates are checked scout, tank, zigzag; the first that passes wins.
pub fn roll_variant(level: u32, roll: f32) -> EnemyVariant {
    if level >= SCOUT_MIN_LEVEL && roll < SCOUT_CHANCE {
        EnemyVariant::Scout
    } else if level >= TANK_MIN_LEVEL && roll < TANK_CHANCE {
        EnemyVariant::Tank
    } else if level >= ZIGZAG_MIN_LEVEL && roll < ZIGZAG_CHANCE {
        EnemyVariant::Zigzag
    } else {
        EnemyVariant::Normal
    }
}

//! Per-tick enemy motion laws.
//!
//! Pure functions that compute the next position and phase accumulators
//! of one enemy from its formation, variant and the global time-scale.
//! No registry dependency; operates on plain data.

use invaders_core::constants::*;
use invaders_core::enums::{EnemyVariant, Formation};
use invaders_core::types::{Vec2, Vec3};

/// Input to the motion law for a single enemy.
pub struct MotionContext {
    pub formation: Formation,
    pub variant: EnemyVariant,
    pub position: Vec3,
    pub anchor: Vec2,
    pub speed_multiplier: f32,
    /// Level base speed from `layout::base_speed`.
    pub base_speed: f32,
    pub circle_phase: f32,
    pub zigzag_phase: f32,
    pub time_scale: f32,
}

/// Output of the motion law.
pub struct MotionUpdate {
    pub position: Vec3,
    pub circle_phase: f32,
    pub zigzag_phase: f32,
}

/// Advance one enemy by one tick.
pub fn step(ctx: &MotionContext) -> MotionUpdate {
    let mut update = MotionUpdate {
        position: ctx.position,
        circle_phase: ctx.circle_phase,
        zigzag_phase: ctx.zigzag_phase,
    };

    update.position.z += ctx.base_speed * ctx.speed_multiplier * ctx.time_scale;

    // The circle orbit overrides the zigzag sway; wall and v are static in x/y.
    if ctx.formation == Formation::Circle {
        update.circle_phase += CIRCLE_PHASE_RATE * ctx.time_scale;
        update.position.x = update.circle_phase.cos() * CIRCLE_RADIUS;
        update.position.y = update.circle_phase.sin() * CIRCLE_RADIUS;
    } else if ctx.variant == EnemyVariant::Zigzag {
        update.zigzag_phase += ZIGZAG_PHASE_RATE * ctx.time_scale;
        update.position.x = ctx.anchor.x + update.zigzag_phase.sin() * ZIGZAG_AMPLITUDE;
    }

    update
}

/// Whether an enemy at `z` has passed the defense line.
pub fn has_breached(z: f32) -> bool {
    z > BREACH_Z
}

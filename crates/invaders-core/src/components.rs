//! Entity records held in the simulation registries.
//!
//! Records are plain data structs. Game logic lives in systems, not here.
//! Every record carries the `VisualHandle` the scene returned at spawn time.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{Color, Lifetime, Vec2, Vec3, VisualHandle};

/// A descending invader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub visual: VisualHandle,
    /// Hull sub-part, tinted red while a hit flash plays.
    pub body: VisualHandle,
    pub variant: EnemyVariant,
    /// Fixed at spawn; selects the motion law.
    pub formation: Formation,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
    pub health: u32,
    pub max_health: u32,
    pub speed_multiplier: f32,
    pub color: Color,
    /// Spawn anchor (x, y), used by the zigzag overlay.
    pub anchor: Vec2,
    pub zigzag_phase: f32,
    pub circle_phase: f32,
    pub alive: bool,
}

/// A player or enemy projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub visual: VisualHandle,
    pub owner: BulletOwner,
    pub shot: ShotKind,
    pub position: Vec3,
    /// Hits the bullet can absorb. Player shots use 1.
    pub health: u32,
    /// Only set for beam shots.
    pub lifetime: Option<Lifetime>,
    pub active: bool,
}

/// A dropped pickup drifting toward the player line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub visual: VisualHandle,
    pub kind: PowerUpKind,
    pub position: Vec3,
    pub spin: f32,
    pub active: bool,
}

/// Explosion debris. Purely visual.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub visual: VisualHandle,
    pub position: Vec3,
    pub velocity: Vec3,
    pub rotation: Vec3,
    pub spin: Vec3,
    pub life: Lifetime,
}

/// Short flash at a gun muzzle. Purely visual.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MuzzleFlash {
    pub visual: VisualHandle,
    pub position: Vec3,
    pub life: Lifetime,
}

/// Background star, recycled forever.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub visual: VisualHandle,
    pub position: Vec3,
}

/// A player ship with its shield bubble and aim markers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub slot: PlayerSlot,
    pub visual: VisualHandle,
    pub shield_visual: VisualHandle,
    pub crosshair_left: VisualHandle,
    pub crosshair_right: VisualHandle,
    pub position: Vec3,
    /// Depth the crosshairs are projected to this tick.
    pub aim_z: f32,
    pub visible: bool,
}

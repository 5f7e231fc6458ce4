//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy archetype. Each variant fixes scale, health, speed and colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyVariant {
    #[default]
    Normal,
    /// Small and fast, unlocks at level 3.
    Scout,
    /// Large, slow and armoured, unlocks at level 5.
    Tank,
    /// Sways laterally while descending, unlocks at level 7.
    Zigzag,
}

/// Spatial arrangement and motion law of a spawned wave.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formation {
    /// Static grid, only depth advances.
    #[default]
    Wall,
    /// Orbiting ring of radius 10.
    Circle,
    /// Grid with rows lifted away from the centre column.
    V,
}

impl Formation {
    /// Rotation order used by the wave director.
    pub const CYCLE: [Formation; 3] = [Formation::Wall, Formation::Circle, Formation::V];
}

/// Which player a ship, bullet or input block belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSlot {
    #[default]
    One,
    Two,
}

impl PlayerSlot {
    pub const ALL: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    pub fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }
}

/// Who fired a bullet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player(PlayerSlot),
    Enemy,
}

/// Shape of a player shot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotKind {
    #[default]
    Bolt,
    /// Long beam with a fixed tick lifetime.
    Laser,
}

/// Power-up pickup type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Adds stacking shield charges.
    Shield,
    /// Shortens the fire interval.
    Rapid,
    /// Three-way shot.
    Spread,
    /// Beam shot.
    Laser,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Shield,
        PowerUpKind::Rapid,
        PowerUpKind::Spread,
        PowerUpKind::Laser,
    ];
}

/// Player-1 special abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    Dash,
    SlowTime,
    Bomb,
}

/// Wave director state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    /// Enemies present, simulation running.
    #[default]
    Active,
    /// Wave emptied; bonus awarded, waiting out the pause before respawn.
    Transitioning,
}

/// Why a shared life was lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeLossCause {
    ShipHit,
    TimeExpired,
}

/// Source of a score delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreReason {
    Kill,
    TimeBonus,
}

/// Left or right aim marker of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrosshairSide {
    Left,
    Right,
}

/// Kind of visual the scene should create for a spawned entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualKind {
    Ship(PlayerSlot),
    Shield(PlayerSlot),
    Crosshair(PlayerSlot, CrosshairSide),
    Enemy(EnemyVariant),
    /// Hull sub-part of an enemy, tinted on hit.
    EnemyBody,
    PlayerBullet,
    LaserBeam,
    EnemyBullet,
    Particle,
    MuzzleFlash,
    PowerUp(PowerUpKind),
    Star,
}

//! Events emitted by the simulation for HUD and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Vec3;

/// Something that happened during a tick. Collected per tick and shipped
/// with the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Score went up.
    ScoreChanged {
        delta: u64,
        total: u64,
        reason: ScoreReason,
    },
    /// An enemy went through the death pipeline.
    EnemyDestroyed {
        variant: EnemyVariant,
        position: Vec3,
    },
    /// An enemy crossed the defense line and was dropped.
    EnemyBreached { variant: EnemyVariant },
    /// A shield charge absorbed a hit.
    ShieldAbsorbed { charges_left: u32 },
    /// A shared life was lost.
    LifeLost {
        lives_left: u32,
        cause: LifeLossCause,
    },
    PowerUpCollected {
        kind: PowerUpKind,
        player: PlayerSlot,
    },
    PowerUpExpired { kind: PowerUpKind },
    AbilityActivated { ability: Ability },
    /// All enemies of the wave are gone; the transition pause began.
    WaveCleared {
        level: u32,
        wave: u32,
        time_bonus: u64,
    },
    /// A new wave was spawned.
    WaveStarted {
        level: u32,
        wave: u32,
        formation: Formation,
        enemy_count: usize,
    },
    GameOver {
        final_score: u64,
        new_high_score: bool,
    },
}

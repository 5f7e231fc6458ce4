//! Player commands sent from the host to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::PlayerSlot;

/// A bindable control action. Together with `PlayerSlot` this forms the
/// 16 discrete input combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Fire,
    Dash,
    SlowTime,
    Bomb,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::MoveUp,
        Action::MoveDown,
        Action::Fire,
        Action::Dash,
        Action::SlowTime,
        Action::Bomb,
    ];
}

/// All possible player-issued commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Key pressed (`pressed = true`) or released.
    SetAction {
        player: PlayerSlot,
        action: Action,
        pressed: bool,
    },
    /// Discard the session and start over with a fresh one.
    NewGame,
}

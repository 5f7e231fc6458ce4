//! HUD snapshot: the read-only state handed to the UI after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::SimTime;

/// Complete HUD state published after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub time: SimTime,
    pub score: u64,
    pub high_score: u64,
    pub lives: u32,
    pub level: u32,
    pub wave: u32,
    /// Countdown seconds left.
    pub time_left: u32,
    pub combo: u32,
    pub multiplier: u32,
    pub shield_charges: u32,
    pub active_powerup: Option<PowerUpKind>,
    pub cooldowns: CooldownView,
    pub time_scale: f32,
    pub wave_phase: WavePhase,
    pub is_paused: bool,
    pub is_game_over: bool,
    /// Events emitted during this tick, in order.
    pub events: Vec<GameEvent>,
}

/// Ability cooldowns in whole seconds, rounded up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooldownView {
    pub dash: u32,
    pub slow: u32,
    pub bomb: u32,
}

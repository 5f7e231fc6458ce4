//! Session-wide state: score, lives, level, timers and global modifiers.

use invaders_core::constants::*;
use invaders_core::enums::{Ability, LifeLossCause, PowerUpKind, WavePhase};
use invaders_core::events::GameEvent;
use invaders_core::state::CooldownView;
use invaders_core::types::Vec2;

use crate::collaborators::AudioSink;
use crate::engine::SimConfig;
use crate::scheduler::TimerId;
use crate::scoring::ComboTracker;

/// The single global power-up slot (shield charges live elsewhere).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    pub expires_at_ms: u64,
}

/// Remaining ability cooldowns in milliseconds.
///
/// Decremented by `FRAME_MS × time_scale` per unpaused tick, so slow time
/// also slows recharging.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cooldowns {
    pub dash: f32,
    pub slow_time: f32,
    pub bomb: f32,
}

impl Cooldowns {
    pub fn get(&self, ability: Ability) -> f32 {
        match ability {
            Ability::Dash => self.dash,
            Ability::SlowTime => self.slow_time,
            Ability::Bomb => self.bomb,
        }
    }

    pub fn start(&mut self, ability: Ability) {
        match ability {
            Ability::Dash => self.dash = DASH_COOLDOWN_MS,
            Ability::SlowTime => self.slow_time = SLOW_TIME_COOLDOWN_MS,
            Ability::Bomb => self.bomb = BOMB_COOLDOWN_MS,
        }
    }

    pub fn is_ready(&self, ability: Ability) -> bool {
        self.get(ability) <= 0.0
    }

    pub fn tick(&mut self, step_ms: f32) {
        for slot in [&mut self.dash, &mut self.slow_time, &mut self.bomb] {
            *slot = (*slot - step_ms).max(0.0);
        }
    }

    /// Whole seconds remaining, rounded up.
    pub fn view(&self) -> CooldownView {
        let secs = |ms: f32| (ms / 1000.0).ceil() as u32;
        CooldownView {
            dash: secs(self.dash),
            slow: secs(self.slow_time),
            bomb: secs(self.bomb),
        }
    }
}

/// Everything about the running game that is not an entity.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub score: u64,
    pub high_score: u64,
    pub lives: u32,
    pub level: u32,
    pub wave: u32,
    pub round_secs: u32,
    pub time_left: u32,
    /// Wall-clock time of the last countdown decrement.
    pub countdown_anchor_ms: u64,

    pub combo: ComboTracker,
    pub shield_charges: u32,
    pub active_powerup: Option<ActivePowerUp>,
    pub cooldowns: Cooldowns,

    pub time_scale: f32,
    /// Set while slow time holds the scale down; recovery starts once cleared.
    pub slow_time_held: bool,

    pub is_paused: bool,
    pub is_game_over: bool,
    pub is_invincible: bool,
    pub flicker_timer: Option<TimerId>,

    pub camera_shake: f32,
    pub camera_offset: Vec2,

    pub last_shot_ms: [Option<u64>; 2],
    /// Which wing gun fires next, per player.
    pub left_gun_next: [bool; 2],
    pub alarm_active: bool,

    pub wave_phase: WavePhase,
    pub transition_ends_at_ms: Option<u64>,
}

impl SessionState {
    pub fn new(config: &SimConfig, high_score: u64) -> Self {
        Self {
            score: 0,
            high_score,
            lives: config.starting_lives,
            level: 1,
            wave: 1,
            round_secs: config.round_secs,
            time_left: config.round_secs,
            countdown_anchor_ms: 0,
            combo: ComboTracker::default(),
            shield_charges: 0,
            active_powerup: None,
            cooldowns: Cooldowns::default(),
            time_scale: 1.0,
            slow_time_held: false,
            is_paused: false,
            is_game_over: false,
            is_invincible: false,
            flicker_timer: None,
            camera_shake: 0.0,
            camera_offset: Vec2::ZERO,
            last_shot_ms: [None; 2],
            left_gun_next: [true; 2],
            alarm_active: false,
            wave_phase: WavePhase::Active,
            transition_ends_at_ms: None,
        }
    }

    /// Take one shared life. Returns true when that was the last one, in
    /// which case the game-over flag is set.
    pub fn lose_life(&mut self, cause: LifeLossCause, events: &mut Vec<GameEvent>) -> bool {
        self.lives = self.lives.saturating_sub(1);
        events.push(GameEvent::LifeLost {
            lives_left: self.lives,
            cause,
        });
        if self.lives == 0 {
            self.is_game_over = true;
        }
        self.is_game_over
    }

    pub fn shake(&mut self, intensity: f32) {
        self.camera_shake = intensity;
    }

    pub fn has_powerup(&self, kind: PowerUpKind) -> bool {
        self.active_powerup.is_some_and(|active| active.kind == kind)
    }

    pub fn start_alarm(&mut self, audio: &mut dyn AudioSink) {
        if !self.alarm_active {
            audio.start_alarm_loop();
            self.alarm_active = true;
        }
    }

    pub fn stop_alarm(&mut self, audio: &mut dyn AudioSink) {
        if self.alarm_active {
            audio.stop_alarm_loop();
            self.alarm_active = false;
        }
    }
}

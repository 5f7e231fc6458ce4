//! Combo tracking and score awards.

use invaders_core::constants::*;
use invaders_core::enums::ScoreReason;
use invaders_core::events::GameEvent;

use crate::scheduler::{ScheduledEffect, Scheduler, TimerId};

/// Multiplier for a combo count: `min(1 + combo / 3, 5)`.
pub fn multiplier_for(combo: u32) -> u32 {
    (1 + combo / COMBO_STEP).min(MAX_MULTIPLIER)
}

/// Consecutive-kill counter.
///
/// A kill within `COMBO_WINDOW_MS` of the previous one extends the combo;
/// otherwise it restarts at 1. An idle reset is scheduled after every kill
/// and re-armed by the next one.
#[derive(Debug, Clone)]
pub struct ComboTracker {
    pub combo: u32,
    pub multiplier: u32,
    last_kill_ms: Option<u64>,
    idle_timer: Option<TimerId>,
}

impl Default for ComboTracker {
    fn default() -> Self {
        Self {
            combo: 0,
            multiplier: 1,
            last_kill_ms: None,
            idle_timer: None,
        }
    }
}

impl ComboTracker {
    /// Record a kill at `now_ms` and return the multiplier to apply to it.
    pub fn register_kill(&mut self, now_ms: u64, scheduler: &mut Scheduler) -> u32 {
        let chained = self
            .last_kill_ms
            .is_some_and(|last| now_ms.saturating_sub(last) < COMBO_WINDOW_MS);

        if chained {
            self.combo += 1;
            self.multiplier = multiplier_for(self.combo);
        } else {
            self.combo = 1;
            self.multiplier = 1;
        }
        self.last_kill_ms = Some(now_ms);

        if let Some(timer) = self.idle_timer.take() {
            scheduler.cancel(timer);
        }
        self.idle_timer =
            Some(scheduler.schedule(now_ms + COMBO_WINDOW_MS, ScheduledEffect::ComboReset));

        self.multiplier
    }

    /// Drop back to no combo. Used by the idle timer and on ship hits.
    pub fn reset(&mut self) {
        self.combo = 0;
        self.multiplier = 1;
    }

    /// Called when the idle timer fires.
    pub fn expire(&mut self) {
        self.idle_timer = None;
        self.reset();
    }
}

/// Add `delta` to `score` and record the change.
pub fn add_score(score: &mut u64, delta: u64, reason: ScoreReason, events: &mut Vec<GameEvent>) {
    if delta == 0 {
        return;
    }
    *score += delta;
    events.push(GameEvent::ScoreChanged {
        delta,
        total: *score,
        reason,
    });
}

/// Points for one kill at `multiplier`.
pub fn kill_points(multiplier: u32) -> u64 {
    KILL_POINTS * multiplier as u64
}

/// Wave-clear bonus for the seconds left on the countdown.
pub fn time_bonus(time_left: u32) -> u64 {
    time_left as u64 * TIME_BONUS_PER_SEC
}

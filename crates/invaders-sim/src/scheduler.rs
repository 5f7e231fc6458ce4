//! Deferred effects keyed by wall-clock deadline.
//!
//! Every timed side effect (dash revert, slow-time end, hit-flash revert,
//! invincibility flicker, combo idle reset) is an entry here instead of a
//! free-running timer, so a game over can cancel all of them at once.
//! Effects only touch flags and positions, never registry membership.

use invaders_core::enums::PlayerSlot;
use invaders_core::types::VisualHandle;

/// Identifies a pending entry for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// A deferred action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScheduledEffect {
    /// Move the ship back by `distance` along +z.
    DashRevert { player: PlayerSlot, distance: f32 },
    /// Release the forced slow-time scale and start recovery.
    SlowTimeEnd,
    /// Restore an enemy body's colour after a hit flash.
    HitFlashRevert { body: VisualHandle },
    /// Toggle ship visibility; step `FLICKER_STEPS` ends invincibility.
    InvincibilityFlicker { step: u32 },
    /// No kill inside the combo window.
    ComboReset,
}

#[derive(Debug, Clone)]
struct Entry {
    id: TimerId,
    fire_at_ms: u64,
    effect: ScheduledEffect,
}

/// Queue of pending effects.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    entries: Vec<Entry>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, fire_at_ms: u64, effect: ScheduledEffect) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            fire_at_ms,
            effect,
        });
        id
    }

    /// Returns false if the entry already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Drop every pending entry. Returns how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Remove and return every entry due at `now_ms`, oldest deadline first
    /// (ties in scheduling order), paired with its deadline.
    pub fn take_due(&mut self, now_ms: u64) -> Vec<(u64, ScheduledEffect)> {
        let mut due: Vec<Entry> = Vec::new();
        self.entries.retain(|entry| {
            if entry.fire_at_ms <= now_ms {
                due.push(entry.clone());
                false
            } else {
                true
            }
        });
        due.sort_by_key(|entry| (entry.fire_at_ms, entry.id.0));
        due.into_iter()
            .map(|entry| (entry.fire_at_ms, entry.effect))
            .collect()
    }
}

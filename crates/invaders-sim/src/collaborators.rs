//! Boundaries to the external renderer, audio backend and high-score store.
//!
//! The engine drives these every tick but never depends on how they are
//! implemented. Headless implementations live here for hosts and tests
//! that have no window or speakers.

use thiserror::Error;

use invaders_core::enums::{EnemyVariant, VisualKind};
use invaders_core::types::{Color, Vec2, Vec3, VisualHandle};

/// Initial state handed to the scene when a visual is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnState {
    pub position: Vec3,
    pub scale: f32,
    pub color: Color,
    /// Attach to this visual instead of the scene root.
    pub parent: Option<VisualHandle>,
}

impl SpawnState {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            scale: 1.0,
            color: Color::WHITE,
            parent: None,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn child_of(mut self, parent: VisualHandle) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// The render scene.
///
/// `despawn` is called exactly once per spawned root visual, in the same
/// step that drops the entity from its registry. Child visuals go with
/// their parent.
pub trait Scene {
    fn spawn(&mut self, kind: VisualKind, init: &SpawnState) -> VisualHandle;
    fn despawn(&mut self, handle: VisualHandle);
    fn set_transform(&mut self, handle: VisualHandle, position: Vec3, rotation: Vec3, scale: f32);
    fn set_visible(&mut self, handle: VisualHandle, visible: bool);
    fn set_tint(&mut self, handle: VisualHandle, color: Color);
    fn set_opacity(&mut self, handle: VisualHandle, opacity: f32);
    fn set_camera_shake(&mut self, offset: Vec2);
    /// Draw the frame. Called once per tick after all mutation, paused or not.
    fn render(&mut self);
}

/// Fire-and-forget sound cues.
pub trait AudioSink {
    fn play_shoot(&mut self);
    fn play_explosion(&mut self, variant: EnemyVariant);
    fn play_level_complete(&mut self);
    fn start_alarm_loop(&mut self);
    fn stop_alarm_loop(&mut self);
}

/// Failure of the high-score backend. Never fatal to gameplay.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("high score storage unavailable: {0}")]
    Unavailable(String),
    #[error("high score I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed high score record: {0}")]
    Format(String),
}

/// Best-effort storage for the single best score.
pub trait HighScoreStore {
    fn load_high_score(&mut self) -> Result<Option<u64>, PersistenceError>;
    fn save_high_score(&mut self, score: u64) -> Result<(), PersistenceError>;
}

/// Scene that hands out handles and draws nothing.
#[derive(Debug, Default)]
pub struct NullScene {
    next_handle: u64,
    live: usize,
    frames: u64,
}

impl NullScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Root visuals currently alive. Children go with their parent.
    pub fn live_visuals(&self) -> usize {
        self.live
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }
}

impl Scene for NullScene {
    fn spawn(&mut self, _kind: VisualKind, init: &SpawnState) -> VisualHandle {
        self.next_handle += 1;
        if init.parent.is_none() {
            self.live += 1;
        }
        VisualHandle(self.next_handle)
    }

    fn despawn(&mut self, _handle: VisualHandle) {
        self.live = self.live.saturating_sub(1);
    }

    fn set_transform(&mut self, _: VisualHandle, _: Vec3, _: Vec3, _: f32) {}

    fn set_visible(&mut self, _: VisualHandle, _: bool) {}

    fn set_tint(&mut self, _: VisualHandle, _: Color) {}

    fn set_opacity(&mut self, _: VisualHandle, _: f32) {}

    fn set_camera_shake(&mut self, _: Vec2) {}

    fn render(&mut self) {
        self.frames += 1;
    }
}

/// Audio sink that plays nothing.
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play_shoot(&mut self) {}
    fn play_explosion(&mut self, _variant: EnemyVariant) {}
    fn play_level_complete(&mut self) {}
    fn start_alarm_loop(&mut self) {}
    fn stop_alarm_loop(&mut self) {}
}

/// In-memory high score, lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryHighScoreStore {
    pub best: Option<u64>,
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load_high_score(&mut self) -> Result<Option<u64>, PersistenceError> {
        Ok(self.best)
    }

    fn save_high_score(&mut self, score: u64) -> Result<(), PersistenceError> {
        self.best = Some(score);
        Ok(())
    }
}

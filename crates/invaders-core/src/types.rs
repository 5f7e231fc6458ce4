//! Fundamental geometric, colour and time types.

use serde::{Deserialize, Serialize};

pub use glam::{Vec2, Vec3};

/// Opaque handle to a visual owned by the external scene.
///
/// The simulation never interprets the value; it only hands it back to
/// the scene for transform, visibility and despawn calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VisualHandle(pub u64);

/// Linear RGB colour, each channel in 0.0..=1.0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Build from hue/saturation/lightness, all in 0.0..=1.0.
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        if s == 0.0 {
            return Self::rgb(l, l, l);
        }
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Self {
            r: hue_to_channel(p, q, h + 1.0 / 3.0),
            g: hue_to_channel(p, q, h),
            b: hue_to_channel(p, q, h - 1.0 / 3.0),
        }
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Simulation time tracking.
///
/// `now_ms` is wall-clock milliseconds since the session started, fed in by
/// the host each tick. It is never scaled by the slow-time factor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed wall-clock time in milliseconds.
    pub now_ms: u64,
}

impl SimTime {
    /// Advance by one tick that took `elapsed_ms` of real time.
    pub fn advance(&mut self, elapsed_ms: u64) {
        self.tick += 1;
        self.now_ms += elapsed_ms;
    }
}

/// Fixed-length age counter for decaying entities (particles, flashes, lasers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifetime {
    pub age: u32,
    pub lifetime: u32,
}

impl Lifetime {
    pub fn new(lifetime: u32) -> Self {
        Self { age: 0, lifetime }
    }

    /// Age by one tick. Returns true once the entity has expired.
    pub fn step(&mut self) -> bool {
        self.age = self.age.saturating_add(1);
        self.is_expired()
    }

    pub fn is_expired(&self) -> bool {
        self.age >= self.lifetime
    }

    /// Remaining life in 0.0..=1.0, used for fade-out opacity.
    pub fn remaining_fraction(&self) -> f32 {
        if self.lifetime == 0 {
            return 0.0;
        }
        (1.0 - self.age as f32 / self.lifetime as f32).clamp(0.0, 1.0)
    }
}

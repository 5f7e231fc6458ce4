//! Homogeneous entity registries with mark-then-compact removal.
//!
//! Systems flip an entity's lifecycle flag while iterating; `compact` then
//! drops every dead entry in one pass, despawning its visual first. Indices
//! stay stable for the whole pass that marks, so nothing is skipped or
//! visited twice.

use invaders_core::components::{Bullet, Enemy, MuzzleFlash, Particle, PowerUp, Star};
use invaders_core::types::VisualHandle;

use crate::collaborators::Scene;

/// An entity with a scene visual and a lifecycle flag.
pub trait Tracked {
    fn visual(&self) -> VisualHandle;
    fn is_live(&self) -> bool;
}

impl Tracked for Enemy {
    fn visual(&self) -> VisualHandle {
        self.visual
    }
    fn is_live(&self) -> bool {
        self.alive
    }
}

impl Tracked for Bullet {
    fn visual(&self) -> VisualHandle {
        self.visual
    }
    fn is_live(&self) -> bool {
        self.active
    }
}

impl Tracked for PowerUp {
    fn visual(&self) -> VisualHandle {
        self.visual
    }
    fn is_live(&self) -> bool {
        self.active
    }
}

impl Tracked for Particle {
    fn visual(&self) -> VisualHandle {
        self.visual
    }
    fn is_live(&self) -> bool {
        !self.life.is_expired()
    }
}

impl Tracked for MuzzleFlash {
    fn visual(&self) -> VisualHandle {
        self.visual
    }
    fn is_live(&self) -> bool {
        !self.life.is_expired()
    }
}

impl Tracked for Star {
    fn visual(&self) -> VisualHandle {
        self.visual
    }
    fn is_live(&self) -> bool {
        true
    }
}

/// Ordered collection of one entity type.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    items: Vec<T>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Tracked> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Entries whose lifecycle flag is still set.
    pub fn live(&self) -> impl Iterator<Item = &T> {
        self.items.iter().filter(|item| item.is_live())
    }

    pub fn live_count(&self) -> usize {
        self.live().count()
    }

    /// Drop every dead entry, despawning its visual first. Returns how many
    /// entries were removed.
    pub fn compact(&mut self, scene: &mut dyn Scene) -> usize {
        let before = self.items.len();
        self.items.retain(|item| {
            if item.is_live() {
                true
            } else {
                scene.despawn(item.visual());
                false
            }
        });
        before - self.items.len()
    }

    /// Despawn and drop everything.
    pub fn clear(&mut self, scene: &mut dyn Scene) {
        for item in self.items.drain(..) {
            scene.despawn(item.visual());
        }
    }
}

//! Static shape data: entity kind/variant to collision box size.
//!
//! Sizes match the scaled sprites the renderer draws; no images are loaded here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::ExplosionSize;
use crate::types::Hitbox;

/// Box dimensions for every drawable kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeCatalog {
    pub player: Vec2,
    /// Indexed by enemy variant.
    pub enemies: Vec<Vec2>,
    pub explosion_full: Vec2,
    pub explosion_small: Vec2,
}

impl Default for ShapeCatalog {
    fn default() -> Self {
        Self {
            player: Vec2::new(72.0, 64.0),
            enemies: vec![
                Vec2::new(80.0, 64.0),
                Vec2::new(72.0, 72.0),
                Vec2::new(88.0, 56.0),
            ],
            explosion_full: Vec2::new(96.0, 96.0),
            explosion_small: Vec2::new(48.0, 48.0),
        }
    }
}

impl ShapeCatalog {
    pub fn player_box(&self) -> Hitbox {
        Hitbox { size: self.player }
    }

    /// Unknown variants fall back to the first sprite.
    pub fn enemy_box(&self, variant: u8) -> Hitbox {
        let size = self
            .enemies
            .get(variant as usize)
            .or_else(|| self.enemies.first())
            .copied()
            .unwrap_or(self.player);
        Hitbox { size }
    }

    pub fn enemy_variants(&self) -> u8 {
        self.enemies.len().clamp(1, u8::MAX as usize) as u8
    }

    pub fn explosion_box(&self, size: ExplosionSize) -> Hitbox {
        match size {
            ExplosionSize::Full => Hitbox {
                size: self.explosion_full,
            },
            ExplosionSize::Small => Hitbox {
                size: self.explosion_small,
            },
        }
    }
}

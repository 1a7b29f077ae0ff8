//! ECS components for hecs entities.
//!
//! Components are plain data structs with few methods.
//! Game logic lives in systems, not components. Every optional
//! attribute is present from construction with an inert default.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{EntityId, Facing};

/// The player-controlled ship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Last non-zero movement direction; decides beam and shield placement.
    pub facing: Facing,
    /// Pixels per tick along each pressed axis.
    pub speed: f32,
    /// Direction mask received this tick (see `MoveMask`).
    pub move_mask: u8,
    pub invincible: bool,
    /// Ticks left on the skill boost. Invincibility and rapid fire end together at 0.
    pub boost_ticks: u32,
    pub base_fire_interval: u32,
    pub fire_interval: u32,
    pub ticks_since_last_shot: u32,
    pub skill_charges: u32,
    pub lives: u32,
}

/// A descending/hovering enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub state: EnemyState,
    pub descent_speed: f32,
    /// Centre y past which the enemy stops and starts hovering. Fixed at spawn.
    pub hover_threshold: f32,
    pub fire_interval: FireInterval,
    pub hit_points: i32,
    /// Difficulty level at spawn; scales the kill bonus.
    pub level: u32,
    pub emp_disabled: bool,
    /// Sprite/catalog variant.
    pub variant: u8,
}

/// Projectile geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProjectileShape {
    /// Straight bar oriented along the direction of travel.
    Beam { length: f32, thickness: f32 },
    /// Round orb.
    Orb { radius: f32 },
}

/// Shared projectile data. Speed and direction live in `Motion`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub owner: ProjectileOwner,
    pub shape: ProjectileShape,
    /// Neutralized projectiles are harmless on player contact.
    pub inactive: bool,
}

/// Marks a projectile fired by the player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FriendlyShot;

/// Marks a projectile launched by an enemy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HostileShot;

/// Countdown for transient entities. Removed once `remaining < 0`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Lifetime {
    pub remaining: i32,
}

/// Visual explosion. Never collides.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Explosion {
    pub size: ExplosionSize,
}

/// A live ability effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityEffect {
    pub kind: EffectKind,
    /// Shield orientation; the player's facing at activation.
    pub facing: Facing,
}

/// Entities an EMP pulse permanently altered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmpRecord {
    pub disabled_enemies: Vec<EntityId>,
    pub neutralized_orbs: Vec<EntityId>,
}

impl Lifetime {
    pub fn new(remaining: i32) -> Self {
        Self { remaining }
    }

    pub fn expired(&self) -> bool {
        self.remaining < 0
    }
}

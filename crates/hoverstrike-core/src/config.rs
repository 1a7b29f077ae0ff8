//! Data-driven game balance.
//!
//! `Tuning` defaults mirror [`crate::constants`]. A JSON file may override
//! any subset of fields; missing fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::ShapeCatalog;
use crate::constants::*;
use crate::enums::ScoringPolicy;
use crate::error::ConfigError;

/// All balance knobs read by the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // --- Player ---
    pub player_speed: f32,
    pub player_fire_interval: u32,
    pub starting_lives: u32,
    /// Cap contact damage at one life per tick. When false every active orb
    /// touching the player costs a life.
    pub one_life_per_tick: bool,

    // --- Friendly fire ---
    pub beam_speed: f32,
    pub beam_length: f32,
    pub beam_thickness: f32,
    pub spread_count: u32,
    pub spread_half_angle_deg: f32,

    // --- Enemies ---
    pub enemy_spawn_period: u64,
    pub level_period: u64,
    pub enemy_descent_speed: f32,
    pub hover_min: f32,
    pub hover_max: f32,
    pub enemy_fire_interval_min: u32,
    pub enemy_fire_interval_max: u32,
    pub enemy_base_hp: i32,

    // --- Hostile fire ---
    pub orb_speed: f32,
    pub orb_radius_min: f32,
    pub orb_radius_max: f32,

    // --- Score ---
    pub starting_score: u64,
    pub scoring: ScoringPolicy,
    pub score_per_hit: u64,
    pub score_kill_base: u64,
    pub score_kill_per_level: u64,
    pub score_per_orb: u64,

    // --- Abilities ---
    pub skill_charges: u32,
    pub skill_duration_ticks: u32,
    pub flash_life_ticks: i32,
    pub flash_toggle_ticks: i32,
    pub emp_cost: u64,
    pub emp_life_ticks: i32,
    pub shield_cost: u64,
    pub shield_life_ticks: i32,
    pub shield_thickness: f32,
    pub gravity_cost: u64,
    pub gravity_life_ticks: i32,

    // --- Explosions ---
    pub explosion_life_full: i32,
    pub explosion_life_small: i32,

    pub shapes: ShapeCatalog,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            player_fire_interval: PLAYER_FIRE_INTERVAL,
            starting_lives: PLAYER_LIVES,
            one_life_per_tick: true,
            beam_speed: BEAM_SPEED,
            beam_length: BEAM_LENGTH,
            beam_thickness: BEAM_THICKNESS,
            spread_count: SPREAD_COUNT,
            spread_half_angle_deg: SPREAD_HALF_ANGLE_DEG,
            enemy_spawn_period: ENEMY_SPAWN_PERIOD,
            level_period: LEVEL_PERIOD,
            enemy_descent_speed: ENEMY_DESCENT_SPEED,
            hover_min: ENEMY_HOVER_MIN,
            hover_max: ENEMY_HOVER_MAX,
            enemy_fire_interval_min: ENEMY_FIRE_INTERVAL_MIN,
            enemy_fire_interval_max: ENEMY_FIRE_INTERVAL_MAX,
            enemy_base_hp: ENEMY_BASE_HP,
            orb_speed: ORB_SPEED,
            orb_radius_min: ORB_RADIUS_MIN,
            orb_radius_max: ORB_RADIUS_MAX,
            starting_score: STARTING_SCORE,
            scoring: ScoringPolicy::default(),
            score_per_hit: SCORE_PER_HIT,
            score_kill_base: SCORE_KILL_BASE,
            score_kill_per_level: SCORE_KILL_PER_LEVEL,
            score_per_orb: SCORE_PER_ORB,
            skill_charges: SKILL_CHARGES,
            skill_duration_ticks: SKILL_DURATION_TICKS,
            flash_life_ticks: FLASH_LIFE_TICKS,
            flash_toggle_ticks: FLASH_TOGGLE_TICKS,
            emp_cost: EMP_COST,
            emp_life_ticks: EMP_LIFE_TICKS,
            shield_cost: SHIELD_COST,
            shield_life_ticks: SHIELD_LIFE_TICKS,
            shield_thickness: SHIELD_THICKNESS,
            gravity_cost: GRAVITY_COST,
            gravity_life_ticks: GRAVITY_LIFE_TICKS,
            explosion_life_full: EXPLOSION_LIFE_FULL,
            explosion_life_small: EXPLOSION_LIFE_SMALL,
            shapes: ShapeCatalog::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a JSON tuning file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enemy_spawn_period == 0 || self.level_period == 0 {
            return Err(ConfigError::Invalid(
                "spawn and level periods must be non-zero".into(),
            ));
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::Invalid("starting_lives must be at least 1".into()));
        }
        if self.player_fire_interval == 0 {
            return Err(ConfigError::Invalid(
                "player_fire_interval must be at least 1".into(),
            ));
        }
        if self.enemy_fire_interval_min == 0
            || self.enemy_fire_interval_min > self.enemy_fire_interval_max
        {
            return Err(ConfigError::Invalid(format!(
                "enemy fire interval range {}..={} is empty or starts at 0",
                self.enemy_fire_interval_min, self.enemy_fire_interval_max
            )));
        }
        if self.hover_min > self.hover_max {
            return Err(ConfigError::Invalid(format!(
                "hover range {}..={} is empty",
                self.hover_min, self.hover_max
            )));
        }
        if self.orb_radius_min <= 0.0 || self.orb_radius_min > self.orb_radius_max {
            return Err(ConfigError::Invalid(format!(
                "orb radius range {}..={} is invalid",
                self.orb_radius_min, self.orb_radius_max
            )));
        }
        if self.spread_count == 0 {
            return Err(ConfigError::Invalid("spread_count must be at least 1".into()));
        }
        if self.flash_toggle_ticks <= 0 {
            return Err(ConfigError::Invalid(
                "flash_toggle_ticks must be positive".into(),
            ));
        }
        if self.shapes.enemies.is_empty() {
            return Err(ConfigError::Invalid(
                "shape catalog needs at least one enemy variant".into(),
            ));
        }
        Ok(())
    }

    /// Difficulty level at `tick`: starts at 1, never decreases.
    pub fn level_at(&self, tick: u64) -> u32 {
        (tick / self.level_period.max(1) + 1).min(u32::MAX as u64) as u32
    }

    /// Kill bonus for an enemy spawned at `level`.
    pub fn kill_bonus(&self, level: u32) -> u64 {
        self.score_kill_base + self.score_kill_per_level * level as u64
    }

    /// Credit for `hits` beams landing, under the active scoring policy.
    pub fn hit_credit(&self, hits: u32) -> u64 {
        match self.scoring {
            ScoringPolicy::PerHitAndKillBonus => self.score_per_hit * hits as u64,
            ScoringPolicy::KillOnly => 0,
        }
    }
}

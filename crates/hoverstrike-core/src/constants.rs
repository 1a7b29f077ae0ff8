//! Simulation constants and tuning defaults.
//!
//! Values here seed [`crate::config::Tuning::default`]; the engine reads
//! balance numbers through `Tuning`, never directly from this module.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 50;

// --- Viewport ---

/// Viewport width in pixels.
pub const VIEWPORT_WIDTH: f32 = 1100.0;

/// Viewport height in pixels.
pub const VIEWPORT_HEIGHT: f32 = 650.0;

// --- Player ---

/// Player spawn centre.
pub const PLAYER_START: (f32, f32) = (900.0, 400.0);

/// Pixels moved per tick for each pressed direction.
pub const PLAYER_SPEED: f32 = 10.0;

/// Minimum ticks between shots without the skill boost.
pub const PLAYER_FIRE_INTERVAL: u32 = 10;

/// Lives at session start. 1 makes the first unprotected hit lethal.
pub const PLAYER_LIVES: u32 = 3;

// --- Friendly fire ---

/// Beam travel speed (pixels per tick).
pub const BEAM_SPEED: f32 = 10.0;

/// Beam bar length along its direction of travel.
pub const BEAM_LENGTH: f32 = 40.0;

/// Beam bar thickness.
pub const BEAM_THICKNESS: f32 = 10.0;

/// Beams per spread shot.
pub const SPREAD_COUNT: u32 = 5;

/// Half-angle of the spread fan (degrees).
pub const SPREAD_HALF_ANGLE_DEG: f32 = 50.0;

// --- Enemies ---

/// Ticks between enemy spawns.
pub const ENEMY_SPAWN_PERIOD: u64 = 200;

/// Ticks per difficulty level.
pub const LEVEL_PERIOD: u64 = 1000;

/// Downward speed while descending (pixels per tick).
pub const ENEMY_DESCENT_SPEED: f32 = 6.0;

/// Inclusive range for the hover threshold (y of the enemy centre).
pub const ENEMY_HOVER_MIN: f32 = 50.0;
pub const ENEMY_HOVER_MAX: f32 = VIEWPORT_HEIGHT / 2.0;

/// Inclusive range for the per-enemy fire interval (ticks).
pub const ENEMY_FIRE_INTERVAL_MIN: u32 = 50;
pub const ENEMY_FIRE_INTERVAL_MAX: u32 = 300;

/// Hit points are `ENEMY_BASE_HP + level`.
pub const ENEMY_BASE_HP: i32 = 2;

// --- Hostile fire ---

/// Orb travel speed (pixels per tick).
pub const ORB_SPEED: f32 = 6.0;

/// Inclusive orb radius range.
pub const ORB_RADIUS_MIN: f32 = 10.0;
pub const ORB_RADIUS_MAX: f32 = 30.0;

// --- Explosions ---

/// Life of an explosion spawned by an enemy kill.
pub const EXPLOSION_LIFE_FULL: i32 = 100;

/// Life of a small explosion (intercepted or absorbed orb).
pub const EXPLOSION_LIFE_SMALL: i32 = 50;

/// Ticks per explosion animation frame.
pub const EXPLOSION_FRAME_TICKS: i32 = 10;

// --- Score ---

/// Balance at session start.
pub const STARTING_SCORE: u64 = 2000;

/// Credit per friendly beam landing on an enemy.
pub const SCORE_PER_HIT: u64 = 1;

/// Kill bonus is `SCORE_KILL_BASE + SCORE_KILL_PER_LEVEL * level`.
pub const SCORE_KILL_BASE: u64 = 10;
pub const SCORE_KILL_PER_LEVEL: u64 = 5;

/// Credit per destroyed hostile orb.
pub const SCORE_PER_ORB: u64 = 1;

// --- Abilities ---

/// Skill charges at session start.
pub const SKILL_CHARGES: u32 = 3;

/// Invincibility + rapid fire duration (ticks).
pub const SKILL_DURATION_TICKS: u32 = 250;

/// Cosmetic flash lifetime (ticks).
pub const FLASH_LIFE_TICKS: i32 = 25;

/// Flash toggles translucency every this many ticks.
pub const FLASH_TOGGLE_TICKS: i32 = 5;

pub const EMP_COST: u64 = 20;
pub const EMP_LIFE_TICKS: i32 = 3;

pub const SHIELD_COST: u64 = 50;
pub const SHIELD_LIFE_TICKS: i32 = 400;
pub const SHIELD_THICKNESS: f32 = 20.0;

pub const GRAVITY_COST: u64 = 200;
pub const GRAVITY_LIFE_TICKS: i32 = 400;

//! Entity spawn factories for the simulation world.
//!
//! Every factory allocates an `EntityId` and attaches the component bundle
//! the systems query for. Randomized parameters are rolled by callers and
//! passed in, so the factories themselves are deterministic.

use glam::Vec2;
use hecs::{Entity, World};

use hoverstrike_core::components::*;
use hoverstrike_core::config::Tuning;
use hoverstrike_core::constants::{PLAYER_START, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use hoverstrike_core::enums::*;
use hoverstrike_core::types::{EntityId, Facing, Hitbox, Motion, Position};

use crate::targeting::rotated_extent;

/// Monotonic id source. Ids are never reused within a session.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

/// Fixed parameters of a new enemy.
#[derive(Debug, Clone)]
pub struct EnemySpawn {
    pub center: Vec2,
    pub hover_threshold: f32,
    pub fire_interval: FireInterval,
    pub hit_points: i32,
    pub level: u32,
    pub variant: u8,
}

/// Spawn the player at the default start position.
pub fn spawn_player(world: &mut World, ids: &mut IdAllocator, tuning: &Tuning) -> Entity {
    let player = Player {
        facing: Facing::default(),
        speed: tuning.player_speed,
        move_mask: 0,
        invincible: false,
        boost_ticks: 0,
        base_fire_interval: tuning.player_fire_interval,
        fire_interval: tuning.player_fire_interval,
        // Ready to fire on the first tick.
        ticks_since_last_shot: tuning.player_fire_interval,
        skill_charges: tuning.skill_charges,
        lives: tuning.starting_lives,
    };

    world.spawn((
        ids.allocate(),
        player,
        Position::new(PLAYER_START.0, PLAYER_START.1),
        tuning.shapes.player_box(),
    ))
}

/// Spawn a descending enemy.
pub fn spawn_enemy(
    world: &mut World,
    ids: &mut IdAllocator,
    tuning: &Tuning,
    spawn: EnemySpawn,
) -> (Entity, EntityId) {
    let id = ids.allocate();
    let enemy = Enemy {
        state: EnemyState::Descending,
        descent_speed: tuning.enemy_descent_speed,
        hover_threshold: spawn.hover_threshold,
        fire_interval: spawn.fire_interval,
        hit_points: spawn.hit_points,
        level: spawn.level,
        emp_disabled: false,
        variant: spawn.variant,
    };

    let entity = world.spawn((
        id,
        enemy,
        Position { center: spawn.center },
        tuning.shapes.enemy_box(spawn.variant),
        Motion::new(Vec2::Y, tuning.enemy_descent_speed),
    ));
    (entity, id)
}

/// Spawn a friendly beam travelling along `direction`.
pub fn spawn_beam(
    world: &mut World,
    ids: &mut IdAllocator,
    tuning: &Tuning,
    center: Vec2,
    direction: Vec2,
) -> EntityId {
    let id = ids.allocate();
    let shape = ProjectileShape::Beam {
        length: tuning.beam_length,
        thickness: tuning.beam_thickness,
    };
    let size = rotated_extent(tuning.beam_length, tuning.beam_thickness, direction);

    world.spawn((
        id,
        Projectile {
            owner: ProjectileOwner::Player,
            shape,
            inactive: false,
        },
        FriendlyShot,
        Position { center },
        Hitbox { size },
        Motion::new(direction, tuning.beam_speed),
    ));
    id
}

/// Spawn a hostile orb travelling along `direction`.
pub fn spawn_orb(
    world: &mut World,
    ids: &mut IdAllocator,
    center: Vec2,
    direction: Vec2,
    speed: f32,
    radius: f32,
) -> EntityId {
    let id = ids.allocate();

    world.spawn((
        id,
        Projectile {
            owner: ProjectileOwner::Enemy,
            shape: ProjectileShape::Orb { radius },
            inactive: false,
        },
        HostileShot,
        Position { center },
        Hitbox::new(2.0 * radius, 2.0 * radius),
        Motion::new(direction, speed),
    ));
    id
}

/// Spawn an explosion visual.
pub fn spawn_explosion(
    world: &mut World,
    ids: &mut IdAllocator,
    tuning: &Tuning,
    center: Vec2,
    size: ExplosionSize,
) -> EntityId {
    let id = ids.allocate();
    let life = match size {
        ExplosionSize::Full => tuning.explosion_life_full,
        ExplosionSize::Small => tuning.explosion_life_small,
    };

    world.spawn((
        id,
        Explosion { size },
        Position { center },
        tuning.shapes.explosion_box(size),
        Lifetime::new(life),
    ));
    id
}

/// Spawn a timed ability effect.
pub fn spawn_effect(
    world: &mut World,
    ids: &mut IdAllocator,
    kind: EffectKind,
    center: Vec2,
    hitbox: Hitbox,
    life: i32,
    facing: Facing,
) -> Entity {
    world.spawn((
        ids.allocate(),
        AbilityEffect { kind, facing },
        Position { center },
        hitbox,
        Lifetime::new(life),
    ))
}

/// Centre and size of a full-viewport effect.
pub fn viewport_cover() -> (Vec2, Hitbox) {
    (
        Vec2::new(VIEWPORT_WIDTH / 2.0, VIEWPORT_HEIGHT / 2.0),
        Hitbox::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
    )
}

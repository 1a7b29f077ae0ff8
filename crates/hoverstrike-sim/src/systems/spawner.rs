//! Spawn system: periodic enemy spawns and hovering-enemy fire.

use glam::Vec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use hoverstrike_core::components::{Enemy, Player};
use hoverstrike_core::config::Tuning;
use hoverstrike_core::constants::VIEWPORT_WIDTH;
use hoverstrike_core::enums::{EnemyState, FireInterval};
use hoverstrike_core::events::SimEvent;
use hoverstrike_core::types::Position;

use crate::systems::sorted_group;
use crate::targeting;
use crate::world_setup::{self, EnemySpawn, IdAllocator};

/// Roll the randomized parameters of a new enemy at `level`.
pub fn roll_enemy(rng: &mut ChaCha8Rng, tuning: &Tuning, level: u32) -> EnemySpawn {
    let x = rng.gen_range(0.0..=VIEWPORT_WIDTH);
    let hover_threshold = rng.gen_range(tuning.hover_min..=tuning.hover_max);
    let interval =
        rng.gen_range(tuning.enemy_fire_interval_min..=tuning.enemy_fire_interval_max);
    let variant = rng.gen_range(0..tuning.shapes.enemy_variants());

    EnemySpawn {
        center: Vec2::new(x, 0.0),
        hover_threshold,
        fire_interval: FireInterval::Every(interval),
        hit_points: tuning.enemy_base_hp + level as i32,
        level,
        variant,
    }
}

/// Spawn due enemies, then let every hovering enemy whose interval divides
/// `tick` launch one orb at the player's current centre.
pub fn run(
    world: &mut World,
    ids: &mut IdAllocator,
    rng: &mut ChaCha8Rng,
    tuning: &Tuning,
    tick: u64,
    level: u32,
    events: &mut Vec<SimEvent>,
) {
    if tick % tuning.enemy_spawn_period == 0 {
        let spawn = roll_enemy(rng, tuning, level);
        let (_, id) = world_setup::spawn_enemy(world, ids, tuning, spawn);
        log::debug!("tick {tick}: enemy {id:?} spawned at level {level}");
        events.push(SimEvent::EnemySpawned { id, level });
    }

    let Some(target) = player_center(world) else {
        return;
    };

    // Snapshot shooters first; orbs are spawned after the query ends.
    let shooters: Vec<_> = sorted_group::<&Enemy>(world)
        .into_iter()
        .filter_map(|(entity, id)| {
            let enemy = world.get::<&Enemy>(entity).ok()?;
            let pos = world.get::<&Position>(entity).ok()?;
            (enemy.state == EnemyState::Hovering && enemy.fire_interval.fires_on(tick))
                .then_some((id, pos.center))
        })
        .collect();

    for (enemy_id, origin) in shooters {
        let direction = match targeting::aim(origin, target) {
            Ok(direction) => direction,
            Err(err) => {
                log::warn!("enemy {enemy_id:?} skipped its shot: {err}");
                continue;
            }
        };
        let radius = rng.gen_range(tuning.orb_radius_min..=tuning.orb_radius_max);
        let id = world_setup::spawn_orb(world, ids, origin, direction, tuning.orb_speed, radius);
        events.push(SimEvent::OrbLaunched { id, by: enemy_id });
    }
}

fn player_center(world: &World) -> Option<Vec2> {
    world
        .query::<(&Player, &Position)>()
        .iter()
        .next()
        .map(|(_, (_, pos))| pos.center)
}

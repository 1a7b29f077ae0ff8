//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions that take `&mut World` (or `&World` for read-only).
//! They do not own state. All state lives in components, the score ledger,
//! or the engine.

pub mod abilities;
pub mod cleanup;
pub mod collision;
pub mod enemy_ai;
pub mod fire_control;
pub mod movement;
pub mod snapshot;
pub mod spawner;

use hecs::World;

use hoverstrike_core::types::EntityId;

/// Collect entities matching `Q`, ascending by id.
///
/// Systems iterate groups through this so resolution order never depends on
/// archetype storage order.
pub(crate) fn sorted_group<Q>(world: &World) -> Vec<(hecs::Entity, EntityId)>
where
    Q: hecs::Query,
{
    let mut group: Vec<(hecs::Entity, EntityId)> = world
        .query::<(&EntityId, Q)>()
        .iter()
        .map(|(entity, (id, _))| (entity, *id))
        .collect();
    group.sort_by_key(|&(_, id)| id);
    group
}

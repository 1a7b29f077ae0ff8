//! Cleanup system: removes projectiles that left the viewport and expired
//! transient entities.

use hecs::{Entity, World};

use hoverstrike_core::components::{Lifetime, Projectile};
use hoverstrike_core::types::{Aabb, Hitbox, Position};

/// Count every lifetime down by one tick.
pub fn tick_lifetimes(world: &mut World) {
    for (_entity, life) in world.query_mut::<&mut Lifetime>() {
        life.remaining -= 1;
    }
}

/// Remove projectiles with any edge outside the viewport and entities whose
/// lifetime went negative. Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    let viewport = Aabb::viewport();
    for (entity, (pos, hitbox, _projectile)) in
        world.query_mut::<(&Position, &Hitbox, &Projectile)>()
    {
        if !hitbox.at(pos).inside(&viewport) {
            despawn_buffer.push(entity);
        }
    }

    for (entity, life) in world.query_mut::<&Lifetime>() {
        if life.expired() {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

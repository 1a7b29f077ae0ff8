//! Kinematic integration system.
//!
//! Moves every entity with a `Motion` by one step and applies the player's
//! move intent, reverting any player step that would leave the viewport.

use glam::Vec2;
use hecs::World;

use hoverstrike_core::commands::MoveMask;
use hoverstrike_core::components::Player;
use hoverstrike_core::types::{Aabb, Facing, Hitbox, Motion, Position};

/// Advance all entities with Position + Motion.
pub fn run(world: &mut World) {
    for (_entity, (pos, motion)) in world.query_mut::<(&mut Position, &Motion)>() {
        pos.center += motion.step();
    }
}

/// Apply the player's move mask for this tick, then clear it.
pub fn move_player(world: &mut World) {
    let viewport = Aabb::viewport();

    for (_entity, (player, pos, hitbox)) in
        world.query_mut::<(&mut Player, &mut Position, &Hitbox)>()
    {
        let (dx, dy) = MoveMask::steps(player.move_mask);
        player.move_mask = 0;

        let step = Vec2::new(dx as f32, dy as f32) * player.speed;
        let moved = pos.center + step;
        if Aabb::from_center_size(moved, hitbox.size).inside(&viewport) {
            pos.center = moved;
        }

        if let Some(facing) = Facing::from_steps(dx, dy) {
            player.facing = facing;
        }
    }
}

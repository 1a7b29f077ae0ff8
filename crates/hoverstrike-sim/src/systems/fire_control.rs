//! Player fire control: the shot gate and beam creation.

use hecs::{Entity, World};

use hoverstrike_core::components::Player;
use hoverstrike_core::config::Tuning;
use hoverstrike_core::events::SimEvent;
use hoverstrike_core::types::{Hitbox, Position};

use crate::targeting;
use crate::world_setup::{self, IdAllocator};

/// Try to fire. A spread shot creates a fan of beams under the same gate.
/// Returns the number of beams created (0 when the gate is closed).
pub fn try_fire(
    world: &mut World,
    ids: &mut IdAllocator,
    tuning: &Tuning,
    player: Entity,
    spread: bool,
    events: &mut Vec<SimEvent>,
) -> u32 {
    let (facing, center, size) = {
        let Ok((state, pos, hitbox)) =
            world.query_one_mut::<(&mut Player, &Position, &Hitbox)>(player)
        else {
            return 0;
        };
        if state.ticks_since_last_shot < state.fire_interval {
            return 0;
        }
        state.ticks_since_last_shot = 0;
        (state.facing, pos.center, hitbox.size)
    };

    let directions = if spread {
        targeting::fan_directions(
            facing.angle_deg(),
            tuning.spread_count,
            tuning.spread_half_angle_deg,
        )
    } else {
        vec![facing.unit()]
    };

    for direction in &directions {
        // Beams leave from just beyond the ship along their own heading.
        let origin = center + size * *direction;
        world_setup::spawn_beam(world, ids, tuning, origin, *direction);
    }

    let beams = directions.len() as u32;
    events.push(SimEvent::ShotFired { beams });
    beams
}

/// Count one tick towards the next shot.
pub fn recharge(world: &mut World) {
    for (_entity, player) in world.query_mut::<&mut Player>() {
        player.ticks_since_last_shot = player.ticks_since_last_shot.saturating_add(1);
    }
}

//! Ability activation and the skill boost timer.
//!
//! Every activation is checked in the same order: singleton uniqueness,
//! then charges or cost. A rejected activation changes nothing.

use hecs::{Entity, World};

use hoverstrike_core::components::*;
use hoverstrike_core::config::Tuning;
use hoverstrike_core::enums::{AbilityId, EffectKind, FireInterval};
use hoverstrike_core::error::AbilityError;
use hoverstrike_core::types::{EntityId, Hitbox, Motion, Position};

use crate::score::ScoreLedger;
use crate::targeting::rotated_extent;
use crate::world_setup::{self, IdAllocator};

/// Activate `ability` for `player`.
pub fn activate(
    world: &mut World,
    ids: &mut IdAllocator,
    ledger: &mut ScoreLedger,
    tuning: &Tuning,
    player: Entity,
    ability: AbilityId,
) -> Result<(), AbilityError> {
    if ability.is_singleton() && effect_live(world, ability.effect_kind()) {
        return Err(AbilityError::AlreadyActive(ability));
    }

    match ability {
        AbilityId::Skill => activate_skill(world, ids, tuning, player),
        AbilityId::Emp => {
            ledger.debit(tuning.emp_cost)?;
            activate_emp(world, ids, tuning);
            Ok(())
        }
        AbilityId::Shield => {
            ledger.debit(tuning.shield_cost)?;
            activate_shield(world, ids, tuning, player);
            Ok(())
        }
        AbilityId::Gravity => {
            ledger.debit(tuning.gravity_cost)?;
            let (center, cover) = world_setup::viewport_cover();
            world_setup::spawn_effect(
                world,
                ids,
                EffectKind::Gravity,
                center,
                cover,
                tuning.gravity_life_ticks,
                Default::default(),
            );
            Ok(())
        }
    }
}

/// Whether an effect of `kind` is currently alive.
pub fn effect_live(world: &World, kind: EffectKind) -> bool {
    world
        .query::<(&AbilityEffect, &Lifetime)>()
        .iter()
        .any(|(_, (effect, life))| effect.kind == kind && !life.expired())
}

fn activate_skill(
    world: &mut World,
    ids: &mut IdAllocator,
    tuning: &Tuning,
    player: Entity,
) -> Result<(), AbilityError> {
    let (center, hitbox) = {
        let Ok((state, pos, hitbox)) =
            world.query_one_mut::<(&mut Player, &Position, &Hitbox)>(player)
        else {
            return Ok(());
        };
        if state.skill_charges == 0 {
            return Err(AbilityError::NoChargesRemaining);
        }
        state.skill_charges -= 1;
        state.invincible = true;
        state.fire_interval = (state.base_fire_interval / 2).max(1);
        state.boost_ticks = tuning.skill_duration_ticks;
        (pos.center, *hitbox)
    };

    world_setup::spawn_effect(
        world,
        ids,
        EffectKind::Flash,
        center,
        hitbox,
        tuning.flash_life_ticks,
        Default::default(),
    );
    Ok(())
}

/// Permanently silence every live enemy and neutralize every live orb.
/// Later spawns are untouched.
fn activate_emp(world: &mut World, ids: &mut IdAllocator, tuning: &Tuning) {
    let mut record = EmpRecord::default();

    for (_entity, (id, enemy)) in world.query_mut::<(&EntityId, &mut Enemy)>() {
        enemy.fire_interval = FireInterval::Never;
        enemy.emp_disabled = true;
        record.disabled_enemies.push(*id);
    }

    for (_entity, (id, projectile, motion, _hostile)) in
        world.query_mut::<(&EntityId, &mut Projectile, &mut Motion, &HostileShot)>()
    {
        // Speed is halved only once per orb.
        if !projectile.inactive {
            motion.speed *= 0.5;
            projectile.inactive = true;
        }
        record.neutralized_orbs.push(*id);
    }

    record.disabled_enemies.sort();
    record.neutralized_orbs.sort();
    log::debug!(
        "emp: {} enemies disabled, {} orbs neutralized",
        record.disabled_enemies.len(),
        record.neutralized_orbs.len()
    );

    let (center, cover) = world_setup::viewport_cover();
    let effect = world_setup::spawn_effect(
        world,
        ids,
        EffectKind::Emp,
        center,
        cover,
        tuning.emp_life_ticks,
        Default::default(),
    );
    // The effect was just spawned, so insertion cannot miss.
    let _ = world.insert_one(effect, record);
}

/// Drop a static barrier in front of the player along its facing.
fn activate_shield(world: &mut World, ids: &mut IdAllocator, tuning: &Tuning, player: Entity) {
    let Ok((state, pos, hitbox)) = world.query_one_mut::<(&Player, &Position, &Hitbox)>(player)
    else {
        return;
    };
    let facing = state.facing;
    let direction = facing.unit();
    let center = pos.center + hitbox.size * direction;
    let size = rotated_extent(2.0 * hitbox.height(), tuning.shield_thickness, direction);

    world_setup::spawn_effect(
        world,
        ids,
        EffectKind::Shield,
        center,
        Hitbox { size },
        tuning.shield_life_ticks,
        facing,
    );
}

/// Count down the skill boost; invincibility and rapid fire end together.
pub fn tick_boost(world: &mut World) {
    for (_entity, player) in world.query_mut::<&mut Player>() {
        if player.boost_ticks == 0 {
            continue;
        }
        player.boost_ticks -= 1;
        if player.boost_ticks == 0 {
            player.invincible = false;
            player.fire_interval = player.base_fire_interval;
        }
    }
}

//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::{Entity, World};

use hoverstrike_core::components::*;
use hoverstrike_core::constants::EXPLOSION_FRAME_TICKS;
use hoverstrike_core::enums::*;
use hoverstrike_core::events::SimEvent;
use hoverstrike_core::state::*;
use hoverstrike_core::types::{EntityId, Hitbox, Motion, Position, SimTime};

use crate::score::ScoreLedger;
use crate::targeting;

/// Build a complete GameStateSnapshot from the current world state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    player: Entity,
    time: &SimTime,
    phase: GamePhase,
    level: u32,
    events: Vec<SimEvent>,
    ledger: &ScoreLedger,
    flash_toggle_ticks: i32,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        level,
        player: build_player(world, player),
        entities: build_entities(world, flash_toggle_ticks),
        events,
        score: ScoreView {
            balance: ledger.balance(),
            enemies_destroyed: ledger.enemies_destroyed,
            orbs_destroyed: ledger.orbs_destroyed,
            hits_landed: ledger.hits_landed,
            orbs_absorbed: ledger.orbs_absorbed,
        },
    }
}

fn build_player(world: &World, player: Entity) -> PlayerView {
    let Ok(mut query) = world.query_one::<(&EntityId, &Player, &Position, &Hitbox)>(player)
    else {
        return PlayerView::default();
    };
    let Some((id, state, pos, hitbox)) = query.get() else {
        return PlayerView::default();
    };
    PlayerView {
        id: *id,
        center: pos.center,
        size: hitbox.size,
        facing: state.facing.index(),
        lives: state.lives,
        invincible: state.invincible,
        fire_interval: state.fire_interval,
        skill_charges: state.skill_charges,
    }
}

/// Every non-player entity, ascending by id.
fn build_entities(world: &World, flash_toggle_ticks: i32) -> Vec<EntityView> {
    let mut views: Vec<EntityView> = Vec::new();

    for (_, (id, pos, hitbox, enemy)) in world
        .query::<(&EntityId, &Position, &Hitbox, &Enemy)>()
        .iter()
    {
        let visual = VisualState::Variant(enemy.variant);
        views.push(view(*id, EntityKind::Enemy, pos, hitbox, visual));
    }

    for (_, (id, pos, hitbox, projectile, motion)) in world
        .query::<(&EntityId, &Position, &Hitbox, &Projectile, &Motion)>()
        .iter()
    {
        let (kind, visual) = match projectile.shape {
            ProjectileShape::Beam { .. } => (
                EntityKind::Beam,
                VisualState::Angle(targeting::angle_deg(motion.direction)),
            ),
            ProjectileShape::Orb { .. } => (EntityKind::Orb, VisualState::Plain),
        };
        views.push(view(*id, kind, pos, hitbox, visual));
    }

    for (_, (id, pos, hitbox, _explosion, life)) in world
        .query::<(&EntityId, &Position, &Hitbox, &Explosion, &Lifetime)>()
        .iter()
    {
        let frame = (life.remaining.max(0) / EXPLOSION_FRAME_TICKS) % 2;
        let visual = VisualState::Frame(frame as u8);
        views.push(view(*id, EntityKind::Explosion, pos, hitbox, visual));
    }

    for (_, (id, pos, hitbox, effect, life)) in world
        .query::<(&EntityId, &Position, &Hitbox, &AbilityEffect, &Lifetime)>()
        .iter()
    {
        let visual = match effect.kind {
            EffectKind::Flash => {
                let phase = life.remaining.max(0) / flash_toggle_ticks.max(1);
                VisualState::Translucent(phase % 2 == 0)
            }
            EffectKind::Shield => VisualState::Angle(effect.facing.angle_deg()),
            EffectKind::Emp | EffectKind::Gravity => VisualState::Plain,
        };
        views.push(view(*id, EntityKind::Effect(effect.kind), pos, hitbox, visual));
    }

    views.sort_by_key(|v| v.id);
    views
}

fn view(
    id: EntityId,
    kind: EntityKind,
    pos: &Position,
    hitbox: &Hitbox,
    visual: VisualState,
) -> EntityView {
    EntityView {
        id,
        kind,
        center: pos.center,
        size: hitbox.size,
        visual,
    }
}

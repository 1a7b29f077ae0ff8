//! Collision resolution between entity groups.
//!
//! Five phases run in a fixed order. Each phase snapshots its groups in id
//! order, marks outcomes, then applies them before the next phase starts, so
//! an entity destroyed in one phase is invisible to the rest.

use glam::Vec2;
use hecs::{Entity, Query, World};

use hoverstrike_core::components::*;
use hoverstrike_core::config::Tuning;
use hoverstrike_core::enums::{EffectKind, ExplosionSize};
use hoverstrike_core::events::SimEvent;
use hoverstrike_core::types::{Aabb, EntityId, Hitbox, Position};

use crate::score::ScoreLedger;
use crate::systems::sorted_group;
use crate::world_setup::{self, IdAllocator};

/// What one collision pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub hits: u32,
    pub enemies_destroyed: u32,
    pub orbs_destroyed: u32,
    pub orbs_absorbed: u32,
    pub player_hit: bool,
}

/// Entity plus its world-space box at the moment the phase began.
#[derive(Debug, Clone, Copy)]
struct Body {
    entity: Entity,
    id: EntityId,
    bounds: Aabb,
}

fn bodies<Q: Query>(world: &World) -> Vec<Body> {
    sorted_group::<Q>(world)
        .into_iter()
        .filter_map(|(entity, id)| {
            let pos = world.get::<&Position>(entity).ok()?;
            let hitbox = world.get::<&Hitbox>(entity).ok()?;
            Some(Body {
                entity,
                id,
                bounds: hitbox.at(&pos),
            })
        })
        .collect()
}

/// Shared mutable context threaded through the phases.
pub struct CollisionContext<'a> {
    pub world: &'a mut World,
    pub ids: &'a mut IdAllocator,
    pub ledger: &'a mut ScoreLedger,
    pub tuning: &'a Tuning,
    pub player: Entity,
    pub events: &'a mut Vec<SimEvent>,
}

/// Run every collision phase once.
pub fn run(ctx: &mut CollisionContext<'_>) -> CollisionReport {
    let mut report = CollisionReport::default();
    enemies_vs_beams(ctx, &mut report);
    orbs_vs_beams(ctx, &mut report);
    orbs_vs_shield(ctx, &mut report);
    player_vs_orbs(ctx, &mut report);
    gravity_sweep(ctx, &mut report);
    report
}

/// Phase 1. Every overlapping beam counts as a hit and is consumed. A beam
/// lands once: the lowest-id enemy it overlaps takes it.
fn enemies_vs_beams(ctx: &mut CollisionContext<'_>, report: &mut CollisionReport) {
    let enemies = bodies::<&Enemy>(ctx.world);
    let beams = bodies::<&FriendlyShot>(ctx.world);
    let mut spent = vec![false; beams.len()];
    let mut struck: Vec<(Body, u32)> = Vec::new();

    for enemy in &enemies {
        let mut hits = 0;
        for (i, beam) in beams.iter().enumerate() {
            if !spent[i] && enemy.bounds.overlaps(&beam.bounds) {
                hits += 1;
                spent[i] = true;
            }
        }
        if hits > 0 {
            struck.push((*enemy, hits));
        }
    }

    for (beam, _) in beams.iter().zip(&spent).filter(|(_, spent)| **spent) {
        let _ = ctx.world.despawn(beam.entity);
    }

    for (enemy, hits) in struck {
        let (hit_points, level) = match ctx.world.get::<&mut Enemy>(enemy.entity) {
            Ok(mut state) => {
                state.hit_points -= hits as i32;
                (state.hit_points, state.level)
            }
            Err(_) => continue,
        };

        report.hits += hits;
        ctx.ledger.hits_landed += hits;
        ctx.ledger.credit(ctx.tuning.hit_credit(hits));

        if hit_points <= 0 {
            destroy_enemy(ctx, enemy, level, report);
        } else {
            ctx.events.push(SimEvent::EnemyHit {
                id: enemy.id,
                hits,
                hit_points,
            });
        }
    }
}

/// Phase 2. Beams and orbs destroy each other pairwise.
fn orbs_vs_beams(ctx: &mut CollisionContext<'_>, report: &mut CollisionReport) {
    let orbs = bodies::<&HostileShot>(ctx.world);
    let beams = bodies::<&FriendlyShot>(ctx.world);
    let mut beam_spent = vec![false; beams.len()];
    let mut downed = Vec::new();

    for orb in &orbs {
        let mut hit = false;
        for (i, beam) in beams.iter().enumerate() {
            if orb.bounds.overlaps(&beam.bounds) {
                beam_spent[i] = true;
                hit = true;
            }
        }
        if hit {
            downed.push(*orb);
        }
    }

    for (beam, _) in beams.iter().zip(&beam_spent).filter(|(_, spent)| **spent) {
        let _ = ctx.world.despawn(beam.entity);
    }
    for orb in downed {
        destroy_orb(ctx, orb, report);
    }
}

/// Phase 3. A live shield swallows orbs without scoring.
fn orbs_vs_shield(ctx: &mut CollisionContext<'_>, report: &mut CollisionReport) {
    let shields: Vec<Aabb> = live_effects(ctx.world, EffectKind::Shield);
    if shields.is_empty() {
        return;
    }

    let absorbed: Vec<Body> = bodies::<&HostileShot>(ctx.world)
        .into_iter()
        .filter(|orb| shields.iter().any(|shield| shield.overlaps(&orb.bounds)))
        .collect();

    for orb in absorbed {
        let _ = ctx.world.despawn(orb.entity);
        explode(ctx, orb.bounds.center(), ExplosionSize::Small);
        report.orbs_absorbed += 1;
        ctx.events.push(SimEvent::OrbAbsorbed { id: orb.id });
    }
}

/// Phase 4. Orbs touching the player are consumed. Each active orb costs a
/// life unless the tuning caps the loss at one per tick.
fn player_vs_orbs(ctx: &mut CollisionContext<'_>, report: &mut CollisionReport) {
    let Some((player_box, invincible)) = player_state(ctx.world, ctx.player) else {
        return;
    };

    let touching: Vec<Body> = bodies::<&HostileShot>(ctx.world)
        .into_iter()
        .filter(|orb| orb.bounds.overlaps(&player_box))
        .collect();

    let mut lethal = 0u32;
    for orb in touching {
        let inactive = ctx
            .world
            .get::<&Projectile>(orb.entity)
            .map(|p| p.inactive)
            .unwrap_or(false);
        let _ = ctx.world.despawn(orb.entity);

        if invincible {
            explode(ctx, orb.bounds.center(), ExplosionSize::Small);
        } else if !inactive {
            lethal += 1;
        }
    }

    if lethal == 0 {
        return;
    }
    let damage = if ctx.tuning.one_life_per_tick { 1 } else { lethal };
    if let Ok(mut player) = ctx.world.get::<&mut Player>(ctx.player) {
        player.lives = player.lives.saturating_sub(damage);
        let lives = player.lives;
        drop(player);
        report.player_hit = true;
        log::debug!("player hit, {lives} lives left");
        ctx.events.push(SimEvent::PlayerHit { lives });
    }
}

/// Phase 5. While a gravity effect lives, nothing hostile survives the tick.
fn gravity_sweep(ctx: &mut CollisionContext<'_>, report: &mut CollisionReport) {
    if live_effects(ctx.world, EffectKind::Gravity).is_empty() {
        return;
    }

    for enemy in bodies::<&Enemy>(ctx.world) {
        let level = match ctx.world.get::<&Enemy>(enemy.entity) {
            Ok(state) => state.level,
            Err(_) => continue,
        };
        destroy_enemy(ctx, enemy, level, report);
    }
    for orb in bodies::<&HostileShot>(ctx.world) {
        destroy_orb(ctx, orb, report);
    }
}

fn destroy_enemy(
    ctx: &mut CollisionContext<'_>,
    enemy: Body,
    level: u32,
    report: &mut CollisionReport,
) {
    let _ = ctx.world.despawn(enemy.entity);
    explode(ctx, enemy.bounds.center(), ExplosionSize::Full);

    let bonus = ctx.tuning.kill_bonus(level);
    ctx.ledger.credit(bonus);
    ctx.ledger.enemies_destroyed += 1;
    report.enemies_destroyed += 1;
    log::debug!("enemy {:?} destroyed, bonus {bonus}", enemy.id);
    ctx.events.push(SimEvent::EnemyDestroyed { id: enemy.id, bonus });
}

fn destroy_orb(ctx: &mut CollisionContext<'_>, orb: Body, report: &mut CollisionReport) {
    let _ = ctx.world.despawn(orb.entity);
    explode(ctx, orb.bounds.center(), ExplosionSize::Small);

    ctx.ledger.credit(ctx.tuning.score_per_orb);
    ctx.ledger.orbs_destroyed += 1;
    report.orbs_destroyed += 1;
    ctx.events.push(SimEvent::OrbDestroyed { id: orb.id });
}

fn explode(ctx: &mut CollisionContext<'_>, center: Vec2, size: ExplosionSize) {
    world_setup::spawn_explosion(ctx.world, ctx.ids, ctx.tuning, center, size);
}

fn live_effects(world: &World, kind: EffectKind) -> Vec<Aabb> {
    world
        .query::<(&AbilityEffect, &Lifetime, &Position, &Hitbox)>()
        .iter()
        .filter(|(_, (effect, life, _, _))| effect.kind == kind && !life.expired())
        .map(|(_, (_, _, pos, hitbox))| hitbox.at(pos))
        .collect()
}

fn player_state(world: &World, player: Entity) -> Option<(Aabb, bool)> {
    let state = world.get::<&Player>(player).ok()?;
    let pos = world.get::<&Position>(player).ok()?;
    let hitbox = world.get::<&Hitbox>(player).ok()?;
    Some((hitbox.at(&pos), state.invincible))
}

//! Tests for the simulation engine, collision phases, abilities and spawning.

use glam::Vec2;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use hoverstrike_core::commands::{MoveMask, PlayerCommand};
use hoverstrike_core::components::*;
use hoverstrike_core::config::Tuning;
use hoverstrike_core::error::ConfigError;
use hoverstrike_core::enums::*;
use hoverstrike_core::events::{RejectReason, SimEvent};
use hoverstrike_core::state::VisualState;
use hoverstrike_core::types::{EntityId, Facing, Motion, Position};

use crate::engine::{SimConfig, SimulationEngine};
use crate::systems::{movement, spawner};
use crate::world_setup::{self, EnemySpawn, IdAllocator};

fn engine_with(tuning: Tuning) -> SimulationEngine {
    SimulationEngine::new(SimConfig { seed: 7, tuning }).unwrap()
}

fn test_enemy(center: Vec2, hit_points: i32) -> EnemySpawn {
    EnemySpawn {
        center,
        hover_threshold: 600.0,
        fire_interval: FireInterval::Never,
        hit_points,
        level: 1,
        variant: 0,
    }
}

fn player(engine: &SimulationEngine) -> Player {
    engine
        .world()
        .get::<&Player>(engine.player())
        .map(|p| (*p).clone())
        .unwrap()
}

fn count<Q: hecs::Query>(world: &World) -> usize {
    world.query::<Q>().iter().count()
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    })
    .unwrap();
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    })
    .unwrap();

    for tick in 0..600u32 {
        let commands = match tick % 40 {
            0 => vec![PlayerCommand::Move { mask: MoveMask::LEFT }],
            5 => vec![PlayerCommand::Fire],
            20 => vec![PlayerCommand::FireSpread],
            _ => vec![],
        };
        engine_a.queue_commands(commands.clone());
        engine_b.queue_commands(commands);

        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    })
    .unwrap();
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    })
    .unwrap();

    let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
    let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
    assert_ne!(json_a, json_b, "Different seeds should roll different enemies");
}

// ---- Engine lifecycle ----

#[test]
fn test_new_engine_has_only_player() {
    let engine = SimulationEngine::new(SimConfig::default()).unwrap();
    assert_eq!(count::<&Player>(engine.world()), 1);
    assert_eq!(count::<&Enemy>(engine.world()), 0);
    assert_eq!(engine.phase(), GamePhase::Playing);
    assert_eq!(engine.time().tick, 0);
    assert_eq!(engine.score().balance(), 2000);
}

#[test]
fn test_new_engine_rejects_invalid_tuning() {
    let broken = [
        Tuning {
            enemy_spawn_period: 0,
            ..Default::default()
        },
        Tuning {
            hover_min: 400.0,
            hover_max: 100.0,
            ..Default::default()
        },
        Tuning {
            orb_radius_min: 30.0,
            orb_radius_max: 10.0,
            ..Default::default()
        },
    ];
    for tuning in broken {
        let result = SimulationEngine::new(SimConfig { seed: 1, tuning });
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}

#[test]
fn test_enemy_spawned_on_first_tick() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    let snap = engine.tick();

    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::EnemySpawned { level: 1, .. })));
    for (_, enemy) in engine.world().query::<&Enemy>().iter() {
        assert_eq!(enemy.hit_points, 3);
        assert_eq!(enemy.state, EnemyState::Descending);
    }
    assert_eq!(snap.time.tick, 1);
}

#[test]
fn test_pause_freezes_time() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    engine.tick();

    engine.queue_command(PlayerCommand::Pause);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Paused);
    assert_eq!(snap.time.tick, 1);

    engine.queue_command(PlayerCommand::Fire);
    let snap = engine.tick();
    assert_eq!(snap.time.tick, 1);
    assert!(snap.events.is_empty(), "Fire while paused is ignored");

    engine.queue_command(PlayerCommand::Resume);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Playing);
    assert_eq!(snap.time.tick, 2);
}

#[test]
fn test_level_up_event() {
    let tuning = Tuning {
        level_period: 10,
        ..Default::default()
    };
    let mut engine = engine_with(tuning);
    let mut levels = Vec::new();
    for _ in 0..25 {
        let snap = engine.tick();
        levels.extend(snap.events.iter().filter_map(|e| match e {
            SimEvent::LevelUp { level } => Some(*level),
            _ => None,
        }));
    }
    assert_eq!(levels, vec![2, 3]);
    assert_eq!(engine.level(), 3);
}

#[test]
fn test_no_expired_lifetimes_after_tick() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    engine.queue_command(PlayerCommand::Activate {
        ability: AbilityId::Skill,
    });
    engine.queue_command(PlayerCommand::Activate {
        ability: AbilityId::Emp,
    });
    for _ in 0..400 {
        engine.queue_command(PlayerCommand::FireSpread);
        engine.tick();
        for (_, life) in engine.world().query::<&Lifetime>().iter() {
            assert!(life.remaining >= 0, "expired entity survived the tick");
        }
    }
}

#[test]
fn test_entity_ids_ascending_in_snapshot() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    for _ in 0..300 {
        engine.queue_command(PlayerCommand::FireSpread);
        engine.tick();
    }
    let snap = engine.tick();
    let ids: Vec<EntityId> = snap.entities.iter().map(|e| e.id).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(ids, sorted);
}

// ---- Movement ----

#[test]
fn test_orb_moves_toward_player() {
    let mut world = World::new();
    let mut ids = IdAllocator::default();
    let origin = Vec2::new(100.0, 0.0);
    let direction = crate::targeting::aim(origin, Vec2::new(100.0, 100.0)).unwrap();
    assert!((direction - Vec2::Y).length() < 1e-6);

    world_setup::spawn_orb(&mut world, &mut ids, origin, direction, 6.0, 10.0);
    movement::run(&mut world);

    let (_, pos) = world.query_mut::<&Position>().into_iter().next().unwrap();
    assert!((pos.center - Vec2::new(100.0, 6.0)).length() < 1e-4);
}

#[test]
fn test_player_stays_in_viewport() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    for _ in 0..40 {
        engine.queue_command(PlayerCommand::Move {
            mask: MoveMask::RIGHT | MoveMask::DOWN,
        });
        engine.tick();
    }
    let snap = engine.tick();
    let half = snap.player.size * 0.5;
    assert!(snap.player.center.x + half.x <= 1100.0);
    assert!(snap.player.center.y + half.y <= 650.0);
    assert_eq!(snap.player.center.x, 1060.0);
}

#[test]
fn test_move_updates_facing() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    engine.queue_command(PlayerCommand::Move { mask: MoveMask::UP });
    engine.tick();
    assert_eq!(player(&engine).facing, Facing::UP);

    // An empty mask keeps the last facing.
    engine.queue_command(PlayerCommand::Move { mask: 0 });
    engine.tick();
    assert_eq!(player(&engine).facing, Facing::UP);
}

#[test]
fn test_beam_leaves_viewport_and_is_removed() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    engine.queue_command(PlayerCommand::Fire);
    engine.tick();
    assert_eq!(count::<&FriendlyShot>(engine.world()), 1);

    for _ in 0..20 {
        engine.tick();
    }
    assert_eq!(count::<&FriendlyShot>(engine.world()), 0);
}

// ---- Fire control ----

#[test]
fn test_fire_gate() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    let mut shots = 0;
    for _ in 0..11 {
        engine.queue_command(PlayerCommand::Fire);
        let snap = engine.tick();
        shots += snap
            .events
            .iter()
            .filter(|e| matches!(e, SimEvent::ShotFired { .. }))
            .count();
    }
    assert_eq!(shots, 2, "Ticks 1 and 11 fire, the rest are gated");
}

#[test]
fn test_fire_spread_creates_fan_under_one_gate() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    engine.queue_command(PlayerCommand::FireSpread);
    engine.queue_command(PlayerCommand::FireSpread);
    let snap = engine.tick();

    assert_eq!(count::<&FriendlyShot>(engine.world()), 5);
    assert_eq!(
        snap.events
            .iter()
            .filter(|e| matches!(e, SimEvent::ShotFired { beams: 5 }))
            .count(),
        1
    );
}

// ---- Enemy behaviour ----

#[test]
fn test_enemy_only_fires_while_hovering() {
    let tuning = Tuning::default();
    let mut world = World::new();
    let mut ids = IdAllocator::default();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut events = Vec::new();

    world_setup::spawn_player(&mut world, &mut ids, &tuning);
    let mut spawn = test_enemy(Vec2::new(300.0, 100.0), 3);
    spawn.fire_interval = FireInterval::Every(1);
    let (enemy, _) = world_setup::spawn_enemy(&mut world, &mut ids, &tuning, spawn);

    spawner::run(&mut world, &mut ids, &mut rng, &tuning, 1, 1, &mut events);
    assert_eq!(count::<&HostileShot>(&world), 0);

    world.get::<&mut Enemy>(enemy).unwrap().state = EnemyState::Hovering;
    spawner::run(&mut world, &mut ids, &mut rng, &tuning, 2, 1, &mut events);
    assert_eq!(count::<&HostileShot>(&world), 1);
    assert!(events
        .iter()
        .any(|e| matches!(e, SimEvent::OrbLaunched { .. })));

    for (_, (projectile, motion)) in world.query::<(&Projectile, &Motion)>().iter() {
        let ProjectileShape::Orb { radius } = projectile.shape else {
            panic!("enemy fired a beam");
        };
        assert!((10.0..=30.0).contains(&radius));
        assert_eq!(motion.speed, 6.0);
    }
}

#[test]
fn test_enemy_hovers_past_threshold() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    let mut spawn = test_enemy(Vec2::new(300.0, 100.0), 3);
    spawn.hover_threshold = 110.0;
    let enemy = engine.spawn_test_enemy(spawn);

    engine.tick();
    engine.tick();
    let state = engine.world().get::<&Enemy>(enemy).unwrap().state;
    assert_eq!(state, EnemyState::Descending, "y=112 crossed only after this tick's move");

    engine.tick();
    let y = engine.world().get::<&Position>(enemy).unwrap().center.y;
    assert_eq!(engine.world().get::<&Enemy>(enemy).unwrap().state, EnemyState::Hovering);
    engine.tick();
    assert_eq!(engine.world().get::<&Position>(enemy).unwrap().center.y, y);
}

// ---- Collisions ----

#[test]
fn test_two_hits_then_kill() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    let enemy = engine.spawn_test_enemy(test_enemy(Vec2::new(300.0, 300.0), 3));
    engine.spawn_test_beam(Vec2::new(300.0, 295.0), Vec2::X);
    engine.spawn_test_beam(Vec2::new(300.0, 305.0), Vec2::X);

    let snap = engine.tick();
    assert_eq!(engine.world().get::<&Enemy>(enemy).unwrap().hit_points, 1);
    assert_eq!(count::<&FriendlyShot>(engine.world()), 0);
    assert_eq!(count::<&Explosion>(engine.world()), 0);
    assert_eq!(engine.score().balance(), 2002);
    assert_eq!(engine.score().hits_landed, 2);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::EnemyHit { hits: 2, hit_points: 1, .. })));

    let last = engine.world().get::<&Position>(enemy).unwrap().center;
    engine.spawn_test_beam(last, Vec2::X);
    let snap = engine.tick();

    assert!(!engine.world().contains(enemy));
    assert_eq!(engine.score().balance(), 2002 + 1 + 15);
    assert_eq!(engine.score().enemies_destroyed, 1);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::EnemyDestroyed { bonus: 15, .. })));

    let explosions: Vec<(ExplosionSize, Vec2)> = engine
        .world()
        .query::<(&Explosion, &Position)>()
        .iter()
        .map(|(_, (e, p))| (e.size, p.center))
        .collect();
    assert_eq!(explosions, vec![(ExplosionSize::Full, last)]);
}

#[test]
fn test_beam_lands_on_lowest_id_enemy_only() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    let first = engine.spawn_test_enemy(test_enemy(Vec2::new(300.0, 300.0), 3));
    let second = engine.spawn_test_enemy(test_enemy(Vec2::new(330.0, 300.0), 3));
    engine.spawn_test_beam(Vec2::new(315.0, 300.0), Vec2::X);

    let snap = engine.tick();
    assert_eq!(engine.world().get::<&Enemy>(first).unwrap().hit_points, 2);
    assert_eq!(engine.world().get::<&Enemy>(second).unwrap().hit_points, 3);
    assert_eq!(engine.score().hits_landed, 1);
    assert_eq!(engine.score().balance(), 2001);
    let hit_events = snap
        .events
        .iter()
        .filter(|e| matches!(e, SimEvent::EnemyHit { .. }))
        .count();
    assert_eq!(hit_events, 1);
}

#[test]
fn test_kill_only_scoring() {
    let tuning = Tuning {
        scoring: ScoringPolicy::KillOnly,
        ..Default::default()
    };
    let mut engine = engine_with(tuning);
    engine.spawn_test_enemy(test_enemy(Vec2::new(300.0, 300.0), 1));
    engine.spawn_test_beam(Vec2::new(300.0, 300.0), Vec2::X);
    engine.tick();
    assert_eq!(engine.score().balance(), 2015);
}

#[test]
fn test_beam_and_orb_destroy_each_other() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    engine.spawn_test_orb(Vec2::new(500.0, 300.0), Vec2::Y, 0.0, 10.0);
    engine.spawn_test_beam(Vec2::new(500.0, 300.0), Vec2::X);

    engine.tick();
    assert_eq!(count::<&HostileShot>(engine.world()), 0);
    assert_eq!(count::<&FriendlyShot>(engine.world()), 0);
    assert_eq!(engine.score().balance(), 2001);
    assert_eq!(engine.score().orbs_destroyed, 1);
    for (_, explosion) in engine.world().query::<&Explosion>().iter() {
        assert_eq!(explosion.size, ExplosionSize::Small);
    }
}

#[test]
fn test_player_loses_one_life_per_tick() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    let center = Vec2::new(900.0, 400.0);
    for offset in [-10.0, 0.0, 10.0] {
        engine.spawn_test_orb(center + Vec2::new(offset, 0.0), Vec2::Y, 0.0, 10.0);
    }

    let snap = engine.tick();
    assert_eq!(snap.player.lives, 2);
    assert_eq!(count::<&HostileShot>(engine.world()), 0);
    assert_eq!(snap.phase, GamePhase::Playing);
}

#[test]
fn test_uncapped_contact_damage_costs_a_life_per_orb() {
    let tuning = Tuning {
        one_life_per_tick: false,
        ..Default::default()
    };
    let mut engine = engine_with(tuning);
    let center = Vec2::new(900.0, 400.0);
    for offset in [-10.0, 10.0] {
        engine.spawn_test_orb(center + Vec2::new(offset, 0.0), Vec2::Y, 0.0, 10.0);
    }

    let snap = engine.tick();
    assert_eq!(snap.player.lives, 1);
    assert!(snap.events.contains(&SimEvent::PlayerHit { lives: 1 }));
    assert_eq!(snap.phase, GamePhase::Playing);
}

#[test]
fn test_invincible_player_takes_no_damage() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    engine.spawn_test_orb(Vec2::new(900.0, 400.0), Vec2::Y, 0.0, 10.0);
    engine.queue_command(PlayerCommand::Activate {
        ability: AbilityId::Skill,
    });

    let snap = engine.tick();
    assert_eq!(snap.player.lives, 3);
    assert_eq!(count::<&HostileShot>(engine.world()), 0);
    assert_eq!(count::<&Explosion>(engine.world()), 1);
}

#[test]
fn test_game_over_emitted_once() {
    let tuning = Tuning {
        starting_lives: 1,
        ..Default::default()
    };
    let mut engine = engine_with(tuning);
    engine.spawn_test_orb(Vec2::new(900.0, 400.0), Vec2::Y, 0.0, 10.0);

    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::GameOver);
    assert_eq!(snap.player.lives, 0);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::GameOver { score: 2000 })));

    let snap = engine.tick();
    assert_eq!(snap.time.tick, 1);
    assert!(snap.events.is_empty());
}

// ---- Abilities ----

#[test]
fn test_skill_boost_reverts_after_duration() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    engine.queue_command(PlayerCommand::Activate {
        ability: AbilityId::Skill,
    });
    engine.tick();

    let state = player(&engine);
    assert_eq!(state.skill_charges, 2);
    assert!(state.invincible);
    assert_eq!(state.fire_interval, 5);

    for _ in 1..249 {
        engine.queue_command(PlayerCommand::Fire);
        engine.tick();
    }
    assert!(player(&engine).invincible);

    engine.tick();
    let state = player(&engine);
    assert!(!state.invincible);
    assert_eq!(state.fire_interval, 10);
}

#[test]
fn test_skill_without_charges_rejected() {
    let tuning = Tuning {
        skill_charges: 0,
        ..Default::default()
    };
    let mut engine = engine_with(tuning);
    engine.queue_command(PlayerCommand::Activate {
        ability: AbilityId::Skill,
    });
    let snap = engine.tick();

    assert!(snap.events.contains(&SimEvent::AbilityRejected {
        ability: AbilityId::Skill,
        reason: RejectReason::NoChargesRemaining,
    }));
    assert!(!snap.player.invincible);
    assert_eq!(snap.player.fire_interval, 10);
}

#[test]
fn test_skill_flash_visual_toggles() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    engine.queue_command(PlayerCommand::Activate {
        ability: AbilityId::Skill,
    });

    let mut seen = Vec::new();
    for _ in 0..30 {
        let snap = engine.tick();
        let flash = snap
            .entities
            .iter()
            .find(|e| e.kind == EntityKind::Effect(EffectKind::Flash));
        seen.push(flash.map(|e| e.visual));
    }
    assert!(seen[..25].iter().all(Option::is_some));
    assert!(seen[26..].iter().all(Option::is_none));
    assert!(seen.contains(&Some(VisualState::Translucent(true))));
    assert!(seen.contains(&Some(VisualState::Translucent(false))));
}

#[test]
fn test_emp_disables_only_live_hostiles() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    let a = engine.spawn_test_enemy(test_enemy(Vec2::new(200.0, 300.0), 3));
    let b = engine.spawn_test_enemy(test_enemy(Vec2::new(400.0, 300.0), 3));
    let orb = engine.spawn_test_orb(Vec2::new(600.0, 300.0), Vec2::X, 6.0, 10.0);
    engine.queue_command(PlayerCommand::Activate {
        ability: AbilityId::Emp,
    });

    let snap = engine.tick();
    assert_eq!(engine.score().balance(), 1980);

    for entity in [a, b] {
        let enemy = engine.world().get::<&Enemy>(entity).unwrap();
        assert!(enemy.emp_disabled);
        assert_eq!(enemy.fire_interval, FireInterval::Never);
    }
    // The enemy spawned later in the same tick keeps firing.
    let spawned: Vec<EntityId> = snap
        .events
        .iter()
        .filter_map(|e| match e {
            SimEvent::EnemySpawned { id, .. } => Some(*id),
            _ => None,
        })
        .collect();
    assert_eq!(spawned.len(), 1);
    for (_, (id, enemy)) in engine.world().query::<(&EntityId, &Enemy)>().iter() {
        if *id == spawned[0] {
            assert!(!enemy.emp_disabled);
        }
    }

    let records: Vec<EmpRecord> = engine
        .world()
        .query::<&EmpRecord>()
        .iter()
        .map(|(_, r)| r.clone())
        .collect();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].disabled_enemies.len(), 2);
    assert_eq!(records[0].neutralized_orbs, vec![orb]);

    for (_, (projectile, motion)) in engine
        .world()
        .query::<(&Projectile, &Motion)>()
        .iter()
    {
        assert!(projectile.inactive);
        assert_eq!(motion.speed, 3.0);
    }
}

fn orbs_launched(events: &[SimEvent]) -> Vec<(EntityId, EntityId)> {
    events
        .iter()
        .filter_map(|e| match e {
            SimEvent::OrbLaunched { id, by } => Some((*id, *by)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_emp_silences_hovering_enemy_for_good() {
    let tuning = Tuning {
        enemy_spawn_period: 10_000,
        ..Default::default()
    };
    let mut engine = engine_with(tuning);
    let mut spawn = test_enemy(Vec2::new(300.0, 300.0), 3);
    spawn.hover_threshold = 100.0;
    spawn.fire_interval = FireInterval::Every(1);
    let enemy = engine.spawn_test_enemy(spawn);
    let enemy_id = *engine.world().get::<&EntityId>(enemy).unwrap();

    engine.tick();
    let snap = engine.tick();
    assert_eq!(orbs_launched(&snap.events).len(), 1);
    assert_eq!(orbs_launched(&snap.events)[0].1, enemy_id);

    engine.queue_command(PlayerCommand::Activate {
        ability: AbilityId::Emp,
    });
    for _ in 0..20 {
        let snap = engine.tick();
        assert!(orbs_launched(&snap.events).is_empty());
    }
    let state = engine.world().get::<&Enemy>(enemy).unwrap().state;
    assert_eq!(state, EnemyState::Hovering);
}

#[test]
fn test_orb_launched_after_emp_is_live() {
    let tuning = Tuning {
        enemy_spawn_period: 10_000,
        ..Default::default()
    };
    let mut engine = engine_with(tuning);
    engine.queue_command(PlayerCommand::Activate {
        ability: AbilityId::Emp,
    });
    engine.tick();

    let mut spawn = test_enemy(Vec2::new(300.0, 300.0), 3);
    spawn.hover_threshold = 100.0;
    spawn.fire_interval = FireInterval::Every(1);
    engine.spawn_test_enemy(spawn);
    engine.tick();
    let snap = engine.tick();

    let launched = orbs_launched(&snap.events);
    assert_eq!(launched.len(), 1);
    let mut found = false;
    for (_, (id, projectile, motion)) in engine
        .world()
        .query::<(&EntityId, &Projectile, &Motion)>()
        .iter()
    {
        if *id == launched[0].0 {
            found = true;
            assert!(!projectile.inactive);
            assert_eq!(motion.speed, 6.0);
        }
    }
    assert!(found);
}

#[test]
fn test_emp_overlay_expires_but_effects_persist() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    let enemy = engine.spawn_test_enemy(test_enemy(Vec2::new(200.0, 300.0), 3));
    engine.queue_command(PlayerCommand::Activate {
        ability: AbilityId::Emp,
    });
    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(count::<&EmpRecord>(engine.world()), 0);
    assert!(engine.world().get::<&Enemy>(enemy).unwrap().emp_disabled);
}

#[test]
fn test_neutralized_orb_is_harmless() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    engine.spawn_test_orb(Vec2::new(900.0, 400.0), Vec2::Y, 0.0, 10.0);
    engine.queue_command(PlayerCommand::Activate {
        ability: AbilityId::Emp,
    });

    let snap = engine.tick();
    assert_eq!(snap.player.lives, 3);
    assert_eq!(count::<&HostileShot>(engine.world()), 0);
}

#[test]
fn test_shield_absorbs_and_is_singleton() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    // Player faces right: shield centre (972, 400), 128 x 20.
    engine.spawn_test_orb(Vec2::new(1000.0, 400.0), Vec2::Y, 0.0, 10.0);
    engine.queue_command(PlayerCommand::Activate {
        ability: AbilityId::Shield,
    });

    let snap = engine.tick();
    assert_eq!(engine.score().balance(), 1950);
    assert_eq!(count::<&HostileShot>(engine.world()), 0);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::OrbAbsorbed { .. })));
    assert_eq!(snap.player.lives, 3);
    assert_eq!(snap.score.orbs_absorbed, 1);

    let shield = snap
        .entities
        .iter()
        .find(|e| e.kind == EntityKind::Effect(EffectKind::Shield))
        .unwrap();
    assert_eq!(shield.center, Vec2::new(972.0, 400.0));
    assert_eq!(shield.size, Vec2::new(128.0, 20.0));

    engine.queue_command(PlayerCommand::Activate {
        ability: AbilityId::Shield,
    });
    let snap = engine.tick();
    assert!(snap.events.contains(&SimEvent::AbilityRejected {
        ability: AbilityId::Shield,
        reason: RejectReason::AlreadyActive,
    }));
    assert_eq!(engine.score().balance(), 1950);
}

#[test]
fn test_ability_rejected_when_broke() {
    let tuning = Tuning {
        starting_score: 100,
        ..Default::default()
    };
    let mut engine = engine_with(tuning);
    engine.queue_command(PlayerCommand::Activate {
        ability: AbilityId::Gravity,
    });
    let snap = engine.tick();
    assert!(snap.events.contains(&SimEvent::AbilityRejected {
        ability: AbilityId::Gravity,
        reason: RejectReason::InsufficientFunds,
    }));
    assert_eq!(engine.score().balance(), 100);
}

#[test]
fn test_gravity_clears_hostiles_every_tick() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    engine.spawn_test_enemy(test_enemy(Vec2::new(300.0, 300.0), 50));
    engine.spawn_test_orb(Vec2::new(600.0, 300.0), Vec2::X, 0.0, 10.0);
    engine.queue_command(PlayerCommand::Activate {
        ability: AbilityId::Gravity,
    });

    engine.tick();
    assert_eq!(count::<&Enemy>(engine.world()), 0);
    assert_eq!(count::<&HostileShot>(engine.world()), 0);
    // The test enemy plus the enemy spawned this tick, both level 1.
    assert_eq!(engine.score().enemies_destroyed, 2);
    assert_eq!(engine.score().balance(), 1800 + 2 * 15 + 1);

    engine.spawn_test_enemy(test_enemy(Vec2::new(300.0, 300.0), 50));
    engine.tick();
    assert_eq!(count::<&Enemy>(engine.world()), 0);
    assert_eq!(engine.score().enemies_destroyed, 3);
}

#[test]
fn test_gravity_is_not_singleton() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    engine.queue_command(PlayerCommand::Activate {
        ability: AbilityId::Gravity,
    });
    engine.queue_command(PlayerCommand::Activate {
        ability: AbilityId::Gravity,
    });
    engine.tick();
    // Two gravity pulses, plus the enemy spawned this tick being cleared.
    assert_eq!(engine.score().balance(), 2000 - 400 + 15);
}

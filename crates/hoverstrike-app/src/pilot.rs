//! Built-in pilots that play the game from snapshots.

use clap::ValueEnum;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use hoverstrike_core::commands::{MoveMask, PlayerCommand};
use hoverstrike_core::config::Tuning;
use hoverstrike_core::enums::{AbilityId, EntityKind};
use hoverstrike_core::state::GameStateSnapshot;
use hoverstrike_core::types::Facing;

/// Chooses the commands for the next tick from the latest snapshot.
pub trait Pilot {
    fn name(&self) -> &'static str;
    fn next_commands(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PilotKind {
    /// Never touches the controls.
    Idle,
    /// Mashes random inputs.
    Random,
    /// Lines up under the nearest enemy and shoots upward.
    Hunter,
}

/// Build a pilot for a session running `tuning`. `seed` only matters for
/// pilots that roll dice.
pub fn build(kind: PilotKind, seed: u64, tuning: &Tuning) -> Box<dyn Pilot + Send> {
    match kind {
        PilotKind::Idle => Box::new(IdlePilot),
        PilotKind::Random => Box::new(RandomPilot::new(seed)),
        PilotKind::Hunter => Box::new(HunterPilot::new(tuning.emp_cost)),
    }
}

pub struct IdlePilot;

impl Pilot for IdlePilot {
    fn name(&self) -> &'static str {
        "idle"
    }

    fn next_commands(&mut self, _snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        Vec::new()
    }
}

pub struct RandomPilot {
    rng: ChaCha8Rng,
}

impl RandomPilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Pilot for RandomPilot {
    fn name(&self) -> &'static str {
        "random"
    }

    fn next_commands(&mut self, _snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        let mut commands = vec![PlayerCommand::Move {
            mask: self.rng.gen_range(0..16),
        }];
        match self.rng.gen_range(0..100) {
            0..=39 => commands.push(PlayerCommand::Fire),
            40..=49 => commands.push(PlayerCommand::FireSpread),
            50 => commands.push(PlayerCommand::Activate {
                ability: AbilityId::Emp,
            }),
            51 => commands.push(PlayerCommand::Activate {
                ability: AbilityId::Shield,
            }),
            52 => commands.push(PlayerCommand::Activate {
                ability: AbilityId::Skill,
            }),
            _ => {}
        }
        commands
    }
}

/// Horizontal distance within which the hunter considers itself lined up.
const ALIGN_TOLERANCE: f32 = 20.0;
/// Orbs closer than this trigger an EMP when affordable.
const DANGER_RADIUS: f32 = 120.0;

pub struct HunterPilot {
    emp_cost: u64,
}

impl HunterPilot {
    /// `emp_cost` is the session's EMP price; the pilot only casts what it can afford.
    pub fn new(emp_cost: u64) -> Self {
        Self { emp_cost }
    }
}

impl Pilot for HunterPilot {
    fn name(&self) -> &'static str {
        "hunter"
    }

    fn next_commands(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        let me = &snapshot.player;
        let mut commands = Vec::new();

        let threatened = snapshot.entities.iter().any(|e| {
            e.kind == EntityKind::Orb && e.center.distance(me.center) < DANGER_RADIUS
        });
        if threatened && snapshot.score.balance >= self.emp_cost {
            commands.push(PlayerCommand::Activate {
                ability: AbilityId::Emp,
            });
        }
        if me.lives == 1 && me.skill_charges > 0 && !me.invincible {
            commands.push(PlayerCommand::Activate {
                ability: AbilityId::Skill,
            });
        }

        let Some(target) = nearest_enemy(snapshot, me.center) else {
            return commands;
        };
        let dx = target.x - me.center.x;
        if dx.abs() > ALIGN_TOLERANCE {
            let mask = if dx > 0.0 { MoveMask::RIGHT } else { MoveMask::LEFT };
            commands.push(PlayerCommand::Move { mask });
        } else if me.facing != Facing::UP.index() {
            commands.push(PlayerCommand::Move { mask: MoveMask::UP });
        } else {
            commands.push(PlayerCommand::Fire);
        }
        commands
    }
}

fn nearest_enemy(snapshot: &GameStateSnapshot, from: Vec2) -> Option<Vec2> {
    snapshot
        .entities
        .iter()
        .filter(|e| e.kind == EntityKind::Enemy)
        .map(|e| e.center)
        .min_by(|a, b| (a.x - from.x).abs().total_cmp(&(b.x - from.x).abs()))
}

//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use hoverstrike_core::commands::PlayerCommand;
use hoverstrike_core::components::Player;
use hoverstrike_core::config::Tuning;
use hoverstrike_core::enums::{AbilityId, GamePhase};
use hoverstrike_core::error::ConfigError;
use hoverstrike_core::events::{RejectReason, SimEvent};
use hoverstrike_core::state::GameStateSnapshot;
use hoverstrike_core::types::SimTime;

use crate::score::ScoreLedger;
use crate::systems;
use crate::systems::collision::{CollisionContext, CollisionReport};
use crate::world_setup::{self, IdAllocator};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub tuning: Tuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tuning: Tuning::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    ids: IdAllocator,
    player: Entity,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
    ledger: ScoreLedger,
    tuning: Tuning,
    level: u32,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    ///
    /// The tuning is validated here as well as on load, so a `Tuning` built
    /// in code cannot reach the systems with an empty range or a zero period.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let SimConfig { seed, tuning } = config;
        tuning.validate()?;
        let mut world = World::new();
        let mut ids = IdAllocator::default();
        let player = world_setup::spawn_player(&mut world, &mut ids, &tuning);

        Ok(Self {
            world,
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            ids,
            player,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            ledger: ScoreLedger::new(tuning.starting_score),
            level: tuning.level_at(0),
            tuning,
        })
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Playing {
            self.run_systems();
            self.time.advance();
            self.check_game_over();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            self.player,
            &self.time,
            self.phase,
            self.level,
            events,
            &self.ledger,
            self.tuning.flash_toggle_ticks,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Current difficulty level.
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> &ScoreLedger {
        &self.ledger
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// The player's entity handle.
    pub fn player(&self) -> Entity {
        self.player
    }

    /// Place an enemy directly (for tests).
    #[cfg(test)]
    pub fn spawn_test_enemy(&mut self, spawn: world_setup::EnemySpawn) -> Entity {
        world_setup::spawn_enemy(&mut self.world, &mut self.ids, &self.tuning, spawn).0
    }

    /// Place a friendly beam directly (for tests).
    #[cfg(test)]
    pub fn spawn_test_beam(&mut self, center: glam::Vec2, direction: glam::Vec2) {
        world_setup::spawn_beam(&mut self.world, &mut self.ids, &self.tuning, center, direction);
    }

    /// Place a hostile orb directly (for tests).
    #[cfg(test)]
    pub fn spawn_test_orb(
        &mut self,
        center: glam::Vec2,
        direction: glam::Vec2,
        speed: f32,
        radius: f32,
    ) -> hoverstrike_core::types::EntityId {
        world_setup::spawn_orb(&mut self.world, &mut self.ids, center, direction, speed, radius)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command. Gameplay commands are ignored unless playing.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Playing {
                    self.phase = GamePhase::Paused;
                    log::info!("paused at tick {}", self.time.tick);
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Playing;
                    log::info!("resumed at tick {}", self.time.tick);
                }
            }
            _ if self.phase != GamePhase::Playing => {}
            PlayerCommand::Move { mask } => {
                if let Ok(mut player) = self.world.get::<&mut Player>(self.player) {
                    player.move_mask = mask;
                }
            }
            PlayerCommand::Fire => {
                systems::fire_control::try_fire(
                    &mut self.world,
                    &mut self.ids,
                    &self.tuning,
                    self.player,
                    false,
                    &mut self.events,
                );
            }
            PlayerCommand::FireSpread => {
                systems::fire_control::try_fire(
                    &mut self.world,
                    &mut self.ids,
                    &self.tuning,
                    self.player,
                    true,
                    &mut self.events,
                );
            }
            PlayerCommand::Activate { ability } => self.activate(ability),
        }
    }

    fn activate(&mut self, ability: AbilityId) {
        let result = systems::abilities::activate(
            &mut self.world,
            &mut self.ids,
            &mut self.ledger,
            &self.tuning,
            self.player,
            ability,
        );
        match result {
            Ok(()) => {
                log::debug!("tick {}: {ability:?} activated", self.time.tick);
                self.events.push(SimEvent::AbilityActivated { ability });
            }
            Err(err) => {
                log::debug!("tick {}: {ability:?} rejected: {err}", self.time.tick);
                self.events.push(SimEvent::AbilityRejected {
                    ability,
                    reason: RejectReason::from(&err),
                });
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let tick = self.time.tick;

        // 1. Difficulty
        let level = self.tuning.level_at(tick);
        if level != self.level {
            self.level = level;
            log::info!("tick {tick}: level {level}");
            self.events.push(SimEvent::LevelUp { level });
        }
        // 2. Enemy spawns and enemy fire
        systems::spawner::run(
            &mut self.world,
            &mut self.ids,
            &mut self.rng,
            &self.tuning,
            tick,
            self.level,
            &mut self.events,
        );
        // 3. Collision resolution
        let report = systems::collision::run(&mut CollisionContext {
            world: &mut self.world,
            ids: &mut self.ids,
            ledger: &mut self.ledger,
            tuning: &self.tuning,
            player: self.player,
            events: &mut self.events,
        });
        if report != CollisionReport::default() {
            log::trace!("tick {tick}: {report:?}");
        }
        self.ledger.orbs_absorbed += report.orbs_absorbed;
        // 4. Enemy FSM, then movement
        systems::enemy_ai::run(&mut self.world);
        systems::movement::run(&mut self.world);
        systems::movement::move_player(&mut self.world);
        // 5. Timers
        systems::fire_control::recharge(&mut self.world);
        systems::abilities::tick_boost(&mut self.world);
        systems::cleanup::tick_lifetimes(&mut self.world);
        // 6. Cleanup (out of bounds, expired)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }

    /// Lives at zero ends the session exactly once.
    fn check_game_over(&mut self) {
        let lives = self
            .world
            .get::<&Player>(self.player)
            .map(|p| p.lives)
            .unwrap_or(0);
        if lives == 0 {
            self.phase = GamePhase::GameOver;
            let score = self.ledger.balance();
            log::info!("game over at tick {} with score {score}", self.time.tick);
            self.events.push(SimEvent::GameOver { score });
        }
    }
}

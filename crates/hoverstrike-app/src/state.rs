//! State shared between the runner's main thread and the game loop thread.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use hoverstrike_core::commands::PlayerCommand;
use hoverstrike_core::enums::GamePhase;
use hoverstrike_core::state::GameStateSnapshot;

/// Commands sent from the main thread to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot, updated by the game loop after each tick.
pub type SharedSnapshot = Arc<Mutex<Option<GameStateSnapshot>>>;

/// End-of-session report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub ticks: u64,
    pub phase: GamePhase,
    pub level: u32,
    pub score: u64,
    pub lives: u32,
    pub enemies_destroyed: u32,
    pub orbs_destroyed: u32,
    pub hits_landed: u32,
    pub orbs_absorbed: u32,
}

impl SessionSummary {
    pub fn from_snapshot(snapshot: &GameStateSnapshot) -> Self {
        Self {
            ticks: snapshot.time.tick,
            phase: snapshot.phase,
            level: snapshot.level,
            score: snapshot.score.balance,
            lives: snapshot.player.lives,
            enemies_destroyed: snapshot.score.enemies_destroyed,
            orbs_destroyed: snapshot.score.orbs_destroyed,
            hits_landed: snapshot.score.hits_landed,
            orbs_absorbed: snapshot.score.orbs_absorbed,
        }
    }
}

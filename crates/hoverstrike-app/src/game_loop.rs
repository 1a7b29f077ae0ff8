//! Game loop thread. Runs the simulation engine at 50Hz and publishes snapshots.
//!
//! The engine is moved into this thread and owned there. Commands arrive via
//! `mpsc` channel; the pilot adds its own each tick. The latest snapshot is
//! stored in shared state for polling.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use hoverstrike_core::constants::TICK_RATE;
use hoverstrike_core::enums::GamePhase;
use hoverstrike_core::state::GameStateSnapshot;
use hoverstrike_sim::engine::SimulationEngine;

use crate::pilot::Pilot;
use crate::state::{GameLoopCommand, SessionSummary, SharedSnapshot};

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// How the loop spaces its ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// One tick per `TICK_DURATION` of wall time.
    RealTime,
    /// As fast as the machine allows.
    Unpaced,
}

/// When the loop stops on its own.
#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    /// Stop after this many ticks; `None` runs until game over or shutdown.
    pub max_ticks: Option<u64>,
    pub pacing: Pacing,
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and a handle yielding the final snapshot.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    pilot: Box<dyn Pilot + Send>,
    options: LoopOptions,
    latest_snapshot: SharedSnapshot,
) -> std::io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<GameStateSnapshot>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("hoverstrike-game-loop".into())
        .spawn(move || run_game_loop(engine, pilot, options, cmd_rx, &latest_snapshot))?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until game over, the tick limit, a Shutdown command or
/// channel disconnect, and returns the last snapshot.
pub fn run_game_loop(
    mut engine: SimulationEngine,
    mut pilot: Box<dyn Pilot + Send>,
    options: LoopOptions,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &std::sync::Mutex<Option<GameStateSnapshot>>,
) -> GameStateSnapshot {
    let mut snapshot = GameStateSnapshot::default();
    let mut next_tick_time = Instant::now();
    let mut external_input = true;
    log::info!("game loop started with {} pilot", pilot.name());

    loop {
        // 1. Drain all pending commands
        while external_input {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => {
                    log::info!("shutdown requested at tick {}", engine.time().tick);
                    return snapshot;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                // A closed channel only ends external input; the pilot keeps flying.
                Err(mpsc::TryRecvError::Disconnected) => external_input = false,
            }
        }

        // 2. Pilot input, then advance one tick
        engine.queue_commands(pilot.next_commands(&snapshot));
        snapshot = engine.tick();

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot.clone());
        }

        // 4. Stop conditions
        if snapshot.phase == GamePhase::GameOver {
            let summary = SessionSummary::from_snapshot(&snapshot);
            log::info!("session over: {summary:?}");
            return snapshot;
        }
        if options.max_ticks.is_some_and(|max| snapshot.time.tick >= max) {
            log::info!("tick limit reached at {}", snapshot.time.tick);
            return snapshot;
        }

        // 5. Sleep until next tick
        if options.pacing == Pacing::RealTime {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind, reset to avoid a catch-up spiral
                log::debug!("game loop fell behind, resetting schedule");
                next_tick_time = now;
            }
        }
    }
}

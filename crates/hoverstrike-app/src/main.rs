//! Hoverstrike runner: plays a session headlessly and reports the outcome.

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use hoverstrike_app::game_loop::{self, LoopOptions, Pacing};
use hoverstrike_app::pilot::{self, PilotKind};
use hoverstrike_app::state::{GameLoopCommand, SessionSummary, SharedSnapshot};
use hoverstrike_core::commands::PlayerCommand;
use hoverstrike_core::config::Tuning;
use hoverstrike_sim::{SimConfig, SimulationEngine};

#[derive(Parser, Debug)]
#[command(name = "hoverstrike")]
#[command(about = "Run a headless Hoverstrike session")]
struct Args {
    /// RNG seed; the same seed and inputs replay the same session
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Stop after this many ticks (default: play until game over)
    #[arg(long)]
    ticks: Option<u64>,

    /// JSON tuning file overriding the default balance
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run unpaced instead of at 50 ticks per second
    #[arg(long)]
    fast: bool,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Built-in pilot
    #[arg(long, value_enum, default_value_t = PilotKind::Hunter)]
    pilot: PilotKind,

    /// Also read newline-delimited JSON player commands from stdin
    #[arg(long)]
    stdin: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let tuning = match &args.config {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    if args.ticks.is_none() && args.pilot == PilotKind::Idle && !args.stdin {
        log::warn!("idle pilot without a tick limit runs until the player is shot down");
    }

    let pilot = pilot::build(args.pilot, args.seed, &tuning);
    let engine = SimulationEngine::new(SimConfig {
        seed: args.seed,
        tuning,
    })
    .context("starting the simulation")?;
    let options = LoopOptions {
        max_ticks: args.ticks,
        pacing: if args.fast {
            Pacing::Unpaced
        } else {
            Pacing::RealTime
        },
    };
    let latest: SharedSnapshot = Arc::new(Mutex::new(None));
    let (cmd_tx, handle) = game_loop::spawn_game_loop(
        engine,
        pilot,
        options,
        latest.clone(),
    )
    .context("spawning game loop thread")?;

    if args.stdin {
        forward_stdin(&cmd_tx)?;
    }
    drop(cmd_tx);

    let last = match handle.join() {
        Ok(last) => last,
        Err(_) => {
            // Report whatever the loop published before it died.
            let published = latest.lock().ok().and_then(|lock| lock.clone());
            published.ok_or_else(|| anyhow!("game loop thread panicked before the first tick"))?
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&last)?);
    } else {
        let summary = SessionSummary::from_snapshot(&last);
        println!("{}", serde_json::to_string(&summary)?);
    }
    Ok(())
}

/// Forward commands typed on stdin until EOF or the loop goes away.
fn forward_stdin(cmd_tx: &std::sync::mpsc::Sender<GameLoopCommand>) -> Result<()> {
    for line in std::io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" {
            let _ = cmd_tx.send(GameLoopCommand::Shutdown);
            break;
        }
        let command: PlayerCommand = match serde_json::from_str(line) {
            Ok(command) => command,
            Err(err) => {
                log::warn!("ignoring malformed command {line:?}: {err}");
                continue;
            }
        };
        if cmd_tx.send(GameLoopCommand::PlayerCommand(command)).is_err() {
            break;
        }
    }
    Ok(())
}

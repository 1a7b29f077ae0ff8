//! Hoverstrike headless runner.
//!
//! Drives the simulation engine on its own thread at a fixed tick rate,
//! feeding it commands from a built-in pilot or from stdin.

pub mod game_loop;
pub mod pilot;
pub mod state;

pub use hoverstrike_core as core;

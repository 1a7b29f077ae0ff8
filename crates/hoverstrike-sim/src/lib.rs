//! Simulation engine for Hoverstrike.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for the renderer.

pub mod engine;
pub mod score;
pub mod systems;
pub mod targeting;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use hoverstrike_core as core;

#[cfg(test)]
mod tests;

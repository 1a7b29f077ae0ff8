//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::AbilityId;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Directions held this tick; see [`MoveMask`].
    Move { mask: u8 },
    /// Fire a single beam along the current facing.
    Fire,
    /// Fire a fan of beams around the current facing.
    FireSpread,
    /// Activate an ability.
    Activate { ability: AbilityId },
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
}

/// Bit layout for `PlayerCommand::Move`.
pub struct MoveMask;

impl MoveMask {
    pub const UP: u8 = 1;
    pub const DOWN: u8 = 2;
    pub const LEFT: u8 = 4;
    pub const RIGHT: u8 = 8;

    /// Sum of the unit steps for every set bit, as `(dx, dy)` with y down.
    pub fn steps(mask: u8) -> (i32, i32) {
        let mut dx = 0;
        let mut dy = 0;
        if mask & Self::UP != 0 {
            dy -= 1;
        }
        if mask & Self::DOWN != 0 {
            dy += 1;
        }
        if mask & Self::LEFT != 0 {
            dx -= 1;
        }
        if mask & Self::RIGHT != 0 {
            dx += 1;
        }
        (dx, dy)
    }
}

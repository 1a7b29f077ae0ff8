//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::error::AbilityError;
use crate::types::EntityId;

/// Something noteworthy that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    EnemySpawned { id: EntityId, level: u32 },
    /// Beams landed but the enemy survived.
    EnemyHit { id: EntityId, hits: u32, hit_points: i32 },
    EnemyDestroyed { id: EntityId, bonus: u64 },
    OrbLaunched { id: EntityId, by: EntityId },
    OrbDestroyed { id: EntityId },
    /// The shield absorbed an orb.
    OrbAbsorbed { id: EntityId },
    PlayerHit { lives: u32 },
    ShotFired { beams: u32 },
    AbilityActivated { ability: AbilityId },
    AbilityRejected { ability: AbilityId, reason: RejectReason },
    LevelUp { level: u32 },
    GameOver { score: u64 },
}

/// Serializable mirror of [`AbilityError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    InsufficientFunds,
    NoChargesRemaining,
    AlreadyActive,
}

impl From<&AbilityError> for RejectReason {
    fn from(err: &AbilityError) -> Self {
        match err {
            AbilityError::InsufficientFunds { .. } => RejectReason::InsufficientFunds,
            AbilityError::NoChargesRemaining => RejectReason::NoChargesRemaining,
            AbilityError::AlreadyActive(_) => RejectReason::AlreadyActive,
        }
    }
}

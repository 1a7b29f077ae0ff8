//! Game state snapshot: the complete visible state handed to the renderer each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{EntityId, SimTime};

/// Complete render-ready state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub level: u32,
    pub player: PlayerView,
    /// Every live entity other than the player, ascending by id.
    pub entities: Vec<EntityView>,
    pub events: Vec<SimEvent>,
    pub score: ScoreView,
}

/// One drawable entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub center: Vec2,
    pub size: Vec2,
    pub visual: VisualState,
}

/// Which sprite/frame the renderer should pick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum VisualState {
    #[default]
    Plain,
    /// Two-frame animation index.
    Frame(u8),
    /// Overlay drawn half transparent.
    Translucent(bool),
    /// Catalog variant (enemy sprites).
    Variant(u8),
    /// Direction of travel in degrees (beams, shields).
    Angle(f32),
}

/// Player status for the HUD and sprite.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: EntityId,
    pub center: Vec2,
    pub size: Vec2,
    pub facing: u8,
    pub lives: u32,
    pub invincible: bool,
    pub fire_interval: u32,
    pub skill_charges: u32,
}

/// Running score for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub balance: u64,
    pub enemies_destroyed: u32,
    pub orbs_destroyed: u32,
    pub hits_landed: u32,
    pub orbs_absorbed: u32,
}

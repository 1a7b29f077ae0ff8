//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy behaviour state. Descending is initial, Hovering is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    /// Moving straight down; cannot fire.
    #[default]
    Descending,
    /// Stopped at the hover threshold; fire-capable.
    Hovering,
}

/// How often an enemy may launch an orb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireInterval {
    /// Fires on ticks that are a multiple of the interval.
    Every(u32),
    /// Never fires (EMP-disabled).
    Never,
}

/// Which side fired a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

/// Player-activated abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityId {
    /// Charge-limited invincibility and rapid fire.
    Skill,
    /// Permanently neutralizes currently live enemies and orbs.
    Emp,
    /// Directional barrier that absorbs orbs.
    Shield,
    /// Full-screen field that clears every enemy and orb while alive.
    Gravity,
}

/// Timed effect entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    Emp,
    Shield,
    Gravity,
    /// Cosmetic overlay shown while the skill kicks in.
    Flash,
}

/// Explosion flavour; decides lifetime and catalog size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionSize {
    /// Enemy destroyed.
    Full,
    /// Orb intercepted, absorbed, or shrugged off.
    Small,
}

/// Entity category exposed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy,
    Beam,
    Orb,
    Explosion,
    Effect(EffectKind),
}

/// Session phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Playing,
    Paused,
    /// Player lives reached zero. Terminal.
    GameOver,
}

/// How collisions convert into score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoringPolicy {
    /// Every beam that lands is credited, plus the kill bonus.
    #[default]
    PerHitAndKillBonus,
    /// Only kills are credited.
    KillOnly,
}

impl FireInterval {
    /// Whether an enemy with this interval launches on `tick`.
    pub fn fires_on(&self, tick: u64) -> bool {
        match *self {
            FireInterval::Every(n) if n > 0 => tick % n as u64 == 0,
            _ => false,
        }
    }
}

impl AbilityId {
    /// Singleton abilities may have at most one live effect.
    pub fn is_singleton(&self) -> bool {
        matches!(self, AbilityId::Emp | AbilityId::Shield)
    }

    /// Effect entity spawned on activation, if any.
    pub fn effect_kind(&self) -> EffectKind {
        match self {
            AbilityId::Skill => EffectKind::Flash,
            AbilityId::Emp => EffectKind::Emp,
            AbilityId::Shield => EffectKind::Shield,
            AbilityId::Gravity => EffectKind::Gravity,
        }
    }
}

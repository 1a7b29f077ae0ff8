//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{TICK_RATE, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};

/// Stable entity identifier. Allocated monotonically, never reused in a session.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EntityId(pub u32);

/// Centre of an entity in viewport pixels (x right, y down).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub center: Vec2,
}

/// Axis-aligned collision box size, centred on the entity position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    pub size: Vec2,
}

/// Constant-velocity motion: `direction` is a unit vector (or zero).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub direction: Vec2,
    pub speed: f32,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

/// One of the eight compass facings, stored as a step on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facing {
    pub dx: i8,
    pub dy: i8,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            center: Vec2::new(x, y),
        }
    }
}

impl Hitbox {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Box placed at `pos`.
    pub fn at(&self, pos: &Position) -> Aabb {
        Aabb::from_center_size(pos.center, self.size)
    }
}

impl Motion {
    pub fn new(direction: Vec2, speed: f32) -> Self {
        Self { direction, speed }
    }

    pub fn stationary() -> Self {
        Self::default()
    }

    /// Displacement applied in one tick.
    pub fn step(&self) -> Vec2 {
        self.direction * self.speed
    }
}

impl Aabb {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// The whole viewport.
    pub fn viewport() -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict intersection: touching edges do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// True when every edge of `self` lies within `outer`.
    pub fn inside(&self, outer: &Aabb) -> bool {
        self.min.x >= outer.min.x
            && self.min.y >= outer.min.y
            && self.max.x <= outer.max.x
            && self.max.y <= outer.max.y
    }
}

impl Default for Facing {
    /// The player starts facing right.
    fn default() -> Self {
        Self::RIGHT
    }
}

impl Facing {
    pub const RIGHT: Facing = Facing { dx: 1, dy: 0 };
    pub const UP: Facing = Facing { dx: 0, dy: -1 };
    pub const LEFT: Facing = Facing { dx: -1, dy: 0 };
    pub const DOWN: Facing = Facing { dx: 0, dy: 1 };

    /// Build a facing from per-axis steps. `None` for the zero step.
    pub fn from_steps(dx: i32, dy: i32) -> Option<Self> {
        let dx = dx.signum() as i8;
        let dy = dy.signum() as i8;
        if dx == 0 && dy == 0 {
            None
        } else {
            Some(Self { dx, dy })
        }
    }

    /// Unit vector in viewport coordinates.
    pub fn unit(&self) -> Vec2 {
        Vec2::new(self.dx as f32, self.dy as f32).normalize_or_zero()
    }

    /// Counter-clockwise angle from +x in degrees, with screen y pointing down.
    pub fn angle_deg(&self) -> f32 {
        (-(self.dy as f32)).atan2(self.dx as f32).to_degrees()
    }

    /// Sprite index 0..8, counter-clockwise starting at RIGHT.
    pub fn index(&self) -> u8 {
        let deg = self.angle_deg().rem_euclid(360.0);
        ((deg / 45.0).round() as u8) % 8
    }
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        1.0 / TICK_RATE as f64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

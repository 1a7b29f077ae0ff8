//! Aiming and orientation math.
//!
//! Viewport coordinates: x grows right, y grows down. Angles are measured
//! counter-clockwise from +x as seen on screen, in degrees.

use glam::Vec2;

use hoverstrike_core::error::TargetingError;

/// Unit vector from `from` towards `to`.
pub fn aim(from: Vec2, to: Vec2) -> Result<Vec2, TargetingError> {
    let delta = to - from;
    let length = delta.length();
    if length < f32::EPSILON {
        return Err(TargetingError::DegenerateGeometry);
    }
    Ok(delta / length)
}

/// Screen-space unit vector for an angle in degrees.
pub fn direction_from_deg(deg: f32) -> Vec2 {
    let rad = deg.to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}

/// Screen-space angle of a direction vector, in degrees.
pub fn angle_deg(direction: Vec2) -> f32 {
    (-direction.y).atan2(direction.x).to_degrees()
}

/// Axis-aligned extent of a `length` x `thickness` bar rotated to `direction`.
pub fn rotated_extent(length: f32, thickness: f32, direction: Vec2) -> Vec2 {
    let c = direction.x.abs();
    let s = direction.y.abs();
    Vec2::new(length * c + thickness * s, length * s + thickness * c)
}

/// `count` directions evenly spread across `center_deg ± half_angle_deg`.
/// A single beam flies straight along `center_deg`.
pub fn fan_directions(center_deg: f32, count: u32, half_angle_deg: f32) -> Vec<Vec2> {
    if count <= 1 {
        return vec![direction_from_deg(center_deg)];
    }
    let step = 2.0 * half_angle_deg / (count - 1) as f32;
    (0..count)
        .map(|i| direction_from_deg(center_deg - half_angle_deg + step * i as f32))
        .collect()
}

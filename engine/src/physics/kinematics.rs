//! Kinematics helpers
//!
//! Small pure functions for the motion rules every entity kind shares.

use glam::Vec3;

/// Move `position` along y by `speed * delta` (negative speed moves down).
#[inline]
pub fn advance_along_y(position: &mut Vec3, speed: f32, delta: f32) {
    position.y += speed * delta;
}

/// Clamp a single coordinate into `[-bound, bound]`.
#[inline]
pub fn clamp_axis(value: f32, bound: f32) -> f32 {
    value.clamp(-bound, bound)
}

/// Sideways sway driven by an absolute time base.
///
/// Returns the x displacement for this frame: `sin(time_seconds) * delta * amplitude`.
/// The time base is an absolute clock reading, not accumulated frame time.
#[inline]
pub fn oscillate_x(time_seconds: f64, delta: f32, amplitude: f32) -> f32 {
    (time_seconds.sin() as f32) * delta * amplitude
}

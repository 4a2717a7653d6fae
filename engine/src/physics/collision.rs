//! Collision detection module
//!
//! Proximity tests used by the shooter. Every pair type is resolved by the
//! Euclidean distance between entity origins against a fixed threshold; at
//! the entity counts of a single arcade screen no broad phase is needed.
//!
//! # Example
//!
//! ```ignore
//! use laser_strike_engine::physics::collision::{first_within, within_radius};
//! use glam::Vec3;
//!
//! let laser = Vec3::new(0.0, 7.5, 0.0);
//! let enemy = Vec3::new(0.2, 8.0, 0.0);
//! assert!(within_radius(laser, enemy, 0.8));
//! assert_eq!(first_within(laser, 0.8, [(7u32, enemy)]), Some(7));
//! ```

use glam::Vec3;

/// Returns `true` when `a` and `b` are strictly closer than `threshold`.
///
/// Compares squared lengths, so a point exactly on the threshold is a miss.
#[inline]
pub fn within_radius(a: Vec3, b: Vec3, threshold: f32) -> bool {
    a.distance_squared(b) < threshold * threshold
}

/// Key of the first candidate (in iteration order) within `threshold` of `point`.
///
/// Iteration order decides ties, mirroring how the frame resolves hits in
/// collection order rather than by nearest distance.
pub fn first_within<K, I>(point: Vec3, threshold: f32, candidates: I) -> Option<K>
where
    I: IntoIterator<Item = (K, Vec3)>,
{
    candidates
        .into_iter()
        .find_map(|(key, position)| within_radius(point, position, threshold).then_some(key))
}

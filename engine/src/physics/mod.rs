//! Physics module
//!
//! Kinematics and proximity primitives for the shooter. Nothing here knows
//! about game rules; the game systems compose these pieces.
//!
//! # Unit System
//!
//! **1 unit = 1 screen unit**; the play volume spans roughly x in [-8, 8]
//! and y in [-10, 15].
//!
//! - Distances in units
//! - Velocities in units/s
//! - Time in seconds
//!
//! # Submodules
//!
//! - [`types`] - Core mathematical types (Vec3) re-exported from glam
//! - [`collision`] - Distance-threshold proximity tests
//! - [`kinematics`] - Straight-line and clamped motion helpers

pub mod collision;
pub mod kinematics;
pub mod types;

// Re-export commonly used types at the physics module level
pub use collision::{first_within, within_radius};
pub use kinematics::{advance_along_y, clamp_axis, oscillate_x};
pub use types::Vec3;

//! Game systems: self-contained passes that each own one slice of the frame.

pub mod collision_system;
pub mod movement_system;
pub mod spawn_system;
pub mod weapon_system;

pub use collision_system::{CollisionOutcome, CollisionSystem};
pub use movement_system::{CullReport, MovementSystem};
pub use spawn_system::{SpawnDirector, spawn_interval};
pub use weapon_system::WeaponSystem;

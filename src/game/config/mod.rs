//! Config Module
//!
//! Centralized configuration for every gameplay tunable: flight, weapons,
//! spawn pacing, the boss encounter, collision radii, scoring, and effects.

pub mod error;
pub mod game_config;

pub use error::ConfigError;
pub use game_config::{
    BossConfig, CollisionConfig, EnemyConfig, ExplosionConfig, GameConfig, LaserConfig,
    PlayerConfig, ScoringConfig, SpawnConfig,
};

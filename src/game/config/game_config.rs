//! Game Configuration
//!
//! Every constant the simulation uses lives here. `Default` reproduces the
//! arcade tuning; a JSON file may override any subset of fields.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::error::{ConfigError, Result};

/// Player craft flight and weapon tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Where the craft is placed on start/reset (y and z never change)
    pub spawn_position: Vec3,
    /// Sideways speed while a move key is held (units/s)
    pub speed: f32,
    /// Craft x is clamped to `[-x_bound, x_bound]`
    pub x_bound: f32,
    /// Bank angle per unit of x: `rotation.z = -x * tilt_factor`
    pub tilt_factor: f32,
    /// Starting and maximum health
    pub max_health: u32,
    /// Laser spawn offset from the craft origin
    pub muzzle_offset: Vec3,
    /// Minimum wall-clock gap between two shots (seconds)
    pub fire_cooldown: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn_position: Vec3::new(0.0, -3.0, 0.0),
            speed: 8.0,
            x_bound: 8.0,
            tilt_factor: 0.05,
            max_health: 100,
            muzzle_offset: Vec3::new(0.8, 0.0, 0.0),
            fire_cooldown: 0.2,
        }
    }
}

/// Regular enemy fighter tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Spawn altitude
    pub spawn_altitude: f32,
    /// Spawn x is uniform in `[-spawn_half_width, spawn_half_width)`
    pub spawn_half_width: f32,
    /// Spawn z jitter is uniform in `[-spawn_half_depth, spawn_half_depth)`
    pub spawn_half_depth: f32,
    /// Descent speed (units/s)
    pub descent_speed: f32,
    /// Cosmetic spin around y (rad/s)
    pub spin_speed: f32,
    /// First shot timer is uniform in `[0, initial_shot_delay_max)`
    pub initial_shot_delay_max: f32,
    /// Re-fire timer is uniform in `[refire_min, refire_max)`
    pub refire_min: f32,
    pub refire_max: f32,
    /// Enemies only fire while `firing_band_low < y < firing_band_high`
    pub firing_band_low: f32,
    pub firing_band_high: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            spawn_altitude: 8.0,
            spawn_half_width: 7.5,
            spawn_half_depth: 1.5,
            descent_speed: 2.0,
            spin_speed: 1.0,
            initial_shot_delay_max: 3.0,
            refire_min: 2.0,
            refire_max: 4.0,
            firing_band_low: -5.0,
            firing_band_high: 5.0,
        }
    }
}

/// Enemy spawn pacing.
///
/// `interval(kills) = max(min_interval, base_interval - kills * interval_step_per_kill)`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub base_interval: f32,
    pub interval_step_per_kill: f32,
    pub min_interval: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            base_interval: 0.8,
            interval_step_per_kill: 0.003,
            min_interval: 0.3,
        }
    }
}

/// Boss encounter tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    /// Kill count that summons the boss
    pub kill_threshold: u32,
    pub health: u32,
    pub spawn_position: Vec3,
    /// Descent speed until the hover altitude is reached (units/s)
    pub descent_speed: f32,
    /// Once `y <= hover_altitude` the boss switches to sideways sway for good
    pub hover_altitude: f32,
    /// Sway amplitude factor: `x += sin(wall_clock) * delta * sway_amplitude`
    pub sway_amplitude: f32,
    /// Cosmetic spin around y (rad/s)
    pub spin_speed: f32,
    /// Seconds between volleys
    pub fire_interval: f32,
    /// Horizontal spacing of the three-laser spread
    pub spread_spacing: f32,
    /// Lasers leave the boss this far below its origin
    pub muzzle_drop: f32,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            kill_threshold: 100,
            health: 10,
            spawn_position: Vec3::new(0.0, 8.0, 0.0),
            descent_speed: 1.0,
            hover_altitude: 3.0,
            sway_amplitude: 2.0,
            spin_speed: 0.2,
            fire_interval: 0.8,
            spread_spacing: 2.0,
            muzzle_drop: 2.0,
        }
    }
}

/// Laser speeds and the play volume that culls them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaserConfig {
    /// Player lasers travel +y at this speed (units/s)
    pub player_speed: f32,
    /// Enemy lasers travel -y at this speed (units/s)
    pub enemy_speed: f32,
    /// Player lasers are removed once `y > ceiling`
    pub ceiling: f32,
    /// Enemy lasers and enemies are removed once `y < floor`
    pub floor: f32,
}

impl Default for LaserConfig {
    fn default() -> Self {
        Self {
            player_speed: 20.0,
            enemy_speed: 15.0,
            ceiling: 15.0,
            floor: -10.0,
        }
    }
}

/// Hit radii per pair type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    pub enemy_laser_vs_player: f32,
    pub player_laser_vs_enemy: f32,
    /// Generous on purpose: the boss hull is much larger than its origin
    pub player_laser_vs_boss: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            enemy_laser_vs_player: 0.8,
            player_laser_vs_enemy: 0.8,
            player_laser_vs_boss: 4.0,
        }
    }
}

/// Damage and score awards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub enemy_laser_damage: u32,
    pub enemy_kill_score: u32,
    pub boss_hit_score: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            enemy_laser_damage: 10,
            enemy_kill_score: 100,
            boss_hit_score: 500,
        }
    }
}

/// Explosion particle effect tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionConfig {
    pub particle_count: usize,
    /// Per-axis particle displacement per frame is uniform in `[-spread, spread)`
    pub spread: f32,
    /// Particle life lost per second
    pub decay_rate: f32,
    /// The whole effect is removed once its age exceeds this (seconds)
    pub lifetime: f32,
    /// Delays of the follow-up blasts when the boss is destroyed (seconds)
    pub boss_death_delays: [f64; 2],
    /// Offsets of the follow-up blasts from the boss position
    pub boss_death_offsets: [Vec3; 2],
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        Self {
            particle_count: 30,
            spread: 0.15,
            decay_rate: 2.0,
            lifetime: 1.0,
            boss_death_delays: [0.2, 0.4],
            boss_death_offsets: [Vec3::new(1.0, 0.0, 0.0), Vec3::new(-1.0, 1.0, 0.0)],
        }
    }
}

/// Central configuration for a game session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub spawn: SpawnConfig,
    pub boss: BossConfig,
    pub lasers: LaserConfig,
    pub collision: CollisionConfig,
    pub scoring: ScoringConfig,
    pub explosion: ExplosionConfig,
    /// Fixed RNG seed for reproducible sessions; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Parse a JSON document; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Serialize to pretty JSON (for writing a starter config).
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builder-style seed override.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("player.speed", self.player.speed),
            ("player.x_bound", self.player.x_bound),
            ("enemy.descent_speed", self.enemy.descent_speed),
            ("spawn.base_interval", self.spawn.base_interval),
            ("spawn.min_interval", self.spawn.min_interval),
            ("boss.fire_interval", self.boss.fire_interval),
            ("lasers.player_speed", self.lasers.player_speed),
            ("lasers.enemy_speed", self.lasers.enemy_speed),
            ("collision.enemy_laser_vs_player", self.collision.enemy_laser_vs_player),
            ("collision.player_laser_vs_enemy", self.collision.player_laser_vs_enemy),
            ("collision.player_laser_vs_boss", self.collision.player_laser_vs_boss),
            ("explosion.lifetime", self.explosion.lifetime),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be > 0, got {value}")));
            }
        }

        if self.spawn.interval_step_per_kill < 0.0 {
            return Err(ConfigError::Invalid(
                "spawn.interval_step_per_kill must be >= 0".to_string(),
            ));
        }
        if self.spawn.min_interval > self.spawn.base_interval {
            return Err(ConfigError::Invalid(format!(
                "spawn.min_interval ({}) exceeds spawn.base_interval ({})",
                self.spawn.min_interval, self.spawn.base_interval
            )));
        }
        if self.enemy.refire_min > self.enemy.refire_max {
            return Err(ConfigError::Invalid(
                "enemy.refire_min exceeds enemy.refire_max".to_string(),
            ));
        }
        if self.enemy.firing_band_low >= self.enemy.firing_band_high {
            return Err(ConfigError::Invalid(
                "enemy firing band is empty".to_string(),
            ));
        }
        if self.lasers.floor >= self.lasers.ceiling {
            return Err(ConfigError::Invalid(
                "lasers.floor must be below lasers.ceiling".to_string(),
            ));
        }
        if self.player.max_health == 0 || self.boss.health == 0 {
            return Err(ConfigError::Invalid(
                "player.max_health and boss.health must be non-zero".to_string(),
            ));
        }
        if self.explosion.particle_count == 0 {
            return Err(ConfigError::Invalid(
                "explosion.particle_count must be non-zero".to_string(),
            ));
        }
        if self.player.fire_cooldown < 0.0 {
            return Err(ConfigError::Invalid(
                "player.fire_cooldown must be >= 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_arcade_tuning() {
        let config = GameConfig::default();
        assert_eq!(config.player.speed, 8.0);
        assert_eq!(config.player.x_bound, 8.0);
        assert_eq!(config.player.max_health, 100);
        assert_eq!(config.boss.kill_threshold, 100);
        assert_eq!(config.boss.health, 10);
        assert_eq!(config.collision.player_laser_vs_boss, 4.0);
        assert_eq!(config.explosion.particle_count, 30);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json_str(r#"{ "boss": { "kill_threshold": 5 }, "seed": 7 }"#)
            .unwrap();
        assert_eq!(config.boss.kill_threshold, 5);
        assert_eq!(config.boss.health, 10);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.player, PlayerConfig::default());
    }

    #[test]
    fn test_json_round_trip() {
        let config = GameConfig::default().with_seed(42);
        let json = config.to_json_string().unwrap();
        let parsed = GameConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_spawn_floor_rejected() {
        let err = GameConfig::from_json_str(r#"{ "spawn": { "min_interval": 2.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_zero_speed_rejected() {
        let mut config = GameConfig::default();
        config.player.speed = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_json() {
        let err = GameConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

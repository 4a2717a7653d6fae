//! Spawn director: decides when fighters appear and when the boss arrives.
//!
//! Fighters arrive on a countdown whose interval shrinks linearly with the
//! kill count down to a floor. Regular spawning is suspended for the whole
//! boss encounter. The boss is summoned once per session, the first time
//! the kill count reaches the threshold.

use glam::Vec3;
use rand::Rng;

use crate::game::config::{GameConfig, SpawnConfig};
use crate::game::entities::{Boss, Enemy, EntityId};
use crate::game::random::sample_range;
use crate::game::state::{GameState, GameStateMachine};
use crate::game::store::EntityStore;

/// Seconds between fighter spawns at a given kill count.
///
/// `max(min_interval, base_interval - kills * interval_step_per_kill)`;
/// non-increasing in `kills`.
pub fn spawn_interval(config: &SpawnConfig, kills: u32) -> f32 {
    (config.base_interval - kills as f32 * config.interval_step_per_kill).max(config.min_interval)
}

/// Owns the fighter spawn countdown.
#[derive(Debug, Clone, Default)]
pub struct SpawnDirector {
    /// Seconds until the next fighter; starts at zero so the first one
    /// appears on the first playing tick
    timer: f32,
}

impl SpawnDirector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds until the next fighter.
    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Zero the countdown for a new session.
    pub fn reset(&mut self) {
        self.timer = 0.0;
    }

    /// Count down by `elapsed` and spawn a fighter when the countdown runs out.
    ///
    /// Only runs while playing with no boss encounter in progress. After a
    /// spawn the countdown restarts at the interval for the current kill count.
    pub fn maybe_spawn_enemy<R: Rng + ?Sized>(
        &mut self,
        state: &GameState,
        elapsed: f32,
        config: &GameConfig,
        store: &mut EntityStore,
        rng: &mut R,
    ) -> Option<EntityId> {
        if !state.is_playing() || state.boss_active() || store.has_boss() {
            return None;
        }

        self.timer -= elapsed;
        if self.timer > 0.0 {
            return None;
        }
        self.timer = spawn_interval(&config.spawn, state.kills);

        let enemy_config = &config.enemy;
        let position = Vec3::new(
            sample_range(
                rng,
                -enemy_config.spawn_half_width,
                enemy_config.spawn_half_width,
            ),
            enemy_config.spawn_altitude,
            sample_range(
                rng,
                -enemy_config.spawn_half_depth,
                enemy_config.spawn_half_depth,
            ),
        );
        let shoot_timer = sample_range(rng, 0.0, enemy_config.initial_shot_delay_max);

        let id = store.add_enemy(Enemy::new(position, shoot_timer));
        tracing::debug!(%id, x = position.x, next_in = self.timer, "enemy spawned");
        Some(id)
    }

    /// Summon the boss if the kill count has earned it.
    ///
    /// Idempotent: once the boss exists or has been defeated, later calls do
    /// nothing.
    pub fn maybe_spawn_boss(
        &mut self,
        machine: &mut GameStateMachine,
        config: &GameConfig,
        store: &mut EntityStore,
    ) -> Option<EntityId> {
        if store.has_boss() || !machine.enter_boss_phase() {
            return None;
        }
        let id = store.add_boss(Boss::new(config.boss.spawn_position, config.boss.health))?;
        tracing::info!(%id, "boss spawned");
        Some(id)
    }
}

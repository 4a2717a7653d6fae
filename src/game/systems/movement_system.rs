//! Movement system: advances every entity kind by one frame.
//!
//! Each kind has its own rule:
//! - player: steered along x, clamped, bank angle derived from x
//! - fighters: constant descent plus cosmetic spin
//! - boss: descends to the hover altitude, then sways sideways for good
//! - lasers: straight line along y at their owner's speed
//! - explosion particles: fixed displacement per frame, life decays with time
//!
//! Entities that leave the play volume are removed here as well.

use crate::game::config::{BossConfig, EnemyConfig, ExplosionConfig, LaserConfig, PlayerConfig};
use crate::game::entities::{Boss, BossMovement, Player};
use crate::game::store::EntityStore;
use crate::input::{InputAction, InputSource};
use crate::physics::{advance_along_y, clamp_axis, oscillate_x};

/// Counts of entities culled for leaving the play volume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CullReport {
    pub enemies: usize,
    pub player_lasers: usize,
    pub enemy_lasers: usize,
}

/// Stateless per-kind motion rules.
pub struct MovementSystem;

impl MovementSystem {
    /// Steer the craft from input, clamp x, then recompute the bank angle.
    pub fn move_player(
        player: &mut Player,
        input: &dyn InputSource,
        config: &PlayerConfig,
        delta: f32,
    ) {
        if input.is_active(InputAction::MoveLeft) {
            player.position.x -= config.speed * delta;
        }
        if input.is_active(InputAction::MoveRight) {
            player.position.x += config.speed * delta;
        }
        player.position.x = clamp_axis(player.position.x, config.x_bound);
        player.tilt = -player.position.x * config.tilt_factor;
    }

    pub fn move_enemies(store: &mut EntityStore, config: &EnemyConfig, delta: f32) {
        for (_, enemy) in store.enemies.iter_mut() {
            advance_along_y(&mut enemy.position, -config.descent_speed, delta);
            enemy.spin += config.spin_speed * delta;
        }
    }

    /// Descend until `y <= hover_altitude`, then sway on the wall clock.
    ///
    /// The switch to swaying is latched: the boss never resumes descending,
    /// even if something pushes it back above the hover altitude.
    pub fn move_boss(boss: &mut Boss, config: &BossConfig, delta: f32, wall_clock: f64) {
        if boss.movement == BossMovement::Descending && boss.position.y <= config.hover_altitude {
            boss.movement = BossMovement::Swaying;
        }

        match boss.movement {
            BossMovement::Descending => {
                advance_along_y(&mut boss.position, -config.descent_speed, delta);
            }
            BossMovement::Swaying => {
                // Phase comes from the wall clock, not from time since arrival
                boss.position.x += oscillate_x(wall_clock, delta, config.sway_amplitude);
            }
        }
        boss.spin += config.spin_speed * delta;
    }

    pub fn move_lasers(store: &mut EntityStore, delta: f32) {
        for (_, laser) in store.player_lasers.iter_mut() {
            advance_along_y(&mut laser.position, laser.velocity_y, delta);
        }
        for (_, laser) in store.enemy_lasers.iter_mut() {
            advance_along_y(&mut laser.position, laser.velocity_y, delta);
        }
    }

    /// Age explosions and drop the ones past their lifetime.
    pub fn update_explosions(store: &mut EntityStore, config: &ExplosionConfig, delta: f32) {
        let mut finished = Vec::new();
        for (id, explosion) in store.explosions.iter_mut() {
            explosion.update(delta, config.decay_rate);
            if explosion.is_finished(config.lifetime) {
                finished.push(id);
            }
        }
        for id in finished {
            store.remove_explosion(id);
        }
    }

    /// Remove lasers and fighters that left the play volume.
    ///
    /// Player lasers leave through the ceiling, enemy lasers and fighters
    /// through the floor.
    pub fn cull_out_of_volume(store: &mut EntityStore, config: &LaserConfig) -> CullReport {
        let mut report = CullReport::default();

        let gone: Vec<_> = store
            .player_lasers
            .iter()
            .filter(|(_, l)| l.position.y > config.ceiling)
            .map(|(id, _)| id)
            .collect();
        for id in gone {
            report.player_lasers += store.remove_player_laser(id).is_some() as usize;
        }

        let gone: Vec<_> = store
            .enemy_lasers
            .iter()
            .filter(|(_, l)| l.position.y < config.floor)
            .map(|(id, _)| id)
            .collect();
        for id in gone {
            report.enemy_lasers += store.remove_enemy_laser(id).is_some() as usize;
        }

        let gone: Vec<_> = store
            .enemies
            .iter()
            .filter(|(_, e)| e.position.y < config.floor)
            .map(|(id, _)| id)
            .collect();
        for id in gone {
            report.enemies += store.remove_enemy(id).is_some() as usize;
        }

        report
    }
}

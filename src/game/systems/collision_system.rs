//! Collision system: resolves every hit of the frame in a fixed order.
//!
//! Wraps the proximity primitives from [`crate::physics::collision`] into the
//! three pair checks of the game:
//!
//! 1. enemy laser vs player
//! 2. player laser vs fighter
//! 3. player laser vs boss
//!
//! A laser is removed from its pool before any side effect of its hit fires,
//! so it can never score against two targets. Once a step ends the run
//! (game over or victory) the remaining steps of the frame are skipped.

use glam::Vec3;
use rand::Rng;

use crate::game::config::GameConfig;
use crate::game::entities::Explosion;
use crate::game::scheduler::{DelayedAction, Scheduler};
use crate::game::state::GameStateMachine;
use crate::game::store::EntityStore;
use crate::physics::collision::{first_within, within_radius};

/// What the collision pass changed this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    /// Enemy lasers that struck the player
    pub player_hits: u32,
    pub enemies_destroyed: u32,
    pub boss_hits: u32,
    pub boss_destroyed: bool,
    pub game_over: bool,
}

impl CollisionOutcome {
    /// Whether this frame ended the run.
    pub fn ended_run(&self) -> bool {
        self.game_over || self.boss_destroyed
    }
}

/// Stateless pair checks.
pub struct CollisionSystem;

impl CollisionSystem {
    /// Run all three pair checks in order.
    ///
    /// `now` is the wall-clock reading used to schedule the boss's follow-up
    /// explosions.
    pub fn resolve<R: Rng + ?Sized>(
        now: f64,
        config: &GameConfig,
        machine: &mut GameStateMachine,
        store: &mut EntityStore,
        scheduler: &mut Scheduler,
        rng: &mut R,
    ) -> CollisionOutcome {
        let mut outcome = CollisionOutcome::default();
        if !machine.state().is_playing() {
            return outcome;
        }

        Self::enemy_lasers_vs_player(config, machine, store, rng, &mut outcome);
        if !machine.state().is_playing() {
            return outcome;
        }

        Self::player_lasers_vs_enemies(config, machine, store, rng, &mut outcome);
        Self::player_lasers_vs_boss(now, config, machine, store, scheduler, rng, &mut outcome);
        outcome
    }

    /// Threshold `enemy_laser_vs_player`: remove the laser, damage the player,
    /// explode at the laser.
    pub fn enemy_lasers_vs_player<R: Rng + ?Sized>(
        config: &GameConfig,
        machine: &mut GameStateMachine,
        store: &mut EntityStore,
        rng: &mut R,
        outcome: &mut CollisionOutcome,
    ) {
        let player_position = store.player().position;
        let threshold = config.collision.enemy_laser_vs_player;

        for id in store.enemy_lasers().ids() {
            let Some(position) = store.enemy_lasers().get(id).map(|l| l.position) else {
                continue;
            };
            if !within_radius(position, player_position, threshold) {
                continue;
            }
            if store.remove_enemy_laser(id).is_none() {
                continue;
            }

            outcome.player_hits += 1;
            let ended = machine.take_damage(config.scoring.enemy_laser_damage);
            store.add_explosion(Explosion::spawn(position, &config.explosion, rng));
            tracing::debug!(%id, health = machine.state().health, "player hit");

            if ended {
                outcome.game_over = true;
                return;
            }
        }
    }

    /// Threshold `player_laser_vs_enemy`: the first live laser in range of a
    /// fighter destroys it. Both are removed, the fighter explodes, and the
    /// kill is scored.
    pub fn player_lasers_vs_enemies<R: Rng + ?Sized>(
        config: &GameConfig,
        machine: &mut GameStateMachine,
        store: &mut EntityStore,
        rng: &mut R,
        outcome: &mut CollisionOutcome,
    ) {
        let threshold = config.collision.player_laser_vs_enemy;

        for enemy_id in store.enemies().ids() {
            let Some(enemy_position) = store.enemies().get(enemy_id).map(|e| e.position) else {
                continue;
            };
            let laser_id = first_within(
                enemy_position,
                threshold,
                store
                    .player_lasers()
                    .iter()
                    .map(|(id, laser)| (id, laser.position)),
            );
            let Some(laser_id) = laser_id else {
                continue;
            };

            if store.remove_player_laser(laser_id).is_none() {
                continue;
            }
            if store.remove_enemy(enemy_id).is_none() {
                continue;
            }

            store.add_explosion(Explosion::spawn(enemy_position, &config.explosion, rng));
            machine.add_score(config.scoring.enemy_kill_score);
            machine.add_kill();
            outcome.enemies_destroyed += 1;
            tracing::debug!(enemy = %enemy_id, laser = %laser_id, "enemy destroyed");
        }
    }

    /// Threshold `player_laser_vs_boss`: each laser in range chips one point
    /// of boss health. The last point destroys the boss and wins the run.
    pub fn player_lasers_vs_boss<R: Rng + ?Sized>(
        now: f64,
        config: &GameConfig,
        machine: &mut GameStateMachine,
        store: &mut EntityStore,
        scheduler: &mut Scheduler,
        rng: &mut R,
        outcome: &mut CollisionOutcome,
    ) {
        let threshold = config.collision.player_laser_vs_boss;

        for laser_id in store.player_lasers().ids() {
            let Some(boss_position) = store.boss().map(|b| b.position) else {
                return;
            };
            let Some(position) = store.player_lasers().get(laser_id).map(|l| l.position) else {
                continue;
            };
            if !within_radius(position, boss_position, threshold) {
                continue;
            }
            if store.remove_player_laser(laser_id).is_none() {
                continue;
            }

            let remaining = match store.boss_mut() {
                Some(boss) => {
                    boss.health = boss.health.saturating_sub(1);
                    boss.health
                }
                None => return,
            };
            machine.set_boss_health(remaining);
            store.add_explosion(Explosion::spawn(position, &config.explosion, rng));
            machine.add_score(config.scoring.boss_hit_score);
            outcome.boss_hits += 1;
            tracing::debug!(remaining, "boss hit");

            if remaining == 0 {
                Self::destroy_boss(now, boss_position, config, machine, store, scheduler, rng);
                outcome.boss_destroyed = true;
                return;
            }
        }
    }

    /// Blow up the boss: one explosion now, the rest staggered through the
    /// scheduler at fixed offsets from where it died.
    fn destroy_boss<R: Rng + ?Sized>(
        now: f64,
        boss_position: Vec3,
        config: &GameConfig,
        machine: &mut GameStateMachine,
        store: &mut EntityStore,
        scheduler: &mut Scheduler,
        rng: &mut R,
    ) {
        let explosion = &config.explosion;
        store.add_explosion(Explosion::spawn(boss_position, explosion, rng));
        for (delay, offset) in explosion
            .boss_death_delays
            .iter()
            .zip(explosion.boss_death_offsets.iter())
        {
            scheduler.schedule(now, *delay, DelayedAction::Explosion(boss_position + *offset));
        }

        store.remove_boss();
        machine.declare_victory();
    }
}

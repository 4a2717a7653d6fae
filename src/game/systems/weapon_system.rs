//! Weapon system: player trigger gate plus enemy and boss fire timers.
//!
//! The player's trigger is rate-limited on the wall clock (one bolt per
//! cooldown window however fast frames arrive). Enemy and boss guns run on
//! per-entity countdowns fed by frame delta.

use glam::Vec3;
use rand::Rng;

use crate::game::config::{BossConfig, EnemyConfig, GameConfig};
use crate::game::entities::{EntityId, Laser};
use crate::game::random::sample_range;
use crate::game::store::EntityStore;

/// Owns the player's last-fire timestamp.
#[derive(Debug, Clone, Default)]
pub struct WeaponSystem {
    /// Wall-clock seconds of the last player shot, `None` until the first
    last_fire: Option<f64>,
}

impl WeaponSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_fire(&self) -> Option<f64> {
        self.last_fire
    }

    /// Forget the last shot so the next trigger pull fires immediately.
    pub fn reset(&mut self) {
        self.last_fire = None;
    }

    /// Whether the trigger gate is open at wall-clock `now`.
    pub fn can_fire(&self, now: f64, cooldown: f64) -> bool {
        match self.last_fire {
            None => true,
            Some(last) => now - last >= cooldown,
        }
    }

    /// Fire one player bolt from the muzzle if the cooldown has elapsed.
    pub fn try_fire_player(
        &mut self,
        now: f64,
        store: &mut EntityStore,
        config: &GameConfig,
    ) -> Option<EntityId> {
        if !self.can_fire(now, config.player.fire_cooldown) {
            return None;
        }
        self.last_fire = Some(now);

        let muzzle = store.player().position + config.player.muzzle_offset;
        let id = store.add_laser(Laser::player(muzzle, config.lasers.player_speed));
        tracing::trace!(%id, x = muzzle.x, "player fired");
        Some(id)
    }

    /// Count down every fighter's gun; fire from those inside the band.
    ///
    /// A fighter whose timer ran out outside the band keeps its expired
    /// timer and fires as soon as it enters the band.
    pub fn update_enemy_fire<R: Rng + ?Sized>(
        store: &mut EntityStore,
        config: &EnemyConfig,
        laser_speed: f32,
        delta: f32,
        rng: &mut R,
    ) -> usize {
        let mut muzzles: Vec<Vec3> = Vec::new();
        for (_, enemy) in store.enemies.iter_mut() {
            enemy.shoot_timer -= delta;
            let y = enemy.position.y;
            if enemy.shoot_timer <= 0.0 && y > config.firing_band_low && y < config.firing_band_high
            {
                enemy.shoot_timer = sample_range(rng, config.refire_min, config.refire_max);
                muzzles.push(enemy.position);
            }
        }

        for &muzzle in &muzzles {
            store.add_laser(Laser::enemy(muzzle, laser_speed));
        }
        muzzles.len()
    }

    /// Count down the boss gun and fire a three-bolt spread when it runs out.
    ///
    /// Returns the number of bolts fired (0 or 3).
    pub fn update_boss_fire(
        store: &mut EntityStore,
        config: &BossConfig,
        laser_speed: f32,
        delta: f32,
    ) -> usize {
        let Some(boss) = store.boss_mut() else {
            return 0;
        };
        boss.shoot_timer -= delta;
        if boss.shoot_timer > 0.0 {
            return 0;
        }
        boss.shoot_timer = config.fire_interval;

        let centre = boss.position - Vec3::new(0.0, config.muzzle_drop, 0.0);
        let offsets = [-config.spread_spacing, 0.0, config.spread_spacing];
        for dx in offsets {
            store.add_laser(Laser::enemy(centre + Vec3::new(dx, 0.0, 0.0), laser_speed));
        }
        tracing::trace!(x = centre.x, "boss volley");
        offsets.len()
    }
}

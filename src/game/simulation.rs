//! Simulation: high-level composition of all game systems.
//!
//! Owns the session state, the entity store, and every system. Its
//! [`tick`](Simulation::tick) method is the single entry point for the whole
//! per-frame game logic. It runs to completion, reads input exactly once,
//! and only talks outward through [`UiPresenter`] and [`Renderer`].

use crate::game::config::GameConfig;
use crate::game::entities::Explosion;
use crate::game::events::{Renderer, UiPresenter};
use crate::game::random::{GameRng, rng_from_seed};
use crate::game::scheduler::{DelayedAction, Scheduler};
use crate::game::state::{GameState, GameStateMachine, Phase};
use crate::game::store::EntityStore;
use crate::game::systems::{
    CollisionOutcome, CollisionSystem, CullReport, MovementSystem, SpawnDirector, WeaponSystem,
};
use crate::input::{InputAction, InputSource};
use crate::time::{Clock, FrameTime};

/// Summary of what one tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    /// Sequence number of this tick, starting at 1
    pub tick: u64,
    /// Delta actually simulated (negative or non-finite input becomes 0)
    pub delta: f32,
    pub player_fired: bool,
    pub enemy_shots: usize,
    pub enemy_spawned: bool,
    pub boss_spawned: bool,
    /// Delayed explosions that came due this tick
    pub delayed_explosions: usize,
    pub collisions: CollisionOutcome,
    pub culled: CullReport,
}

/// The whole game world plus the rules that advance it.
pub struct Simulation {
    config: GameConfig,
    machine: GameStateMachine,
    store: EntityStore,
    spawner: SpawnDirector,
    weapons: WeaponSystem,
    scheduler: Scheduler,
    rng: GameRng,
    ticks: u64,
}

impl Simulation {
    /// Build an idle simulation. The RNG is seeded from `config.seed` when set.
    pub fn new(config: GameConfig) -> Self {
        let machine = GameStateMachine::new(&config);
        let store = EntityStore::new(config.player.spawn_position);
        let rng = rng_from_seed(config.seed);
        Self {
            config,
            machine,
            store,
            spawner: SpawnDirector::new(),
            weapons: WeaponSystem::new(),
            scheduler: Scheduler::new(),
            rng,
            ticks: 0,
        }
    }

    // ------------------------------------------------------------------
    // Session lifecycle
    // ------------------------------------------------------------------

    /// Leave the title screen. Ignored (returns `false`) unless idle.
    pub fn start(&mut self) -> bool {
        if self.machine.phase() != Phase::Idle {
            return false;
        }
        self.reset();
        true
    }

    /// Start a fresh session from any phase.
    ///
    /// Clears every entity, returns the player to its spawn point, zeroes the
    /// spawn countdown and the fire gate, and bumps the scene generation so
    /// delayed effects from the old scene are dropped. The resulting UI and
    /// render notifications go out with the next tick.
    pub fn reset(&mut self) {
        self.scheduler.advance_generation();
        self.store.clear(self.config.player.spawn_position);
        self.spawner.reset();
        self.weapons.reset();
        self.machine.reset();
        tracing::debug!(generation = self.scheduler.generation(), "scene reset");
    }

    // ------------------------------------------------------------------
    // Frame
    // ------------------------------------------------------------------

    /// Sample `clock` once and run one tick with it.
    pub fn advance(
        &mut self,
        clock: &mut dyn Clock,
        input: &dyn InputSource,
        ui: &mut dyn UiPresenter,
        renderer: &mut dyn Renderer,
    ) -> TickReport {
        let frame = clock.sample();
        self.tick(frame, input, ui, renderer)
    }

    /// Run one logical frame.
    ///
    /// While playing the order is: delayed effects, player, trigger,
    /// movement and culling, enemy and boss guns, collisions, spawning.
    /// Outside `Playing` only delayed effects and explosions advance.
    /// Every tick ends by compacting the store and flushing notifications.
    pub fn tick(
        &mut self,
        frame: FrameTime,
        input: &dyn InputSource,
        ui: &mut dyn UiPresenter,
        renderer: &mut dyn Renderer,
    ) -> TickReport {
        self.ticks += 1;
        let delta = if frame.delta.is_finite() {
            frame.delta.max(0.0)
        } else {
            0.0
        };
        let now = frame.wall_clock;
        let mut report = TickReport {
            tick: self.ticks,
            delta,
            ..TickReport::default()
        };

        // 1. Delayed effects from the current scene
        for action in self.scheduler.drain_due(now) {
            match action {
                DelayedAction::Explosion(position) => {
                    let explosion = Explosion::spawn(position, &self.config.explosion, &mut self.rng);
                    self.store.add_explosion(explosion);
                    report.delayed_explosions += 1;
                }
            }
        }

        if self.machine.state().is_playing() {
            self.play_frame(delta, now, input, &mut report);
        } else {
            MovementSystem::update_explosions(&mut self.store, &self.config.explosion, delta);
        }

        // 8. Drop dead slots, then report outward
        self.store.compact();
        self.machine.flush(ui);
        for event in self.store.drain_render_events() {
            renderer.entity_event(&event);
        }
        renderer.frame(&self.store);

        tracing::trace!(
            tick = self.ticks,
            delta,
            enemies = self.store.enemies().len(),
            lasers = self.store.player_lasers().len() + self.store.enemy_lasers().len(),
            "tick"
        );
        report
    }

    fn play_frame(&mut self, delta: f32, now: f64, input: &dyn InputSource, report: &mut TickReport) {
        let config = &self.config;

        // 2. Player steering
        MovementSystem::move_player(self.store.player_mut(), input, &config.player, delta);

        // 3. Trigger
        if input.is_active(InputAction::Fire) {
            report.player_fired = self
                .weapons
                .try_fire_player(now, &mut self.store, config)
                .is_some();
        }

        // 4. Everything else moves, then leaves the volume if it went too far
        MovementSystem::move_enemies(&mut self.store, &config.enemy, delta);
        if let Some(boss) = self.store.boss_mut() {
            MovementSystem::move_boss(boss, &config.boss, delta, now);
        }
        MovementSystem::move_lasers(&mut self.store, delta);
        MovementSystem::update_explosions(&mut self.store, &config.explosion, delta);
        report.culled = MovementSystem::cull_out_of_volume(&mut self.store, &config.lasers);

        // 5. Enemy and boss guns
        report.enemy_shots += WeaponSystem::update_enemy_fire(
            &mut self.store,
            &config.enemy,
            config.lasers.enemy_speed,
            delta,
            &mut self.rng,
        );
        report.enemy_shots += WeaponSystem::update_boss_fire(
            &mut self.store,
            &config.boss,
            config.lasers.enemy_speed,
            delta,
        );

        // 6. Collisions
        report.collisions = CollisionSystem::resolve(
            now,
            config,
            &mut self.machine,
            &mut self.store,
            &mut self.scheduler,
            &mut self.rng,
        );

        // 7. Spawning (boss check first so fighters stop the frame it arrives).
        // A kill that reaches the threshold in step 6 summons the boss here,
        // in the same tick; no laser could have hit it earlier in the frame.
        if self.machine.state().is_playing() {
            report.boss_spawned = self
                .spawner
                .maybe_spawn_boss(&mut self.machine, config, &mut self.store)
                .is_some();
            report.enemy_spawned = self
                .spawner
                .maybe_spawn_enemy(
                    self.machine.state(),
                    delta,
                    config,
                    &mut self.store,
                    &mut self.rng,
                )
                .is_some();
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        self.machine.state()
    }

    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Mutable store access for hosts and tests that stage scenes directly.
    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn spawner(&self) -> &SpawnDirector {
        &self.spawner
    }

    pub fn weapons(&self) -> &WeaponSystem {
        &self.weapons
    }

    /// Number of ticks run since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

//! Simulation Tests - Full-Frame Scenarios
//!
//! Drives the public [`Simulation`] API tick by tick with a manual clock and
//! staged entities: clamping, damage, kills, the boss encounter, victory,
//! and session reset.

use approx::assert_abs_diff_eq;
use glam::Vec3;
use laser_strike_engine::game::{
    BossStatus, Enemy, EntityStore, GameConfig, GameEvent, Laser, NullPresenter, NullRenderer,
    Phase, RecordingPresenter, RenderEvent, Renderer, Simulation, TickReport,
};
use laser_strike_engine::input::{ActionState, InputAction};
use laser_strike_engine::time::{Clock, ManualClock};

// ============================================================================
// Helpers
// ============================================================================

fn started(seed: u64) -> Simulation {
    let mut sim = Simulation::new(GameConfig::default().with_seed(seed));
    assert!(sim.start());
    sim
}

fn run(sim: &mut Simulation, clock: &mut ManualClock, input: &ActionState) -> TickReport {
    sim.advance(clock, input, &mut NullPresenter, &mut NullRenderer)
}

fn run_recorded(
    sim: &mut Simulation,
    clock: &mut ManualClock,
    input: &ActionState,
    ui: &mut RecordingPresenter,
) -> TickReport {
    sim.advance(clock, input, ui, &mut NullRenderer)
}

/// Stage one fighter with a bolt right under it; the next tick kills it.
fn stage_kill(store: &mut EntityStore) {
    store.add_enemy(Enemy::new(Vec3::new(0.0, 5.0, 0.0), 10.0));
    store.add_laser(Laser::player(Vec3::new(0.0, 5.0, 0.0), 20.0));
}

/// Kill `count` staged fighters, one per tick.
fn kill_staged(
    sim: &mut Simulation,
    clock: &mut ManualClock,
    ui: &mut RecordingPresenter,
    count: u32,
) {
    let idle = ActionState::new();
    for _ in 0..count {
        stage_kill(sim.store_mut());
        let report = run_recorded(sim, clock, &idle, ui);
        assert_eq!(report.collisions.enemies_destroyed, 1);
    }
}

/// Land one bolt on the boss per tick until it dies.
fn hit_boss_until_dead(
    sim: &mut Simulation,
    clock: &mut ManualClock,
    ui: &mut RecordingPresenter,
) -> u32 {
    let idle = ActionState::new();
    let mut hits = 0;
    while let Some(position) = sim.store().boss().map(|b| b.position) {
        sim.store_mut().add_laser(Laser::player(position, 20.0));
        let report = run_recorded(sim, clock, &idle, ui);
        hits += report.collisions.boss_hits;
        assert!(hits <= 10, "boss survived ten hits");
    }
    hits
}

#[derive(Default)]
struct CountingRenderer {
    spawned: usize,
    despawned: usize,
    frames: usize,
}

impl Renderer for CountingRenderer {
    fn entity_event(&mut self, event: &RenderEvent) {
        match event {
            RenderEvent::Spawned { .. } => self.spawned += 1,
            RenderEvent::Despawned { .. } => self.despawned += 1,
        }
    }

    fn frame(&mut self, _store: &EntityStore) {
        self.frames += 1;
    }
}

// ============================================================================
// Player
// ============================================================================

#[test]
fn test_player_clamped_at_bounds() {
    let mut sim = started(1);
    let mut clock = ManualClock::new(1.0 / 60.0, 0.0);
    let right = ActionState::new().with(InputAction::MoveRight, true);

    for _ in 0..600 {
        run(&mut sim, &mut clock, &right);
        let x = sim.store().player().position.x;
        assert!((-8.0..=8.0).contains(&x));
    }
    assert_eq!(sim.store().player().position.x, 8.0);
    assert_abs_diff_eq!(sim.store().player().tilt, -0.4, epsilon = 1e-6);
}

#[test]
fn test_fire_rate_limited_by_wall_clock() {
    let mut sim = started(2);
    let mut clock = ManualClock::new(1.0 / 120.0, 0.0);
    let fire = ActionState::new().with(InputAction::Fire, true);

    let mut shots = 0;
    for _ in 0..120 {
        if run(&mut sim, &mut clock, &fire).player_fired {
            shots += 1;
        }
    }
    // One second of held trigger: one shot per 200 ms window
    assert!((5..=6).contains(&shots), "shots = {shots}");

    for (_, laser) in sim.store().player_lasers().iter() {
        assert_abs_diff_eq!(laser.position.x, 0.8, epsilon = 1e-6);
    }
}

#[test]
fn test_health_never_negative_and_game_over_once() {
    let mut sim = started(3);
    let mut clock = ManualClock::new(0.001, 0.0);
    let mut ui = RecordingPresenter::new();
    let idle = ActionState::new();
    let player = sim.config().player.spawn_position;

    for _ in 0..15 {
        sim.store_mut().add_laser(Laser::enemy(player, 15.0));
        run_recorded(&mut sim, &mut clock, &idle, &mut ui);
        assert!(sim.state().health <= 100);
    }

    assert_eq!(sim.state().health, 0);
    assert_eq!(sim.phase(), Phase::GameOver);
    assert_eq!(
        ui.count(|e| matches!(e, GameEvent::GameOver { .. })),
        1
    );
    assert_eq!(ui.last_hud().unwrap().health_percent, 0);
}

// ============================================================================
// Fighters
// ============================================================================

#[test]
fn test_laser_kills_enemy() {
    let mut sim = started(4);
    let mut clock = ManualClock::new(1.0 / 60.0, 0.0);
    let idle = ActionState::new();

    let enemy = sim
        .store_mut()
        .add_enemy(Enemy::new(Vec3::new(0.0, 4.0, 0.0), 10.0));
    let laser = sim
        .store_mut()
        .add_laser(Laser::player(Vec3::new(0.0, 2.0, 0.0), 20.0));

    // Closing speed 22 u/s over a 2 unit gap: the hit lands within a few frames
    let mut destroyed = 0;
    for _ in 0..10 {
        destroyed += run(&mut sim, &mut clock, &idle).collisions.enemies_destroyed;
    }
    assert_eq!(destroyed, 1);
    assert!(!sim.store().enemies().is_alive(enemy));
    assert!(!sim.store().player_lasers().is_alive(laser));
    assert_eq!(sim.state().score, 100);
    assert_eq!(sim.state().kills, 1);
}

#[test]
fn test_one_laser_cannot_kill_two() {
    let mut sim = started(5);
    let mut clock = ManualClock::new(0.001, 0.0);

    sim.store_mut()
        .add_enemy(Enemy::new(Vec3::new(-0.3, 5.0, 0.0), 10.0));
    sim.store_mut()
        .add_enemy(Enemy::new(Vec3::new(0.3, 5.0, 0.0), 10.0));
    sim.store_mut()
        .add_laser(Laser::player(Vec3::new(0.0, 5.0, 0.0), 20.0));

    let report = run(&mut sim, &mut clock, &ActionState::new());
    assert_eq!(report.collisions.enemies_destroyed, 1);
    assert_eq!(sim.state().kills, 1);
}

#[test]
fn test_enemies_culled_below_floor() {
    let mut sim = started(6);
    let mut clock = ManualClock::new(0.1, 0.0);
    let id = sim
        .store_mut()
        .add_enemy(Enemy::new(Vec3::new(7.0, -9.9, 0.0), 10.0));

    let report = run(&mut sim, &mut clock, &ActionState::new());
    assert_eq!(report.culled.enemies, 1);
    assert!(!sim.store().enemies().is_alive(id));
    assert_eq!(sim.state().kills, 0);
}

// ============================================================================
// Boss encounter
// ============================================================================

#[test]
fn test_boss_arrives_at_kill_threshold() {
    let mut sim = started(7);
    let mut clock = ManualClock::new(0.001, 0.0);
    let mut ui = RecordingPresenter::new();

    kill_staged(&mut sim, &mut clock, &mut ui, 99);
    assert!(!sim.store().has_boss());

    kill_staged(&mut sim, &mut clock, &mut ui, 1);
    assert_eq!(sim.state().kills, 100);
    assert!(sim.store().has_boss());
    assert_eq!(sim.state().boss, BossStatus::Active);
    assert_eq!(ui.count(|e| *e == GameEvent::BossAlert), 1);

    // No fighters while the boss is up, however long we wait
    let enemies_before = sim.store().enemies().len();
    clock.set_step(0.05);
    for _ in 0..100 {
        let report = run_recorded(&mut sim, &mut clock, &ActionState::new(), &mut ui);
        assert!(!report.enemy_spawned);
        assert!(!report.boss_spawned);
    }
    assert!(sim.store().enemies().len() <= enemies_before);
    assert_eq!(ui.count(|e| *e == GameEvent::BossAlert), 1);
}

#[test]
fn test_boss_descends_then_holds_altitude() {
    // Enough hull that stray fire cannot end the run before the boss settles
    let mut config = GameConfig::default().with_seed(8);
    config.player.max_health = 10_000;
    let mut sim = Simulation::new(config);
    assert!(sim.start());
    let mut clock = ManualClock::new(0.001, 0.0);
    let mut ui = RecordingPresenter::new();
    kill_staged(&mut sim, &mut clock, &mut ui, 100);

    let left = ActionState::new().with(InputAction::MoveLeft, true);
    clock.set_step(0.05);
    for _ in 0..200 {
        run(&mut sim, &mut clock, &left);
    }
    assert_eq!(sim.phase(), Phase::Playing);
    let boss = sim.store().boss().expect("boss still in play");
    assert!(boss.position.y <= 3.0 + 1e-3);
    assert!(boss.position.y > 2.9);
}

#[test]
fn test_ten_hits_win_with_three_explosions() {
    let mut sim = started(9);
    let mut clock = ManualClock::new(0.001, 0.0);
    let mut ui = RecordingPresenter::new();
    kill_staged(&mut sim, &mut clock, &mut ui, 100);
    let score_before = sim.state().score;

    let hits = hit_boss_until_dead(&mut sim, &mut clock, &mut ui);
    assert_eq!(hits, 10);
    assert_eq!(sim.phase(), Phase::Victory);
    assert_eq!(sim.state().boss_health, 0);
    assert_eq!(sim.state().score, score_before + 5000);
    assert_eq!(ui.count(|e| matches!(e, GameEvent::Victory { .. })), 1);

    // The death blast now, two more at 200 ms and 400 ms
    assert_eq!(sim.scheduler().pending(), 2);
    let mut delayed = 0;
    for _ in 0..500 {
        delayed += run_recorded(&mut sim, &mut clock, &ActionState::new(), &mut ui)
            .delayed_explosions;
    }
    assert_eq!(delayed, 2);
    assert_eq!(sim.scheduler().pending(), 0);

    // Stray enemy fire after victory changes nothing
    let player = sim.store().player().position;
    sim.store_mut().add_laser(Laser::enemy(player, 15.0));
    let health = sim.state().health;
    run_recorded(&mut sim, &mut clock, &ActionState::new(), &mut ui);
    assert_eq!(sim.state().health, health);
    assert_eq!(sim.phase(), Phase::Victory);
    assert_eq!(ui.count(|e| matches!(e, GameEvent::GameOver { .. })), 0);
}

#[test]
fn test_boss_never_respawns_after_defeat() {
    let mut sim = started(10);
    let mut clock = ManualClock::new(0.001, 0.0);
    let mut ui = RecordingPresenter::new();
    kill_staged(&mut sim, &mut clock, &mut ui, 100);
    hit_boss_until_dead(&mut sim, &mut clock, &mut ui);

    for _ in 0..100 {
        let report = run_recorded(&mut sim, &mut clock, &ActionState::new(), &mut ui);
        assert!(!report.boss_spawned);
    }
    assert!(!sim.store().has_boss());
    assert_eq!(ui.count(|e| *e == GameEvent::BossAlert), 1);
}

// ============================================================================
// Reset
// ============================================================================

#[test]
fn test_reset_clears_scene() {
    let mut sim = started(11);
    let mut clock = ManualClock::new(0.05, 0.0);
    let steer = ActionState::new()
        .with(InputAction::MoveLeft, true)
        .with(InputAction::Fire, true);
    for _ in 0..40 {
        run(&mut sim, &mut clock, &steer);
    }
    assert_eq!(sim.store().player().position.x, -8.0);

    sim.reset();
    let state = sim.state();
    assert_eq!(state.phase, Phase::Playing);
    assert_eq!(state.score, 0);
    assert_eq!(state.kills, 0);
    assert_eq!(state.health, 100);
    assert_eq!(state.boss, BossStatus::Dormant);

    let store = sim.store();
    assert!(store.enemies().is_empty());
    assert!(store.player_lasers().is_empty());
    assert!(store.enemy_lasers().is_empty());
    assert!(store.explosions().is_empty());
    assert!(!store.has_boss());
    assert_eq!(store.player().position, Vec3::new(0.0, -3.0, 0.0));
    assert_eq!(sim.spawner().timer(), 0.0);
    assert!(sim.weapons().last_fire().is_none());
}

#[test]
fn test_reset_drops_pending_boss_explosions() {
    let mut sim = started(12);
    let mut clock = ManualClock::new(0.001, 0.0);
    let mut ui = RecordingPresenter::new();
    kill_staged(&mut sim, &mut clock, &mut ui, 100);
    hit_boss_until_dead(&mut sim, &mut clock, &mut ui);
    assert_eq!(sim.scheduler().pending(), 2);

    sim.reset();
    clock.skip(1.0);
    let report = run(&mut sim, &mut clock, &ActionState::new());
    assert_eq!(report.delayed_explosions, 0);
    assert!(sim.store().explosions().is_empty());
    assert_eq!(sim.scheduler().pending(), 0);
}

#[test]
fn test_reset_from_game_over_restarts() {
    let mut sim = started(13);
    let mut clock = ManualClock::new(0.001, 0.0);
    let player = sim.config().player.spawn_position;
    for _ in 0..10 {
        sim.store_mut().add_laser(Laser::enemy(player, 15.0));
        run(&mut sim, &mut clock, &ActionState::new());
    }
    assert_eq!(sim.phase(), Phase::GameOver);
    assert!(!sim.start());

    sim.reset();
    let report = run(&mut sim, &mut clock, &ActionState::new());
    assert_eq!(sim.phase(), Phase::Playing);
    assert!(report.enemy_spawned);
}

// ============================================================================
// Collaborators
// ============================================================================

#[test]
fn test_renderer_sees_every_lifecycle_change() {
    let mut sim = started(14);
    let mut clock = ManualClock::new(0.001, 0.0);
    let mut renderer = CountingRenderer::default();

    stage_kill(sim.store_mut());
    let frame = clock.sample();
    sim.tick(frame, &ActionState::new(), &mut NullPresenter, &mut renderer);

    // player + staged fighter + staged bolt + spawned fighter + explosion
    assert_eq!(renderer.spawned, 5);
    // staged fighter and bolt
    assert_eq!(renderer.despawned, 2);
    assert_eq!(renderer.frames, 1);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let play = |seed| {
        let mut sim = started(seed);
        let mut clock = ManualClock::new(1.0 / 60.0, 0.0);
        let input = ActionState::new().with(InputAction::Fire, true);
        for _ in 0..600 {
            run(&mut sim, &mut clock, &input);
        }
        let xs: Vec<f32> = sim
            .store()
            .enemies()
            .iter()
            .map(|(_, e)| e.position.x)
            .collect();
        (*sim.state(), xs)
    };
    assert_eq!(play(99), play(99));
}

//! Laser Strike - headless driver
//!
//! Runs the simulation without a window at a fixed frame step, with a
//! scripted pilot at the controls, and prints a summary at the end.
//!
//! Usage:
//!   cargo run --bin laser-strike-headless -- --frames 36000 --seed 7
//!   RUST_LOG=laser_strike_engine=debug cargo run --bin laser-strike-headless
//!
//! The pilot slides under the lowest fighter (or the boss once it arrives)
//! and holds the trigger. `--idle` leaves the controls untouched.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use laser_strike_engine::game::{
    EntityStore, GameConfig, GameEvent, HudUpdate, NullRenderer, Simulation, UiPresenter,
};
use laser_strike_engine::input::{ActionState, InputAction};
use laser_strike_engine::time::ManualClock;

#[derive(Parser)]
#[command(name = "laser-strike-headless")]
#[command(about = "Run the Laser Strike simulation headless with a scripted pilot")]
struct Args {
    /// Maximum number of frames to simulate
    #[arg(long, default_value_t = 36_000)]
    frames: u64,

    /// Fixed frame step in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON game config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Never move or fire
    #[arg(long)]
    idle: bool,
}

/// Width of the band around the target where the pilot stops steering.
const AIM_DEADZONE: f32 = 0.2;

/// Scripted controls derived from the current scene.
struct Pilot {
    idle: bool,
}

impl Pilot {
    fn controls(&self, store: &EntityStore, muzzle_dx: f32) -> ActionState {
        if self.idle {
            return ActionState::new();
        }

        let target_x = store.boss().map(|boss| boss.position.x).or_else(|| {
            store
                .enemies()
                .iter()
                .min_by(|(_, a), (_, b)| a.position.y.total_cmp(&b.position.y))
                .map(|(_, enemy)| enemy.position.x)
        });

        let mut actions = ActionState::new().with(InputAction::Fire, true);
        if let Some(target_x) = target_x {
            let error = target_x - (store.player().position.x + muzzle_dx);
            actions.set(InputAction::MoveLeft, error < -AIM_DEADZONE);
            actions.set(InputAction::MoveRight, error > AIM_DEADZONE);
        }
        actions
    }
}

/// Presenter that forwards everything to the log.
#[derive(Default)]
struct LogPresenter {
    last_hud: Option<HudUpdate>,
}

impl UiPresenter for LogPresenter {
    fn hud(&mut self, update: HudUpdate) {
        tracing::debug!(
            score = update.score,
            kills = update.kills,
            health = update.health_percent,
            boss = update.boss_health,
            "hud"
        );
        self.last_hud = Some(update);
    }

    fn event(&mut self, event: GameEvent) {
        match event {
            GameEvent::SessionStarted => tracing::info!("session started"),
            GameEvent::BossAlert => tracing::warn!("WARNING: STAR DESTROYER APPROACHING"),
            GameEvent::GameOver { score, kills } => tracing::info!(score, kills, "game over"),
            GameEvent::Victory { score } => tracing::info!(score, "victory"),
        }
    }
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if !(args.dt.is_finite() && args.dt > 0.0) {
        bail!("--dt must be a positive number of seconds, got {}", args.dt);
    }

    let config = load_config(&args)?;
    let muzzle_dx = config.player.muzzle_offset.x;
    let pilot = Pilot { idle: args.idle };

    let mut sim = Simulation::new(config);
    let mut clock = ManualClock::new(args.dt, 0.0);
    let mut ui = LogPresenter::default();
    let mut renderer = NullRenderer;

    sim.start();
    for _ in 0..args.frames {
        let controls = pilot.controls(sim.store(), muzzle_dx);
        sim.advance(&mut clock, &controls, &mut ui, &mut renderer);

        let settled = sim.scheduler().pending() == 0 && sim.store().explosions().is_empty();
        if sim.phase().is_terminal() && settled {
            break;
        }
    }

    let state = sim.state();
    println!("=== LASER STRIKE ===");
    println!("  Phase:      {:?}", state.phase);
    println!("  Score:      {}", state.score);
    println!("  Kills:      {} / {}", state.kills, ui.last_hud.map_or(0, |h| h.kill_target));
    println!("  Health:     {}", state.health);
    println!("  Boss:       {:?} ({} hp)", state.boss, state.boss_health);
    println!("  Ticks:      {}", sim.ticks());
    println!("  Sim time:   {:.2}s", clock.now());
    Ok(())
}

//! Laser Strike Engine Library
//!
//! Headless simulation core for a single-screen arcade shooter: the player's
//! craft slides along one axis, fires upward, and must survive waves of
//! fighters and a final boss. Meshes, HUD widgets, and raw window events
//! live outside this crate; they plug in through the collaborator traits in
//! [`game::events`] and [`input::InputSource`].
//!
//! # Modules
//!
//! - [`input`] - Platform-agnostic key state, bindings, and logical actions
//! - [`physics`] - Straight-line kinematics and distance-threshold hit tests
//! - [`time`] - Frame clocks (system and manual)
//! - [`game`] - Entities, systems, the state machine, and the simulation loop
//!
//! # Example
//!
//! ```ignore
//! use laser_strike_engine::game::{GameConfig, NullRenderer, RecordingPresenter, Simulation};
//! use laser_strike_engine::input::{InputState, KeyCode};
//! use laser_strike_engine::time::ManualClock;
//!
//! let mut sim = Simulation::new(GameConfig::default().with_seed(7));
//! let mut clock = ManualClock::new(1.0 / 60.0, 0.0);
//! let mut input = InputState::new();
//! let mut ui = RecordingPresenter::new();
//!
//! sim.start();
//! input.keyboard.handle_key(KeyCode::Space, true);
//! for _ in 0..600 {
//!     sim.advance(&mut clock, &input, &mut ui, &mut NullRenderer);
//! }
//! println!("score: {}", sim.state().score);
//! ```

pub mod input;
pub mod physics;
pub mod time;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export commonly used types at crate level for convenience
pub use game::{GameConfig, Phase, Simulation, TickReport};
pub use input::{ActionState, InputAction, InputSource, InputState, KeyCode, KeyboardState};
pub use time::{Clock, FrameTime, ManualClock, SystemClock};

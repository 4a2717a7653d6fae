//! Game Module
//!
//! The arcade shooter built on top of the engine: entity records and their
//! store, the session state machine, the per-frame systems, and the
//! [`Simulation`] that composes them.

pub mod config;
pub mod entities;
pub mod events;
pub mod random;
pub mod scheduler;
pub mod simulation;
pub mod state;
pub mod store;
pub mod systems;

pub use config::{ConfigError, GameConfig};
pub use entities::{
    Boss, BossMovement, Enemy, EntityId, EntityKind, Explosion, Laser, LaserOwner, Particle, Player,
};
pub use events::{
    GameEvent, HudUpdate, NullPresenter, NullRenderer, RecordingPresenter, RenderEvent, Renderer,
    UiPresenter,
};
pub use scheduler::{DelayedAction, Scheduler};
pub use simulation::{Simulation, TickReport};
pub use state::{BossStatus, GameState, GameStateMachine, Phase};
pub use store::{EntityPool, EntityStore};
pub use systems::{
    CollisionOutcome, CollisionSystem, CullReport, MovementSystem, SpawnDirector, WeaponSystem,
    spawn_interval,
};

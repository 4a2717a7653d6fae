//! Outbound notifications
//!
//! The simulation never reads UI or renderer state back. It pushes scalar HUD
//! updates and discrete game events to a [`UiPresenter`], and entity
//! lifecycle notifications to a [`Renderer`].

use glam::Vec3;

use crate::game::entities::{EntityId, EntityKind};
use crate::game::store::EntityStore;

/// Entity lifecycle notification for the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderEvent {
    Spawned {
        id: EntityId,
        kind: EntityKind,
        position: Vec3,
    },
    Despawned {
        id: EntityId,
        kind: EntityKind,
    },
}

/// HUD scalars. Sent whenever any of them changed during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudUpdate {
    pub score: u32,
    pub kills: u32,
    /// Kill count that summons the boss (the "/ 100" of the kill counter)
    pub kill_target: u32,
    /// 0..=100
    pub health_percent: u32,
    pub boss_health: u32,
}

/// Discrete, UI-visible game events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A session started or restarted
    SessionStarted,
    /// The boss has entered the field
    BossAlert,
    /// Player health reached zero
    GameOver { score: u32, kills: u32 },
    /// The boss was destroyed
    Victory { score: u32 },
}

/// Receives HUD values and banner events.
pub trait UiPresenter {
    fn hud(&mut self, update: HudUpdate);
    fn event(&mut self, event: GameEvent);
}

/// Draws the scene. Purely reactive: it never mutates simulation state.
pub trait Renderer {
    /// An entity appeared or disappeared.
    fn entity_event(&mut self, _event: &RenderEvent) {}

    /// End of tick: current transforms are authoritative in `store`.
    fn frame(&mut self, _store: &EntityStore) {}
}

/// Presenter that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl UiPresenter for NullPresenter {
    fn hud(&mut self, _update: HudUpdate) {}
    fn event(&mut self, _event: GameEvent) {}
}

/// Renderer that draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {}

/// Presenter that records everything it receives. Handy for tests and replays.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    pub hud_updates: Vec<HudUpdate>,
    pub events: Vec<GameEvent>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_hud(&self) -> Option<&HudUpdate> {
        self.hud_updates.last()
    }

    pub fn count(&self, matches: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.iter().filter(|e| matches(e)).count()
    }
}

impl UiPresenter for RecordingPresenter {
    fn hud(&mut self, update: HudUpdate) {
        self.hud_updates.push(update);
    }

    fn event(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

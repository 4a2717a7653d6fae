//! Game State
//!
//! Session bookkeeping (score, kills, health, boss health) and the top-level
//! phase machine:
//!
//! ```text
//! Idle --start--> Playing --health 0--> GameOver --reset--> Playing
//!                    |
//!                    +--boss health 0--> Victory --reset--> Playing
//! ```
//!
//! The boss encounter is a sub-state of `Playing` tracked by [`BossStatus`]:
//! `Dormant -> Active -> Defeated`, never backwards within a session. Every
//! transition is a guarded method, so single-shot triggers cannot fire twice.

use crate::game::config::GameConfig;
use crate::game::events::{GameEvent, HudUpdate, UiPresenter};

/// Top-level game phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Title screen, nothing simulated yet
    Idle,
    Playing,
    /// Terminal until reset
    GameOver,
    /// Terminal until reset
    Victory,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::GameOver | Phase::Victory)
    }
}

/// Progress of the boss encounter within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossStatus {
    Dormant,
    Active,
    Defeated,
}

/// Snapshot of the session counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    pub score: u32,
    pub kills: u32,
    /// 0..=max health
    pub health: u32,
    /// Mirrors the boss's health, or its full health while no boss exists
    pub boss_health: u32,
    pub boss: BossStatus,
    pub phase: Phase,
}

impl GameState {
    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn boss_active(&self) -> bool {
        self.boss == BossStatus::Active
    }
}

/// Owns [`GameState`] and every transition on it.
///
/// Transitions queue [`GameEvent`]s and mark the HUD dirty; [`flush`](Self::flush)
/// hands both to a [`UiPresenter`] once per tick.
#[derive(Debug, Clone)]
pub struct GameStateMachine {
    state: GameState,
    max_health: u32,
    boss_max_health: u32,
    kill_target: u32,
    hud_dirty: bool,
    pending: Vec<GameEvent>,
}

impl GameStateMachine {
    /// Create a machine in the `Idle` phase.
    pub fn new(config: &GameConfig) -> Self {
        let max_health = config.player.max_health;
        let boss_max_health = config.boss.health;
        Self {
            state: GameState {
                score: 0,
                kills: 0,
                health: max_health,
                boss_health: boss_max_health,
                boss: BossStatus::Dormant,
                phase: Phase::Idle,
            },
            max_health,
            boss_max_health,
            kill_target: config.boss.kill_threshold,
            hud_dirty: false,
            pending: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn kill_target(&self) -> u32 {
        self.kill_target
    }

    // ------------------------------------------------------------------
    // Phase transitions
    // ------------------------------------------------------------------

    /// Leave the title screen. Ignored unless the phase is `Idle`.
    pub fn start(&mut self) -> bool {
        if self.state.phase != Phase::Idle {
            return false;
        }
        self.reset();
        true
    }

    /// Restore all counters and enter `Playing`. Valid from any phase.
    pub fn reset(&mut self) {
        self.state = GameState {
            score: 0,
            kills: 0,
            health: self.max_health,
            boss_health: self.boss_max_health,
            boss: BossStatus::Dormant,
            phase: Phase::Playing,
        };
        self.hud_dirty = true;
        self.pending.clear();
        self.pending.push(GameEvent::SessionStarted);
        tracing::info!("session started");
    }

    /// Apply damage to the player, clamping at zero.
    ///
    /// Returns `true` only for the hit that ends the run. Damage outside
    /// `Playing` is ignored, so stray lasers after a terminal transition
    /// cannot re-trigger anything.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if !self.state.is_playing() {
            return false;
        }
        self.state.health = self.state.health.saturating_sub(amount);
        self.hud_dirty = true;

        if self.state.health == 0 {
            self.state.phase = Phase::GameOver;
            self.pending.push(GameEvent::GameOver {
                score: self.state.score,
                kills: self.state.kills,
            });
            tracing::info!(score = self.state.score, kills = self.state.kills, "game over");
            return true;
        }
        false
    }

    pub fn add_score(&mut self, points: u32) {
        if !self.state.is_playing() {
            return;
        }
        self.state.score += points;
        self.hud_dirty = true;
    }

    pub fn add_kill(&mut self) {
        if !self.state.is_playing() {
            return;
        }
        self.state.kills += 1;
        self.hud_dirty = true;
    }

    /// Whether the kill count has earned the boss and it has not appeared yet.
    pub fn boss_due(&self) -> bool {
        self.state.is_playing()
            && self.state.boss == BossStatus::Dormant
            && self.state.kills >= self.kill_target
    }

    /// `Dormant -> Active`. Returns `false` if the boss is not due.
    pub fn enter_boss_phase(&mut self) -> bool {
        if !self.boss_due() {
            return false;
        }
        self.state.boss = BossStatus::Active;
        self.state.boss_health = self.boss_max_health;
        self.hud_dirty = true;
        self.pending.push(GameEvent::BossAlert);
        tracing::info!(kills = self.state.kills, "boss phase");
        true
    }

    /// Record the boss's remaining health after a hit.
    pub fn set_boss_health(&mut self, health: u32) {
        if self.state.boss_health != health {
            self.state.boss_health = health;
            self.hud_dirty = true;
        }
    }

    /// `Active -> Defeated` and `Playing -> Victory`, at most once per session.
    pub fn declare_victory(&mut self) -> bool {
        if !self.state.is_playing() || self.state.boss != BossStatus::Active {
            return false;
        }
        self.state.boss = BossStatus::Defeated;
        self.state.boss_health = 0;
        self.state.phase = Phase::Victory;
        self.hud_dirty = true;
        self.pending.push(GameEvent::Victory {
            score: self.state.score,
        });
        tracing::info!(score = self.state.score, "victory");
        true
    }

    // ------------------------------------------------------------------
    // UI emission
    // ------------------------------------------------------------------

    pub fn hud(&self) -> HudUpdate {
        let health_percent = if self.max_health == 0 {
            0
        } else {
            self.state.health * 100 / self.max_health
        };
        HudUpdate {
            score: self.state.score,
            kills: self.state.kills,
            kill_target: self.kill_target,
            health_percent,
            boss_health: self.state.boss_health,
        }
    }

    /// Send the HUD (if anything changed) and queued events, then clear them.
    pub fn flush(&mut self, ui: &mut dyn UiPresenter) {
        if self.hud_dirty {
            ui.hud(self.hud());
            self.hud_dirty = false;
        }
        for event in self.pending.drain(..) {
            ui.event(event);
        }
    }
}

//! Delayed one-shot effects
//!
//! Fire-and-forget actions due at a wall-clock time (the staggered blasts
//! when the boss breaks apart). The tick loop drains due actions at the start
//! of each tick; it never waits on them.
//!
//! Each action carries the scene generation it was scheduled in. A reset
//! bumps the generation, and anything tagged with an older generation is
//! dropped when it comes due instead of touching the new scene. Actions hold
//! plain values (positions), never entity handles, so a destroyed boss is
//! never dereferenced.

use glam::Vec3;

/// Something to do later.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DelayedAction {
    /// Spawn an explosion at a fixed world position
    Explosion(Vec3),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Scheduled {
    due: f64,
    generation: u64,
    action: DelayedAction,
}

/// Generation-tagged queue of delayed actions.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    generation: u64,
    queue: Vec<Scheduled>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current scene generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a new scene. Pending actions from older scenes become no-ops.
    pub fn advance_generation(&mut self) {
        self.generation += 1;
    }

    /// Queue `action` to run `delay` seconds after wall-clock `now`.
    pub fn schedule(&mut self, now: f64, delay: f64, action: DelayedAction) {
        self.queue.push(Scheduled {
            due: now + delay.max(0.0),
            generation: self.generation,
            action,
        });
    }

    /// Remove and return every action due at `now` that belongs to the
    /// current generation, in due order. Stale due actions are discarded.
    pub fn drain_due(&mut self, now: f64) -> Vec<DelayedAction> {
        let generation = self.generation;
        let mut due: Vec<Scheduled> = Vec::new();
        self.queue.retain(|entry| {
            if entry.due <= now {
                if entry.generation == generation {
                    due.push(*entry);
                } else {
                    tracing::debug!(?entry.action, "dropping stale delayed action");
                }
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due.total_cmp(&b.due));
        due.into_iter().map(|entry| entry.action).collect()
    }

    /// Number of actions still waiting, stale ones included.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

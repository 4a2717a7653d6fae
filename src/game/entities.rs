//! Entity Records
//!
//! Simulation-side state for every entity kind. These records hold only what
//! the rules need (transform, timers, health); meshes and materials belong to
//! the renderer, which mirrors these records through [`RenderEvent`]s.
//!
//! [`RenderEvent`]: crate::game::events::RenderEvent

use std::fmt;

use glam::Vec3;
use rand::Rng;

use crate::game::config::ExplosionConfig;

/// Stable handle for a live entity. Never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Entity archetype, as reported to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Enemy,
    Boss,
    PlayerLaser,
    EnemyLaser,
    Explosion,
}

/// Which side fired a laser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaserOwner {
    Player,
    Enemy,
}

impl LaserOwner {
    pub fn entity_kind(self) -> EntityKind {
        match self {
            LaserOwner::Player => EntityKind::PlayerLaser,
            LaserOwner::Enemy => EntityKind::EnemyLaser,
        }
    }
}

/// The player's craft.
///
/// Only x changes during play; y and z stay at the spawn altitude. Health is
/// tracked by the session state so it has a single owner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub position: Vec3,
    /// Bank angle, a pure function of x
    pub tilt: f32,
}

impl Player {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            tilt: 0.0,
        }
    }
}

/// A regular fighter. One hit destroys it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enemy {
    pub position: Vec3,
    /// Cosmetic spin around y
    pub spin: f32,
    /// Seconds until the next shot
    pub shoot_timer: f32,
    pub health: u32,
}

impl Enemy {
    pub fn new(position: Vec3, shoot_timer: f32) -> Self {
        Self {
            position,
            spin: 0.0,
            shoot_timer,
            health: 1,
        }
    }
}

/// Boss movement phase. The switch to `Swaying` is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossMovement {
    /// Sinking toward the hover altitude
    Descending,
    /// Swaying sideways at the hover altitude
    Swaying,
}

/// The destroyer that ends the run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boss {
    pub position: Vec3,
    pub spin: f32,
    pub health: u32,
    /// Seconds until the next volley
    pub shoot_timer: f32,
    pub movement: BossMovement,
}

impl Boss {
    pub fn new(position: Vec3, health: u32) -> Self {
        Self {
            position,
            spin: 0.0,
            health,
            shoot_timer: 0.0,
            movement: BossMovement::Descending,
        }
    }
}

/// A laser bolt. Moves along y only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Laser {
    pub position: Vec3,
    /// Signed speed along y (positive for player bolts)
    pub velocity_y: f32,
    pub owner: LaserOwner,
}

impl Laser {
    pub fn player(position: Vec3, speed: f32) -> Self {
        Self {
            position,
            velocity_y: speed.abs(),
            owner: LaserOwner::Player,
        }
    }

    pub fn enemy(position: Vec3, speed: f32) -> Self {
        Self {
            position,
            velocity_y: -speed.abs(),
            owner: LaserOwner::Enemy,
        }
    }
}

/// One spark of an explosion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    /// Displacement applied every frame (not scaled by delta)
    pub velocity: Vec3,
    /// Remaining life in (0, 1]; drives opacity
    pub life: f32,
}

impl Particle {
    /// Opacity for the renderer, clamped to [0, 1].
    pub fn opacity(&self) -> f32 {
        self.life.clamp(0.0, 1.0)
    }

    /// Burnt-out particles stay in the group but are no longer drawn.
    pub fn is_visible(&self) -> bool {
        self.life > 0.0
    }

    pub fn update(&mut self, delta: f32, decay_rate: f32) {
        self.position += self.velocity;
        self.life -= delta * decay_rate;
    }
}

/// A burst of particles. Removed as a whole once its age passes the lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Explosion {
    pub origin: Vec3,
    pub particles: Vec<Particle>,
    /// Seconds since the burst
    pub age: f32,
}

impl Explosion {
    /// Spawn a burst at `origin` with randomized per-axis spread.
    pub fn spawn<R: Rng + ?Sized>(origin: Vec3, config: &ExplosionConfig, rng: &mut R) -> Self {
        let spread = config.spread.abs();
        let particles = (0..config.particle_count)
            .map(|_| {
                let velocity = if spread > 0.0 {
                    Vec3::new(
                        rng.random_range(-spread..spread),
                        rng.random_range(-spread..spread),
                        rng.random_range(-spread..spread),
                    )
                } else {
                    Vec3::ZERO
                };
                Particle {
                    position: origin,
                    velocity,
                    life: 1.0,
                }
            })
            .collect();

        Self {
            origin,
            particles,
            age: 0.0,
        }
    }

    pub fn update(&mut self, delta: f32, decay_rate: f32) {
        self.age += delta;
        for particle in &mut self.particles {
            if particle.is_visible() {
                particle.update(delta, decay_rate);
            }
        }
    }

    /// `true` once the effect has outlived `lifetime`, regardless of particles.
    pub fn is_finished(&self, lifetime: f32) -> bool {
        self.age > lifetime
    }

    pub fn visible_particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.is_visible())
    }
}

//! Game state and core simulation types
//!
//! One live instance of each entity, owned by a `GameSession`. Reset
//! overwrites the entities in place and bumps the generation counter.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::input::InputIntegrator;
use super::pursuit::pursuer_speed;
use super::spawn::respawn_pickup;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Active gameplay
    Running,
    /// Frozen by the host (focus loss); resumes into Running
    Paused,
    /// Player was caught; waits for an explicit reset
    GameOver,
}

/// Playfield dimensions (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Clamp a circle's centre so the circle stays inside the arena.
    ///
    /// If the arena is narrower than the circle on an axis, the centre is
    /// pinned to the middle of that axis.
    pub fn clamp_circle(&self, pos: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            clamp_axis(pos.x, radius, self.width),
            clamp_axis(pos.y, radius, self.height),
        )
    }

    /// True when the whole circle lies inside the arena
    pub fn contains_circle(&self, pos: Vec2, radius: f32) -> bool {
        pos.x >= radius
            && pos.x <= self.width - radius
            && pos.y >= radius
            && pos.y <= self.height - radius
    }
}

fn clamp_axis(v: f32, radius: f32, extent: f32) -> f32 {
    if extent - radius < radius {
        extent * 0.5
    } else {
        crate::clamp(v, radius, extent - radius)
    }
}

/// The player-controlled circle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Pixels per nominal frame
    pub vel: Vec2,
    pub radius: f32,
    pub max_speed: f32,
}

impl Player {
    pub fn new(tuning: &Tuning, arena: &Arena) -> Self {
        Self {
            pos: arena.center(),
            vel: Vec2::ZERO,
            radius: tuning.player_radius,
            max_speed: tuning.player_max_speed,
        }
    }

    /// Integrate velocity over `dt` nominal frames and keep the circle in bounds
    pub fn integrate(&mut self, dt: f32, arena: &Arena) {
        self.pos = arena.clamp_circle(self.pos + self.vel * dt, self.radius);
    }
}

/// The AI-controlled chaser
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pursuer {
    pub pos: Vec2,
    pub radius: f32,
    pub base_speed: f32,
    /// Permanent speed accumulated from pickups (not subject to the cap)
    pub bonus: f32,
    /// Current speed, recomputed from score and bonus
    pub speed: f32,
}

impl Pursuer {
    pub fn new(tuning: &Tuning, arena: &Arena) -> Self {
        Self {
            pos: arena.clamp_circle(
                Vec2::splat(PURSUER_START_INSET),
                tuning.pursuer_radius,
            ),
            radius: tuning.pursuer_radius,
            base_speed: tuning.pursuer_base_speed,
            bonus: 0.0,
            speed: tuning.pursuer_base_speed,
        }
    }
}

/// The single collectible orb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub pos: Vec2,
    pub radius: f32,
    /// Collected and waiting for its respawn
    pub taken: bool,
}

impl Pickup {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::ZERO,
            radius: tuning.pickup_radius,
            taken: true,
        }
    }
}

/// Something that happened during a tick, for audio/FX and the clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Player collected the pickup; `score` is the new score
    PickupCollected { score: u64 },
    /// A scheduled respawn placed the pickup again
    PickupRespawned { pos: Vec2 },
    /// Pursuer caught the player; the run is over
    Caught { score: u64 },
}

/// Complete state of one sitting (many runs)
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Seed the RNG stream was started from
    pub seed: u64,
    pub arena: Arena,
    pub tuning: Tuning,
    pub player: Player,
    pub pursuer: Pursuer,
    pub pickup: Pickup,
    /// Steering mode carried between ticks
    pub input: InputIntegrator,
    pub score: u64,
    pub state: RunState,
    /// Bumped on every reset; deferred events carry the value they were scheduled under
    pub generation: u64,
    /// Ticks processed in the current run
    pub time_ticks: u64,
    pub rng: Pcg32,
}

impl GameSession {
    /// Create a session and start its first run
    pub fn new(seed: u64, arena: Arena, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let mut session = Self {
            seed,
            player: Player::new(&tuning, &arena),
            pursuer: Pursuer::new(&tuning, &arena),
            pickup: Pickup::new(&tuning),
            input: InputIntegrator::new(),
            arena,
            tuning,
            score: 0,
            state: RunState::Running,
            generation: 0,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        };
        session.reset();
        session
    }

    /// Start a fresh run: entities back to their start, score 0, new pickup.
    ///
    /// Any respawn scheduled under the previous generation becomes stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.player = Player::new(&self.tuning, &self.arena);
        self.pursuer = Pursuer::new(&self.tuning, &self.arena);
        self.pickup = Pickup::new(&self.tuning);
        self.input = InputIntegrator::new();
        self.score = 0;
        self.time_ticks = 0;
        self.state = RunState::Running;
        respawn_pickup(self);
        log::info!("Run {} started (seed {})", self.generation, self.seed);
    }

    /// Resize the playfield (host canvas resize). Entities are pulled back in bounds.
    pub fn set_arena(&mut self, arena: Arena) {
        self.arena = arena;
        self.player.pos = arena.clamp_circle(self.player.pos, self.player.radius);
        self.pursuer.pos = arena.clamp_circle(self.pursuer.pos, self.pursuer.radius);
        self.pickup.pos = arena.clamp_circle(self.pickup.pos, self.pickup.radius);
    }

    /// Recompute the pursuer's speed from score and accumulated bonus
    pub fn refresh_pursuer_speed(&mut self) {
        self.pursuer.speed = pursuer_speed(
            self.pursuer.base_speed,
            self.score,
            self.pursuer.bonus,
            &self.tuning,
        );
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn is_over(&self) -> bool {
        self.state == RunState::GameOver
    }
}

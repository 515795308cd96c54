//! Orb Chase - a pursuit arcade game
//!
//! Core modules:
//! - `sim`: Simulation (input integration, pursuit AI, collisions, clock)
//! - `game`: Host-facing driver wiring the simulation to its collaborators
//! - `renderer`: Frame snapshot handed to the host renderer
//! - `highscores`: Best-score persistence
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use game::{Game, Overlay};
pub use highscores::{MemoryScoreStore, ScoreStore};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
///
/// Values are tuned by feel. Speeds are in pixels per nominal frame.
pub mod consts {
    /// Nominal frame duration (60 Hz)
    pub const NOMINAL_FRAME_MS: f64 = 1000.0 / 60.0;
    /// Largest normalized delta accepted after a stall or tab suspend
    pub const MAX_DT_MULTIPLE: f32 = 4.0;

    /// Default arena size (host canvas overrides this)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 14.0;
    pub const PLAYER_MAX_SPEED: f32 = 4.5;
    /// Per-tick velocity multiplier when no key is held
    pub const VELOCITY_DECAY: f32 = 0.85;
    /// Velocity magnitude below which the player snaps to rest
    pub const VELOCITY_EPSILON: f32 = 0.05;

    /// Pursuer defaults
    pub const PURSUER_RADIUS: f32 = 16.0;
    pub const PURSUER_BASE_SPEED: f32 = 2.0;
    /// Speed gained per point of score (before the cap)
    pub const PURSUER_SPEED_GROWTH: f32 = 0.08;
    /// Ceiling on the score-derived speed term
    pub const PURSUER_SPEED_CAP: f32 = 2.5;
    /// Permanent speed added on every pickup, independent of the cap
    pub const PURSUER_PICKUP_BONUS: f32 = 0.02;
    /// Frames of player velocity the pursuer leads by
    pub const LEAD_FACTOR: f32 = 12.0;
    /// Grace margin subtracted from the lethal sum of radii
    pub const OVERLAP_TOLERANCE: f32 = 4.0;
    /// Pursuer start position (offset from the top-left corner)
    pub const PURSUER_START_INSET: f32 = 60.0;

    /// Pickup defaults
    pub const PICKUP_RADIUS: f32 = 10.0;
    /// Inset from arena edges for pickup placement
    pub const PICKUP_MARGIN: f32 = 30.0;
    /// Minimum distance from player and pursuer for a fresh pickup
    pub const PICKUP_MIN_DISTANCE: f32 = 120.0;
    /// Sample budget before accepting the last candidate
    pub const PICKUP_SPAWN_ATTEMPTS: u32 = 50;
    /// Delay between collection and respawn
    pub const PICKUP_RESPAWN_MS: f64 = 600.0;
}

/// Clamp `v` into `[lo, hi]`
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    v.max(lo).min(hi)
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Angle (radians) of the direction from `from` to `to`
#[inline]
pub fn heading(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit vector from `from` to `to`, or zero if they coincide
#[inline]
pub fn unit_toward(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

//! Per-tick update
//!
//! Strict order: input → player integration → pursuit → collisions.

use super::autopilot;
use super::collision::resolve_collisions;
use super::input::Steering;
use super::pursuit::advance_pursuer;
use super::state::{GameEvent, GameSession};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Keyboard intent, pointer target, or release
    pub steering: Steering,
    /// Idle/demo mode - the autopilot steers instead of the player
    pub idle_mode: bool,
}

impl TickInput {
    pub fn steer(steering: Steering) -> Self {
        Self {
            steering,
            idle_mode: false,
        }
    }
}

/// Advance the session by one tick of `dt` nominal frames.
///
/// Does nothing unless the run is `Running`.
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    if !session.is_running() {
        return Vec::new();
    }
    session.time_ticks += 1;

    // Input
    let steering = if input.idle_mode {
        autopilot::steer(session)
    } else {
        input.steering
    };
    let tuning = &session.tuning;
    session.player.vel = session.input.velocity(
        steering,
        session.player.pos,
        session.player.vel,
        session.player.max_speed,
        tuning.velocity_decay,
        tuning.velocity_epsilon,
    );

    // Movement
    session.player.integrate(dt, &session.arena);

    // Pursuit
    let next = advance_pursuer(
        session.pursuer.pos,
        session.pursuer.speed,
        session.player.pos,
        session.player.vel,
        session.tuning.lead_factor,
        dt,
    );
    session.pursuer.pos = session.arena.clamp_circle(next, session.pursuer.radius);

    // Collisions and scoring
    resolve_collisions(session)
}

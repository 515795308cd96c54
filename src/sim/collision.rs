//! Collision detection and response
//!
//! Everything here is circle-circle proximity. The lethal check is evaluated
//! first; the pickup check only runs if the player survived the tick.

use glam::Vec2;

use super::state::{GameEvent, GameSession, Pickup, RunState};
use crate::distance;

/// True when the circle centres are strictly closer than `threshold`
#[inline]
pub fn within(a: Vec2, b: Vec2, threshold: f32) -> bool {
    distance(a, b) < threshold
}

/// Lethal check: sum of radii minus the grace tolerance
pub fn player_caught(
    player_pos: Vec2,
    player_radius: f32,
    pursuer_pos: Vec2,
    pursuer_radius: f32,
    overlap_tolerance: f32,
) -> bool {
    within(
        player_pos,
        pursuer_pos,
        player_radius + pursuer_radius - overlap_tolerance,
    )
}

/// Pickup check: plain sum of radii, never while the pickup is absent
pub fn pickup_touched(player_pos: Vec2, player_radius: f32, pickup: &Pickup) -> bool {
    !pickup.taken && within(player_pos, pickup.pos, player_radius + pickup.radius)
}

/// Run both collision checks in order and apply their effects.
///
/// Returns the events raised; the caller schedules the respawn for a
/// `PickupCollected`.
pub fn resolve_collisions(session: &mut GameSession) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !session.is_running() {
        return events;
    }

    if player_caught(
        session.player.pos,
        session.player.radius,
        session.pursuer.pos,
        session.pursuer.radius,
        session.tuning.overlap_tolerance,
    ) {
        session.state = RunState::GameOver;
        log::info!(
            "Caught after {} ticks with score {}",
            session.time_ticks,
            session.score
        );
        events.push(GameEvent::Caught {
            score: session.score,
        });
        return events;
    }

    if pickup_touched(session.player.pos, session.player.radius, &session.pickup) {
        session.pickup.taken = true;
        session.score += 1;
        session.pursuer.bonus += session.tuning.pursuer_pickup_bonus;
        session.refresh_pursuer_speed();
        log::debug!(
            "Pickup collected, score {} pursuer speed {:.2}",
            session.score,
            session.pursuer.speed
        );
        events.push(GameEvent::PickupCollected {
            score: session.score,
        });
    }

    events
}

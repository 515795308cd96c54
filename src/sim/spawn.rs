//! Pickup placement
//!
//! Rejection sampling with a fixed budget. If no candidate clears both
//! entities the last one is used anyway.

use glam::Vec2;
use rand::Rng;

use super::state::{Arena, GameSession};
use crate::distance;

/// Placement rules for one spawn
#[derive(Debug, Clone, Copy)]
pub struct SpawnRules {
    /// Inset from every arena edge
    pub margin: f32,
    /// Required clearance from player and pursuer
    pub min_distance: f32,
    pub attempts: u32,
}

/// Pick a pickup position clear of `avoid`.
///
/// Returns the position and whether it satisfied the clearance rule.
pub fn choose_position<R: Rng + ?Sized>(
    rng: &mut R,
    arena: &Arena,
    avoid: &[Vec2],
    rules: SpawnRules,
) -> (Vec2, bool) {
    let (x_lo, x_hi) = (rules.margin, arena.width - rules.margin);
    let (y_lo, y_hi) = (rules.margin, arena.height - rules.margin);
    if x_lo > x_hi || y_lo > y_hi {
        return (arena.center(), false);
    }

    let mut candidate = arena.center();
    for _ in 0..rules.attempts.max(1) {
        candidate = Vec2::new(
            rng.random_range(x_lo..=x_hi),
            rng.random_range(y_lo..=y_hi),
        );
        if avoid
            .iter()
            .all(|&p| distance(candidate, p) >= rules.min_distance)
        {
            return (candidate, true);
        }
    }
    (candidate, false)
}

/// Place the session's pickup and mark it available
pub fn respawn_pickup(session: &mut GameSession) -> Vec2 {
    let rules = SpawnRules {
        margin: session.tuning.pickup_margin.max(session.pickup.radius),
        min_distance: session.tuning.pickup_min_distance,
        attempts: session.tuning.pickup_spawn_attempts,
    };
    let avoid = [session.player.pos, session.pursuer.pos];
    let (pos, clear) = choose_position(&mut session.rng, &session.arena, &avoid, rules);
    if !clear {
        log::debug!(
            "No clear pickup spot after {} attempts, using ({:.0}, {:.0})",
            rules.attempts,
            pos.x,
            pos.y
        );
    }
    session.pickup.pos = pos;
    session.pickup.taken = false;
    pos
}

//! Idle/demo mode steering
//!
//! Flees the pursuer's approach when it gets close, otherwise heads for the
//! pickup. Walls push back so the bot doesn't pin itself in a corner.

use glam::Vec2;

use super::input::{Intent, Steering};
use super::pursuit::predicted_target;
use super::state::GameSession;
use crate::unit_toward;

/// Distance at which the bot starts running away
const DANGER_RADIUS: f32 = 180.0;
/// Distance from a wall where repulsion kicks in
const WALL_BAND: f32 = 80.0;
/// How far ahead of the player the pointer target is placed
const TARGET_REACH: f32 = 60.0;

/// Pick this tick's steering for the autopilot
pub fn steer(session: &GameSession) -> Steering {
    let player = &session.player;
    let pursuer = &session.pursuer;

    // Where the pursuer will be a little while from now
    let threat = predicted_target(
        pursuer.pos,
        unit_toward(pursuer.pos, player.pos) * pursuer.speed,
        session.tuning.lead_factor * 0.5,
    );
    let to_threat = threat - player.pos;
    let threat_dist = to_threat.length();

    let mut dir = Vec2::ZERO;
    if threat_dist < DANGER_RADIUS {
        let urgency = 1.0 - threat_dist / DANGER_RADIUS;
        dir -= to_threat.normalize_or_zero() * (1.0 + 3.0 * urgency);
    }

    if !session.pickup.taken {
        dir += unit_toward(player.pos, session.pickup.pos);
    }

    dir += wall_push(player.pos, &session.arena);

    if dir.length_squared() < 1e-6 {
        return Steering::Keys(Intent::NONE);
    }
    Steering::Pointer(player.pos + dir.normalize() * TARGET_REACH)
}

fn wall_push(pos: Vec2, arena: &super::state::Arena) -> Vec2 {
    let push = |d: f32| {
        if d < WALL_BAND {
            (WALL_BAND - d) / WALL_BAND
        } else {
            0.0
        }
    };
    Vec2::new(
        push(pos.x) - push(arena.width - pos.x),
        push(pos.y) - push(arena.height - pos.y),
    ) * 2.0
}

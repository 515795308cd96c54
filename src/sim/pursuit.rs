//! Predictive pursuit
//!
//! The pursuer aims at where the player will be `lead_factor` frames from now
//! and walks straight at that point. No path planning and no memory between
//! ticks: everything is recomputed from the current state slices.

use glam::Vec2;

use crate::heading;
use crate::tuning::Tuning;

/// Difficulty term derived from score, saturating at `cap`
#[inline]
pub fn score_speed_term(score: u64, growth: f32, cap: f32) -> f32 {
    (score as f32 * growth).min(cap)
}

/// Pursuer speed for a given score and accumulated pickup bonus
pub fn pursuer_speed(base_speed: f32, score: u64, bonus: f32, tuning: &Tuning) -> f32 {
    base_speed
        + score_speed_term(score, tuning.pursuer_speed_growth, tuning.pursuer_speed_cap)
        + bonus
}

/// Where the player is expected to be `lead` frames from now
#[inline]
pub fn predicted_target(player_pos: Vec2, player_vel: Vec2, lead: f32) -> Vec2 {
    player_pos + player_vel * lead
}

/// Move the pursuer one tick toward the player's predicted position.
///
/// Returns the new pursuer position. Holds still if the prediction lands
/// exactly on the pursuer.
pub fn advance_pursuer(
    pursuer_pos: Vec2,
    speed: f32,
    player_pos: Vec2,
    player_vel: Vec2,
    lead: f32,
    dt: f32,
) -> Vec2 {
    let target = predicted_target(player_pos, player_vel, lead);
    if target == pursuer_pos {
        return pursuer_pos;
    }
    let angle = heading(pursuer_pos, target);
    pursuer_pos + Vec2::new(angle.cos(), angle.sin()) * speed * dt
}

//! Player input integration
//!
//! Two steering modes: held directional keys (with decay on release) and
//! pointer/touch steering toward a target point (held until released).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::unit_toward;

/// Directional keys currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Intent {
    pub const NONE: Intent = Intent {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    /// Unit direction of the held keys (y down). Zero if nothing is held or
    /// the held keys cancel out.
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        // Diagonals normalize to the same speed as a single axis
        dir.normalize_or_zero()
    }

    pub fn is_active(&self) -> bool {
        self.direction() != Vec2::ZERO
    }
}

/// Steering command for one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Steering {
    /// Keyboard: velocity follows the held keys, decaying when none are held
    Keys(Intent),
    /// Pointer/touch held: move toward the target at full speed
    Pointer(Vec2),
    /// Pointer/touch lifted: stop immediately
    Released,
    /// No new command; a pointer velocity persists, anything else decays
    Hold,
}

impl Default for Steering {
    fn default() -> Self {
        Steering::Keys(Intent::NONE)
    }
}

/// Velocity for a directional intent.
///
/// With no active intent the previous velocity is multiplied by `decay` once
/// (independent of dt) and snapped to zero below `epsilon`.
pub fn keyboard_velocity(
    intent: Intent,
    vel: Vec2,
    max_speed: f32,
    decay: f32,
    epsilon: f32,
) -> Vec2 {
    let dir = intent.direction();
    if dir != Vec2::ZERO {
        return dir * max_speed;
    }
    let decayed = vel * decay;
    if decayed.length() < epsilon {
        Vec2::ZERO
    } else {
        decayed
    }
}

/// Full-speed velocity from `pos` toward `target`.
///
/// Zero when the pointer sits exactly on the player.
pub fn steer_toward(pos: Vec2, target: Vec2, max_speed: f32) -> Vec2 {
    unit_toward(pos, target) * max_speed
}

/// Tracks whether the current velocity came from a held pointer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputIntegrator {
    pointer_held: bool,
}

impl InputIntegrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_held(&self) -> bool {
        self.pointer_held
    }

    /// Produce this tick's player velocity
    pub fn velocity(
        &mut self,
        steering: Steering,
        pos: Vec2,
        vel: Vec2,
        max_speed: f32,
        decay: f32,
        epsilon: f32,
    ) -> Vec2 {
        match steering {
            Steering::Keys(intent) => {
                self.pointer_held = false;
                keyboard_velocity(intent, vel, max_speed, decay, epsilon)
            }
            Steering::Pointer(target) => {
                self.pointer_held = true;
                steer_toward(pos, target, max_speed)
            }
            Steering::Released => {
                self.pointer_held = false;
                Vec2::ZERO
            }
            Steering::Hold if self.pointer_held => vel,
            Steering::Hold => keyboard_velocity(Intent::NONE, vel, max_speed, decay, epsilon),
        }
    }
}

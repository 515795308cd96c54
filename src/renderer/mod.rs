//! Rendering seam
//!
//! Drawing belongs to the host. Each frame the driver hands it a `FrameView`
//! snapshot; nothing flows back into the simulation.

pub mod instance;

pub use instance::{CircleInstance, colors, lerp_color};

use glam::Vec2;

use crate::sim::{Arena, GameSession, RunState};

/// Host-side drawing backend
pub trait Renderer {
    fn draw(&mut self, view: &FrameView);
}

/// A circle as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleView {
    pub pos: Vec2,
    pub radius: f32,
    pub color: [f32; 4],
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub arena: Arena,
    pub player: CircleView,
    pub pursuer: CircleView,
    /// `None` while the pickup waits to respawn
    pub pickup: Option<CircleView>,
    pub state: RunState,
    pub score: u64,
    pub best: u64,
}

impl FrameView {
    pub fn capture(session: &GameSession, best: u64) -> Self {
        let tuning = &session.tuning;
        let pursuer = &session.pursuer;

        // Redder as the pursuer approaches its speed ceiling
        let span = tuning.max_pursuer_speed(pursuer.bonus) - pursuer.base_speed;
        let anger = if span > 0.0 {
            (pursuer.speed - pursuer.base_speed) / span
        } else {
            0.0
        };

        Self {
            arena: session.arena,
            player: CircleView {
                pos: session.player.pos,
                radius: session.player.radius,
                color: colors::PLAYER,
            },
            pursuer: CircleView {
                pos: pursuer.pos,
                radius: pursuer.radius,
                color: lerp_color(colors::PURSUER_CALM, colors::PURSUER_ANGRY, anger),
            },
            pickup: (!session.pickup.taken).then(|| CircleView {
                pos: session.pickup.pos,
                radius: session.pickup.radius,
                color: colors::PICKUP,
            }),
            state: session.state,
            score: session.score,
            best,
        }
    }

    /// Circles in draw order (pickup, player, pursuer on top)
    pub fn instances(&self) -> Vec<CircleInstance> {
        self.pickup
            .iter()
            .chain([&self.player, &self.pursuer])
            .map(|c| CircleInstance::new(c.pos.x, c.pos.y, c.radius, c.color))
            .collect()
    }
}

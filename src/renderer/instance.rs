//! Instance data for circle rendering

use bytemuck::{Pod, Zeroable};

/// One filled circle, laid out for direct upload to a GPU instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CircleInstance {
    pub center: [f32; 2],
    pub radius: f32,
    /// Padding so `color` starts on a 16-byte boundary
    pub _pad: f32,
    pub color: [f32; 4],
}

impl CircleInstance {
    pub const fn new(x: f32, y: f32, radius: f32, color: [f32; 4]) -> Self {
        Self {
            center: [x, y],
            radius,
            _pad: 0.0,
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const PLAYER: [f32; 4] = [0.3, 0.8, 1.0, 1.0];
    /// Pursuer at base speed
    pub const PURSUER_CALM: [f32; 4] = [1.0, 0.55, 0.2, 1.0];
    /// Pursuer at its speed ceiling
    pub const PURSUER_ANGRY: [f32; 4] = [1.0, 0.1, 0.25, 1.0];
    pub const PICKUP: [f32; 4] = [1.0, 0.9, 0.3, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
}

/// Blend between two colors, `t` clamped to [0, 1]
pub fn lerp_color(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    let t = t.clamp(0.0, 1.0);
    std::array::from_fn(|i| a[i] * (1.0 - t) + b[i] * t)
}

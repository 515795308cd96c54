//! Game balance tuning
//!
//! All balance knobs live in one serde struct so a host can ship a JSON
//! override without recompiling. Missing fields fall back to `consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance parameters for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_radius: f32,
    /// Pixels per nominal frame
    pub player_max_speed: f32,
    /// Velocity multiplier applied once per tick with no input
    pub velocity_decay: f32,
    pub velocity_epsilon: f32,

    // === Pursuer ===
    pub pursuer_radius: f32,
    pub pursuer_base_speed: f32,
    pub pursuer_speed_growth: f32,
    pub pursuer_speed_cap: f32,
    pub pursuer_pickup_bonus: f32,
    pub lead_factor: f32,
    pub overlap_tolerance: f32,

    // === Pickup ===
    pub pickup_radius: f32,
    pub pickup_margin: f32,
    pub pickup_min_distance: f32,
    pub pickup_spawn_attempts: u32,
    pub pickup_respawn_ms: f64,

    // === Clock ===
    pub nominal_frame_ms: f64,
    pub max_dt_multiple: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_radius: PLAYER_RADIUS,
            player_max_speed: PLAYER_MAX_SPEED,
            velocity_decay: VELOCITY_DECAY,
            velocity_epsilon: VELOCITY_EPSILON,

            pursuer_radius: PURSUER_RADIUS,
            pursuer_base_speed: PURSUER_BASE_SPEED,
            pursuer_speed_growth: PURSUER_SPEED_GROWTH,
            pursuer_speed_cap: PURSUER_SPEED_CAP,
            pursuer_pickup_bonus: PURSUER_PICKUP_BONUS,
            lead_factor: LEAD_FACTOR,
            overlap_tolerance: OVERLAP_TOLERANCE,

            pickup_radius: PICKUP_RADIUS,
            pickup_margin: PICKUP_MARGIN,
            pickup_min_distance: PICKUP_MIN_DISTANCE,
            pickup_spawn_attempts: PICKUP_SPAWN_ATTEMPTS,
            pickup_respawn_ms: PICKUP_RESPAWN_MS,

            nominal_frame_ms: NOMINAL_FRAME_MS,
            max_dt_multiple: MAX_DT_MULTIPLE,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Clamp values the simulation cannot work with
    pub fn sanitized(mut self) -> Self {
        self.player_radius = self.player_radius.max(1.0);
        self.player_max_speed = self.player_max_speed.max(0.0);
        self.velocity_decay = self.velocity_decay.clamp(0.0, 0.99);
        self.velocity_epsilon = self.velocity_epsilon.max(1e-4);

        self.pursuer_radius = self.pursuer_radius.max(1.0);
        self.pursuer_base_speed = self.pursuer_base_speed.max(0.0);
        self.pursuer_speed_growth = self.pursuer_speed_growth.max(0.0);
        self.pursuer_speed_cap = self.pursuer_speed_cap.max(0.0);
        self.pursuer_pickup_bonus = self.pursuer_pickup_bonus.max(0.0);
        self.lead_factor = self.lead_factor.max(0.0);
        self.overlap_tolerance = self
            .overlap_tolerance
            .clamp(0.0, self.player_radius + self.pursuer_radius);

        self.pickup_radius = self.pickup_radius.max(1.0);
        self.pickup_margin = self.pickup_margin.max(self.pickup_radius);
        self.pickup_min_distance = self.pickup_min_distance.max(0.0);
        self.pickup_spawn_attempts = self.pickup_spawn_attempts.max(1);
        self.pickup_respawn_ms = self.pickup_respawn_ms.max(0.0);

        if self.nominal_frame_ms.is_nan() || self.nominal_frame_ms <= 0.0 {
            self.nominal_frame_ms = NOMINAL_FRAME_MS;
        }
        self.max_dt_multiple = self.max_dt_multiple.max(1.0);
        self
    }

    /// Centre distance below which the pursuer catches the player
    pub fn lethal_distance(&self) -> f32 {
        self.player_radius + self.pursuer_radius - self.overlap_tolerance
    }

    /// Centre distance below which the player collects the pickup
    pub fn pickup_distance(&self) -> f32 {
        self.player_radius + self.pickup_radius
    }

    /// Upper bound on pursuer speed given its accumulated pickup bonus
    pub fn max_pursuer_speed(&self, bonus: f32) -> f32 {
        self.pursuer_base_speed + self.pursuer_speed_cap + bonus
    }

    /// Load tuning from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring malformed tuning {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default tuning");
                Self::default()
            }
        }
    }
}

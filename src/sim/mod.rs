//! Simulation module
//!
//! All gameplay logic lives here. No rendering, storage, or platform
//! dependencies:
//! - One `GameSession` owned by the caller, no globals
//! - Seeded RNG only
//! - Deferred work goes through the clock's generation-tagged queue

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod input;
pub mod pursuit;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::{FrameReport, ScheduledKind, SimulationClock};
pub use collision::{pickup_touched, player_caught, resolve_collisions};
pub use input::{InputIntegrator, Intent, Steering, keyboard_velocity, steer_toward};
pub use pursuit::{advance_pursuer, predicted_target, pursuer_speed};
pub use spawn::{SpawnRules, choose_position, respawn_pickup};
pub use state::{Arena, GameEvent, GameSession, Pickup, Player, Pursuer, RunState};
pub use tick::{TickInput, tick};

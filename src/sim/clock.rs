//! Simulation clock
//!
//! Turns host frame timestamps into normalized delta-time, owns the queue of
//! deferred events, and decides whether the host should request another
//! frame. Deferred events are tagged with the session generation they were
//! scheduled under; anything from an older generation is dropped unfired.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::spawn::respawn_pickup;
use super::state::{GameEvent, GameSession, RunState};
use super::tick::{TickInput, tick};
use crate::tuning::Tuning;

/// Deferred work the clock can run later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledKind {
    RespawnPickup,
}

/// An entry in the delay queue
#[derive(Debug, Clone, Copy)]
pub struct ScheduledEvent {
    /// Simulated time (ms) at which the event fires
    pub due_ms: f64,
    /// Insertion order, breaks ties between equal due times
    pub seq: u64,
    pub generation: u64,
    pub kind: ScheduledKind,
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledEvent {}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledEvent {
    // Reversed so the BinaryHeap pops the earliest event first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due_ms
            .total_cmp(&self.due_ms)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// What one host frame produced
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    /// Normalized delta used for the tick (0 if no tick ran)
    pub dt: f32,
    pub events: Vec<GameEvent>,
    /// Host should request another frame
    pub schedule_next: bool,
}

/// Frame-driven clock for a `GameSession`
#[derive(Debug, Clone, Default)]
pub struct SimulationClock {
    /// Host timestamp of the previous frame; `None` right after start/reset/resume
    last_ms: Option<f64>,
    /// Simulated play time (ms), advanced only by ticked frames
    sim_ms: f64,
    queue: BinaryHeap<ScheduledEvent>,
    next_seq: u64,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulated play time in milliseconds
    pub fn sim_ms(&self) -> f64 {
        self.sim_ms
    }

    /// Number of queued events (stale ones included until they come due)
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Normalized delta for a frame at `now_ms`, clamped to `[0, max_dt_multiple]`.
    ///
    /// The first frame after a (re)start counts as exactly one nominal frame.
    pub fn normalized_dt(&mut self, now_ms: f64, tuning: &Tuning) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / tuning.nominal_frame_ms) as f32,
            None => 1.0,
        };
        self.last_ms = Some(now_ms);
        dt.clamp(0.0, tuning.max_dt_multiple)
    }

    /// Queue `kind` to fire `delay_ms` of play time from now
    pub fn schedule(&mut self, delay_ms: f64, generation: u64, kind: ScheduledKind) {
        let event = ScheduledEvent {
            due_ms: self.sim_ms + delay_ms,
            seq: self.next_seq,
            generation,
            kind,
        };
        self.next_seq += 1;
        self.queue.push(event);
    }

    /// Run one host frame: fire due events, tick, queue follow-ups.
    pub fn frame(&mut self, session: &mut GameSession, now_ms: f64, input: &TickInput) -> FrameReport {
        if !session.is_running() {
            self.last_ms = None;
            return FrameReport::default();
        }

        let dt = self.normalized_dt(now_ms, &session.tuning);
        self.sim_ms += dt as f64 * session.tuning.nominal_frame_ms;

        let mut events = self.fire_due(session);
        let tick_events = tick(session, input, dt);
        for event in &tick_events {
            if let GameEvent::PickupCollected { .. } = event {
                self.schedule(
                    session.tuning.pickup_respawn_ms,
                    session.generation,
                    ScheduledKind::RespawnPickup,
                );
            }
        }
        events.extend(tick_events);

        FrameReport {
            dt,
            events,
            schedule_next: session.is_running(),
        }
    }

    /// Fire every event due by now. Events from an older generation are dropped.
    fn fire_due(&mut self, session: &mut GameSession) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while let Some(next) = self.queue.peek() {
            if next.due_ms > self.sim_ms {
                break;
            }
            let Some(event) = self.queue.pop() else {
                break;
            };
            if event.generation != session.generation {
                log::debug!(
                    "Dropping stale {:?} from run {} (current run {})",
                    event.kind,
                    event.generation,
                    session.generation
                );
                continue;
            }
            match event.kind {
                ScheduledKind::RespawnPickup => {
                    if session.pickup.taken {
                        let pos = respawn_pickup(session);
                        events.push(GameEvent::PickupRespawned { pos });
                    }
                }
            }
        }
        events
    }

    /// Start a new run and resume frame requests
    pub fn reset(&mut self, session: &mut GameSession) -> bool {
        session.reset();
        self.last_ms = None;
        true
    }

    /// Freeze a running session. Returns false (stop requesting frames).
    pub fn pause(&mut self, session: &mut GameSession) -> bool {
        if session.state == RunState::Running {
            session.state = RunState::Paused;
            log::info!("Paused");
        }
        self.last_ms = None;
        false
    }

    /// Resume a paused session. Returns whether frames should be requested.
    pub fn resume(&mut self, session: &mut GameSession) -> bool {
        if session.state == RunState::Paused {
            session.state = RunState::Running;
            log::info!("Resumed");
        }
        self.last_ms = None;
        session.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::distance;
    use crate::sim::state::Arena;
    use glam::Vec2;

    const FRAME: f64 = NOMINAL_FRAME_MS;

    fn session() -> GameSession {
        GameSession::new(2024, Arena::default(), Tuning::default())
    }

    /// Put the pickup under the player and the pursuer out of the way
    fn stage_pickup(s: &mut GameSession) {
        s.pursuer.pos = Vec2::new(40.0, 40.0);
        s.pursuer.base_speed = 0.0;
        s.tuning.pursuer_speed_growth = 0.0;
        s.tuning.pursuer_pickup_bonus = 0.0;
        s.refresh_pursuer_speed();
        s.pickup.pos = s.player.pos;
        s.pickup.taken = false;
    }

    #[test]
    fn test_normalized_dt() {
        let tuning = Tuning::default();
        let mut clock = SimulationClock::new();
        assert_eq!(clock.normalized_dt(1000.0, &tuning), 1.0);
        let dt = clock.normalized_dt(1000.0 + 2.0 * FRAME, &tuning);
        assert!((dt - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_dt_clamped_after_stall() {
        let tuning = Tuning::default();
        let mut clock = SimulationClock::new();
        clock.normalized_dt(0.0, &tuning);
        assert_eq!(clock.normalized_dt(10_000.0, &tuning), MAX_DT_MULTIPLE);
        // Timestamps going backwards never run time in reverse
        assert_eq!(clock.normalized_dt(5_000.0, &tuning), 0.0);
    }

    #[test]
    fn test_queue_pops_earliest_first() {
        let mut clock = SimulationClock::new();
        clock.schedule(500.0, 1, ScheduledKind::RespawnPickup);
        clock.schedule(100.0, 1, ScheduledKind::RespawnPickup);
        clock.schedule(100.0, 2, ScheduledKind::RespawnPickup);
        let first = clock.queue.pop().unwrap();
        let second = clock.queue.pop().unwrap();
        let third = clock.queue.pop().unwrap();
        assert_eq!((first.due_ms, first.generation), (100.0, 1));
        assert_eq!((second.due_ms, second.generation), (100.0, 2));
        assert_eq!(third.due_ms, 500.0);
    }

    #[test]
    fn test_respawn_after_delay() {
        let mut s = session();
        stage_pickup(&mut s);
        let mut clock = SimulationClock::new();
        let input = TickInput::default();

        let report = clock.frame(&mut s, 0.0, &input);
        assert!(report.events.contains(&GameEvent::PickupCollected { score: 1 }));
        assert!(s.pickup.taken);
        assert_eq!(clock.pending(), 1);
        let collected_at = clock.sim_ms();

        let mut now = 0.0;
        let mut respawned_at = None;
        for _ in 0..120 {
            now += FRAME;
            let report = clock.frame(&mut s, now, &input);
            if let Some(GameEvent::PickupRespawned { pos }) = report
                .events
                .iter()
                .find(|e| matches!(e, GameEvent::PickupRespawned { .. }))
            {
                respawned_at = Some(clock.sim_ms());
                assert_eq!(s.pickup.pos, *pos);
                break;
            }
            assert!(s.pickup.taken);
        }

        let respawned_at = respawned_at.expect("pickup never respawned");
        let waited = respawned_at - collected_at;
        assert!(waited >= PICKUP_RESPAWN_MS - 1e-6);
        assert!(waited < PICKUP_RESPAWN_MS + FRAME + 1e-6);
        assert!(!s.pickup.taken);
        assert!(distance(s.pickup.pos, s.player.pos) >= PICKUP_MIN_DISTANCE);
        assert!(distance(s.pickup.pos, s.pursuer.pos) >= PICKUP_MIN_DISTANCE);
    }

    #[test]
    fn test_stale_respawn_after_reset_is_dropped() {
        let mut s = session();
        stage_pickup(&mut s);
        let mut clock = SimulationClock::new();
        let input = TickInput::default();

        clock.frame(&mut s, 0.0, &input);
        assert_eq!(clock.pending(), 1);

        // Caught before the respawn fires, then restarted
        s.state = RunState::GameOver;
        clock.reset(&mut s);
        assert!(!s.pickup.taken);

        // Keep the new pickup out of reach while the stale event comes due
        s.player.pos = Vec2::new(700.0, 500.0);
        s.pickup.pos = Vec2::new(100.0, 500.0);
        let fresh_moved = s.pickup.pos;
        s.pursuer.base_speed = 0.0;
        s.refresh_pursuer_speed();

        let mut now = 0.0;
        for _ in 0..60 {
            now += FRAME;
            let report = clock.frame(&mut s, now, &input);
            assert!(
                !report
                    .events
                    .iter()
                    .any(|e| matches!(e, GameEvent::PickupRespawned { .. }))
            );
        }
        assert_eq!(clock.pending(), 0);
        assert_eq!(s.pickup.pos, fresh_moved);
    }

    #[test]
    fn test_game_over_stops_scheduling() {
        let mut s = session();
        s.pursuer.pos = s.player.pos + Vec2::new(20.0, 0.0);
        let mut clock = SimulationClock::new();
        let report = clock.frame(&mut s, 0.0, &TickInput::default());
        assert!(!report.schedule_next);
        assert!(report.events.contains(&GameEvent::Caught { score: 0 }));

        let ticks = s.time_ticks;
        let report = clock.frame(&mut s, FRAME, &TickInput::default());
        assert!(!report.schedule_next);
        assert_eq!(s.time_ticks, ticks);
    }

    #[test]
    fn test_reset_round_trip() {
        let mut s = session();
        let mut clock = SimulationClock::new();
        for run in 0..5 {
            s.score = 10 + run;
            s.pursuer.bonus = 0.5;
            s.refresh_pursuer_speed();
            s.state = RunState::GameOver;

            assert!(clock.reset(&mut s));
            assert_eq!(s.score, 0);
            assert_eq!(s.state, RunState::Running);
            assert_eq!(s.pursuer.speed, PURSUER_BASE_SPEED);
            assert!(!s.pickup.taken);
            assert_eq!(s.generation, run + 2);
        }
    }

    #[test]
    fn test_pause_freezes_respawn_timer() {
        let mut s = session();
        stage_pickup(&mut s);
        let mut clock = SimulationClock::new();
        let input = TickInput::default();
        clock.frame(&mut s, 0.0, &input);
        let before = clock.sim_ms();

        assert!(!clock.pause(&mut s));
        let report = clock.frame(&mut s, 60_000.0, &input);
        assert!(report.events.is_empty());
        assert_eq!(clock.sim_ms(), before);
        assert!(s.pickup.taken);

        assert!(clock.resume(&mut s));
        // First frame after resume is one nominal frame, not a minute
        let report = clock.frame(&mut s, 60_016.0, &input);
        assert_eq!(report.dt, 1.0);
        assert!(s.pickup.taken);
    }

    #[test]
    fn test_resume_does_not_revive_game_over() {
        let mut s = session();
        s.state = RunState::GameOver;
        let mut clock = SimulationClock::new();
        assert!(!clock.pause(&mut s));
        assert_eq!(s.state, RunState::GameOver);
        assert!(!clock.resume(&mut s));
        assert_eq!(s.state, RunState::GameOver);
    }
}

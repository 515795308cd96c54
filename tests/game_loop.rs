//! End-to-end runs through the `Game` driver with in-memory collaborators

use glam::Vec2;
use orb_chase::consts::*;
use orb_chase::game::Overlay;
use orb_chase::sim::{Arena, GameEvent, Intent, RunState, Steering, TickInput};
use orb_chase::{Game, MemoryScoreStore, ScoreStore, Tuning, distance};

#[derive(Default)]
struct Overlays {
    shown: u32,
    hidden: u32,
}

impl Overlay for Overlays {
    fn show_game_over(&mut self, _score: u64, _best: u64, _new_best: bool) {
        self.shown += 1;
    }

    fn hide(&mut self) {
        self.hidden += 1;
    }
}

fn demo() -> TickInput {
    TickInput {
        idle_mode: true,
        ..Default::default()
    }
}

#[test]
fn autopilot_runs_stay_in_bounds_and_end_cleanly() {
    let mut game = Game::new(31337, Arena::default(), Tuning::default(), MemoryScoreStore::new());
    let mut overlay = Overlays::default();
    let mut now = 0.0;

    for _ in 0..3 {
        let mut frames = 0;
        loop {
            now += NOMINAL_FRAME_MS;
            frames += 1;
            let report = game.frame(now, &demo(), &mut overlay);

            let s = &game.session;
            assert!(s.arena.contains_circle(s.player.pos, s.player.radius));
            assert!(s.pursuer.speed <= s.tuning.max_pursuer_speed(s.pursuer.bonus) + 1e-4);
            for event in &report.events {
                if let GameEvent::PickupRespawned { .. } = event {
                    assert!(!s.pickup.taken);
                }
            }

            if !report.schedule_next || frames > 20_000 {
                break;
            }
        }
        if game.state() == RunState::GameOver {
            assert!(game.best() >= game.score());
        }
        assert!(game.restart(&mut overlay));
        assert_eq!(game.score(), 0);
        assert_eq!(game.session.pursuer.speed, PURSUER_BASE_SPEED);
    }
    assert_eq!(overlay.hidden, 3);
    assert_eq!(game.store().load(), game.best());
}

#[test]
fn collected_pickup_comes_back_after_delay() {
    let mut game = Game::new(7, Arena::default(), Tuning::default(), MemoryScoreStore::new());
    let mut overlay = Overlays::default();

    // Park the pursuer in a far corner and drop the pickup on the player
    game.session.pursuer.pos = Vec2::new(40.0, 40.0);
    game.session.pickup.pos = game.session.player.pos;

    let still = TickInput::steer(Steering::Keys(Intent::NONE));
    let report = game.frame(0.0, &still, &mut overlay);
    assert_eq!(game.score(), 1);
    assert!(report.events.contains(&GameEvent::PickupCollected { score: 1 }));
    assert!(game.session.pickup.taken);

    // 600 ms at 60 Hz is 36 frames
    let mut now = 0.0;
    let mut frames = 0;
    while game.session.pickup.taken {
        now += NOMINAL_FRAME_MS;
        frames += 1;
        game.frame(now, &still, &mut overlay);
        assert!(frames <= 40, "pickup did not respawn");
    }
    assert!(frames >= 35);
    assert!(distance(game.session.pickup.pos, game.session.player.pos) >= PICKUP_MIN_DISTANCE);
}

#[test]
fn store_only_written_on_new_best() {
    let mut overlay = Overlays::default();
    let mut game = Game::new(1, Arena::default(), Tuning::default(), MemoryScoreStore::with_best(150));

    for (score, expected_best, expected_saves) in [(120, 150, 0), (200, 200, 1), (180, 200, 1)] {
        game.session.score = score;
        game.session.pursuer.pos = game.session.player.pos + Vec2::new(5.0, 0.0);
        game.frame(0.0, &TickInput::default(), &mut overlay);
        assert_eq!(game.state(), RunState::GameOver);
        assert_eq!(game.best(), expected_best);
        assert_eq!(game.store().saves, expected_saves);
        game.restart(&mut overlay);
    }
    assert_eq!(overlay.shown, 3);
}

#[test]
fn stall_is_clamped() {
    let mut game = Game::new(2, Arena::default(), Tuning::default(), MemoryScoreStore::new());
    let mut overlay = Overlays::default();
    game.session.pursuer.pos = Vec2::new(40.0, 40.0);
    let right = TickInput::steer(Steering::Keys(Intent {
        right: true,
        ..Intent::NONE
    }));

    game.frame(0.0, &right, &mut overlay);
    let before = game.session.player.pos;
    // Ten seconds of tab suspend moves the player at most four frames' worth
    let report = game.frame(10_000.0, &right, &mut overlay);
    assert_eq!(report.dt, MAX_DT_MULTIPLE);
    let moved = game.session.player.pos.x - before.x;
    assert!(moved <= MAX_DT_MULTIPLE * PLAYER_MAX_SPEED + 1e-3);
}

//! Host-facing game driver
//!
//! Ties a `GameSession` and its `SimulationClock` to the collaborators the
//! host provides: a score store, a game-over overlay and a renderer. The host
//! calls `frame` from its frame callback and keeps requesting frames only
//! while the returned report says so.

use crate::highscores::{ScoreStore, record_final_score};
use crate::renderer::{FrameView, Renderer};
use crate::sim::{
    Arena, FrameReport, GameEvent, GameSession, RunState, SimulationClock, TickInput,
};
use crate::tuning::Tuning;

/// Game-over overlay owned by the host UI
pub trait Overlay {
    fn show_game_over(&mut self, score: u64, best: u64, new_best: bool);
    fn hide(&mut self);
}

/// Overlay that only logs (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOverlay;

impl Overlay for LogOverlay {
    fn show_game_over(&mut self, score: u64, best: u64, new_best: bool) {
        if new_best {
            log::info!("Game over - score {} (new best!)", score);
        } else {
            log::info!("Game over - score {} (best {})", score, best);
        }
    }

    fn hide(&mut self) {}
}

/// A running game: session, clock and collaborators
pub struct Game<S: ScoreStore> {
    pub session: GameSession,
    pub clock: SimulationClock,
    store: S,
    /// Best score as of the last load/save
    best: u64,
}

impl<S: ScoreStore> Game<S> {
    /// Read the stored best score and start the first run
    pub fn new(seed: u64, arena: Arena, tuning: Tuning, store: S) -> Self {
        let best = store.load();
        Self {
            session: GameSession::new(seed, arena, tuning),
            clock: SimulationClock::new(),
            store,
            best,
        }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    pub fn score(&self) -> u64 {
        self.session.score
    }

    pub fn state(&self) -> RunState {
        self.session.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Advance one host frame. On a catch the final score is recorded and
    /// the overlay is shown.
    pub fn frame(&mut self, now_ms: f64, input: &TickInput, overlay: &mut dyn Overlay) -> FrameReport {
        let report = self.clock.frame(&mut self.session, now_ms, input);
        for event in &report.events {
            if let GameEvent::Caught { score } = *event {
                self.finish_run(score, overlay);
            }
        }
        report
    }

    fn finish_run(&mut self, score: u64, overlay: &mut dyn Overlay) {
        let new_best = record_final_score(&mut self.store, self.best, score);
        if let Some(best) = new_best {
            self.best = best;
        }
        overlay.show_game_over(score, self.best, new_best.is_some());
    }

    /// Restart trigger from the overlay. Returns whether to request frames.
    pub fn restart(&mut self, overlay: &mut dyn Overlay) -> bool {
        overlay.hide();
        self.clock.reset(&mut self.session)
    }

    pub fn pause(&mut self) -> bool {
        self.clock.pause(&mut self.session)
    }

    pub fn resume(&mut self) -> bool {
        self.clock.resume(&mut self.session)
    }

    /// Host canvas resized
    pub fn resize(&mut self, width: f32, height: f32) {
        self.session.set_arena(Arena::new(width, height));
    }

    pub fn view(&self) -> FrameView {
        FrameView::capture(&self.session, self.best)
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        renderer.draw(&self.view());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryScoreStore;
    use glam::Vec2;

    #[derive(Default)]
    struct RecordingOverlay {
        shown: Vec<(u64, u64, bool)>,
        hidden: u32,
    }

    impl Overlay for RecordingOverlay {
        fn show_game_over(&mut self, score: u64, best: u64, new_best: bool) {
            self.shown.push((score, best, new_best));
        }

        fn hide(&mut self) {
            self.hidden += 1;
        }
    }

    fn game(best: u64) -> Game<MemoryScoreStore> {
        Game::new(
            5,
            Arena::default(),
            Tuning::default(),
            MemoryScoreStore::with_best(best),
        )
    }

    /// Force a catch on the next frame with the given score
    fn end_run(game: &mut Game<MemoryScoreStore>, score: u64, overlay: &mut RecordingOverlay) {
        game.session.score = score;
        game.session.pursuer.pos = game.session.player.pos + Vec2::new(10.0, 0.0);
        let report = game.frame(0.0, &TickInput::default(), overlay);
        assert!(!report.schedule_next);
    }

    #[test]
    fn test_loads_best_at_startup() {
        assert_eq!(game(150).best(), 150);
    }

    #[test]
    fn test_lower_score_keeps_store() {
        let mut overlay = RecordingOverlay::default();
        let mut g = game(150);
        end_run(&mut g, 120, &mut overlay);
        assert_eq!(g.store().saves, 0);
        assert_eq!(g.store().load(), 150);
        assert_eq!(overlay.shown, vec![(120, 150, false)]);
    }

    #[test]
    fn test_higher_score_updates_store() {
        let mut overlay = RecordingOverlay::default();
        let mut g = game(150);
        end_run(&mut g, 200, &mut overlay);
        assert_eq!(g.store().saves, 1);
        assert_eq!(g.store().load(), 200);
        assert_eq!(g.best(), 200);
        assert_eq!(overlay.shown, vec![(200, 200, true)]);
    }

    #[test]
    fn test_restart_hides_overlay() {
        let mut overlay = RecordingOverlay::default();
        let mut g = game(0);
        end_run(&mut g, 3, &mut overlay);
        assert_eq!(g.state(), RunState::GameOver);

        assert!(g.restart(&mut overlay));
        assert_eq!(overlay.hidden, 1);
        assert_eq!(g.state(), RunState::Running);
        assert_eq!(g.score(), 0);
    }

    #[test]
    fn test_render_hands_over_snapshot() {
        struct Capture(Option<FrameView>);
        impl Renderer for Capture {
            fn draw(&mut self, view: &FrameView) {
                self.0 = Some(view.clone());
            }
        }

        let g = game(9);
        let mut capture = Capture(None);
        g.render(&mut capture);
        let view = capture.0.unwrap();
        assert_eq!(view.best, 9);
        assert_eq!(view.state, RunState::Running);
        assert_eq!(view.player.pos, g.session.player.pos);
    }
}

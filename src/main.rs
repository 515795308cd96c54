//! Orb Chase entry point
//!
//! Native builds run a headless autopilot demo: a few runs in idle mode on a
//! synthetic 60 Hz clock, with the best score kept in a JSON file. The
//! browser host drives `orb_chase::Game` directly from its frame callback.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;
    use std::time::{SystemTime, UNIX_EPOCH};

    use orb_chase::consts::NOMINAL_FRAME_MS;
    use orb_chase::game::LogOverlay;
    use orb_chase::highscores::FileScoreStore;
    use orb_chase::sim::{Arena, TickInput};
    use orb_chase::{Game, Tuning, platform};

    /// Demo runs before exiting
    const RUNS: u32 = 3;
    /// Cap per run (two minutes of play)
    const MAX_FRAMES: u32 = 60 * 120;

    platform::init_logging();
    log::info!("Orb Chase (native) starting headless demo...");

    let tuning = match std::env::var("ORB_CHASE_TUNING") {
        Ok(path) => Tuning::load_file(Path::new(&path)),
        Err(_) => Tuning::default(),
    };
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);

    let store = FileScoreStore::new("orb-chase-best.json");
    let mut game = Game::new(seed, Arena::default(), tuning, store);
    let mut overlay = LogOverlay;
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut now = 0.0;
    for run in 1..=RUNS {
        let mut frames = 0;
        loop {
            now += NOMINAL_FRAME_MS;
            frames += 1;
            let report = game.frame(now, &input, &mut overlay);
            if !report.schedule_next {
                break;
            }
            if frames >= MAX_FRAMES {
                log::info!("Run {} survived the time limit with score {}", run, game.score());
                break;
            }
        }
        log::info!(
            "Run {}: {} frames, score {}, best {}",
            run,
            frames,
            game.score(),
            game.best()
        );
        game.restart(&mut overlay);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host owns the frame loop
}

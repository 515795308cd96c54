//! Best-score persistence
//!
//! The simulation never touches storage directly. The driver reads the best
//! score once at startup and writes it only when a finished run beats it.
//! Persisted to LocalStorage on the web and to a JSON file natively.

use serde::{Deserialize, Serialize};

/// Where the best score lives between sittings
pub trait ScoreStore {
    /// Stored best score; 0 when absent or unreadable
    fn load(&self) -> u64;
    fn save(&mut self, best: u64);
}

/// Persisted form of the best score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScore {
    pub best: u64,
}

impl BestScore {
    /// Parse stored text. Accepts the JSON envelope or a bare integer;
    /// anything else reads as 0.
    pub fn parse(text: &str) -> u64 {
        if let Ok(stored) = serde_json::from_str::<BestScore>(text) {
            return stored.best;
        }
        match text.trim().parse::<u64>() {
            Ok(best) => best,
            Err(_) => {
                log::warn!("Unreadable best score {:?}, starting from 0", text);
                0
            }
        }
    }

    pub fn to_json(best: u64) -> serde_json::Result<String> {
        serde_json::to_string(&BestScore { best })
    }
}

/// Save `score` if it beats `best`. Returns the new best when it was saved.
pub fn record_final_score(store: &mut dyn ScoreStore, best: u64, score: u64) -> Option<u64> {
    if score <= best {
        return None;
    }
    store.save(score);
    log::info!("New best score {} (was {})", score, best);
    Some(score)
}

/// In-process store (tests, headless runs)
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    pub best: Option<u64>,
    /// Number of `save` calls seen
    pub saves: u32,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(best: u64) -> Self {
        Self {
            best: Some(best),
            saves: 0,
        }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> u64 {
        self.best.unwrap_or(0)
    }

    fn save(&mut self, best: u64) {
        self.best = Some(best);
        self.saves += 1;
    }
}

/// JSON file next to the binary (native only)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileScoreStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ScoreStore for FileScoreStore {
    fn load(&self) -> u64 {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => {
                let best = BestScore::parse(&text);
                log::info!("Loaded best score {} from {}", best, self.path.display());
                best
            }
            Err(_) => {
                log::info!("No best score found, starting fresh");
                0
            }
        }
    }

    fn save(&mut self, best: u64) {
        let json = match BestScore::to_json(best) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not encode best score: {}", e);
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, json) {
            log::warn!("Could not save best score to {}: {}", self.path.display(), e);
        }
    }
}

/// Browser LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalScoreStore;

#[cfg(target_arch = "wasm32")]
impl LocalScoreStore {
    const STORAGE_KEY: &'static str = "orb_chase_best";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalScoreStore {
    fn load(&self) -> u64 {
        if let Some(storage) = Self::storage() {
            if let Ok(Some(text)) = storage.get_item(Self::STORAGE_KEY) {
                let best = BestScore::parse(&text);
                log::info!("Loaded best score {}", best);
                return best;
            }
        }
        log::info!("No best score found, starting fresh");
        0
    }

    fn save(&mut self, best: u64) {
        if let Some(storage) = Self::storage() {
            if let Ok(json) = BestScore::to_json(best) {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("LocalStorage rejected best score");
                }
            }
        }
    }
}

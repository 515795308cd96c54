//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logging setup
//! - Frame timestamps

/// Install the logger for this platform. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Install the logger for this platform. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Millisecond timestamps for the simulation clock
#[derive(Debug, Clone)]
pub struct FrameTimer {
    #[cfg(not(target_arch = "wasm32"))]
    start: std::time::Instant,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        Self {}
    }

    /// Milliseconds since the timer started
    #[cfg(not(target_arch = "wasm32"))]
    pub fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Page time from `performance.now()`, 0 if unavailable
    #[cfg(target_arch = "wasm32")]
    pub fn now_ms(&self) -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }
}

//! Browser binding
//!
//! The JavaScript shell owns the canvas, audio and key listeners. It calls
//! `step` from `requestAnimationFrame`, draws from `snapshot_json` and plays
//! sounds for whatever `events_json` reports.

use wasm_bindgen::prelude::*;

use crate::sim::GameState;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_init() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Flip Runner starting...");
}

/// Session handle exposed to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
}

#[wasm_bindgen]
impl WebGame {
    /// Create an idle game. `tuning_json` may be empty for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32, tuning_json: &str) -> WebGame {
        let seed = seed as u64;
        if tuning_json.trim().is_empty() {
            return WebGame {
                state: GameState::new(seed),
            };
        }
        let state = Tuning::from_json(tuning_json)
            .and_then(|tuning| GameState::with_tuning(tuning, seed))
            .unwrap_or_else(|e| {
                log::warn!("{e}; using default tuning");
                GameState::new(seed)
            });
        WebGame { state }
    }

    /// Start (or restart) with a new seed
    pub fn start(&mut self, seed: u32) {
        self.state.set_seed(seed as u64);
        self.state.start_session();
    }

    /// Step one frame. Returns true once the game is over.
    ///
    /// Events from the previous frame that were not collected through
    /// `events_json` are discarded.
    pub fn step(&mut self) -> bool {
        self.state.step_frame().terminal
    }

    pub fn action(&mut self) {
        self.state.on_player_action();
    }

    pub fn toggle_mode(&mut self) {
        self.state.on_toggle_mode();
    }

    pub fn toggle_pause(&mut self) {
        self.state.toggle_pause();
    }

    pub fn score(&self) -> u32 {
        self.state.score()
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Render snapshot as JSON
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.state.snapshot()).unwrap_or_else(|e| {
            log::error!("Snapshot serialization failed: {e}");
            String::from("{}")
        })
    }

    /// This frame's events as a JSON array (drains them)
    pub fn events_json(&mut self) -> String {
        serde_json::to_string(&self.state.drain_events()).unwrap_or_else(|e| {
            log::error!("Event serialization failed: {e}");
            String::from("[]")
        })
    }
}

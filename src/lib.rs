//! Flip Runner - an endless runner with gravity flips
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, entities, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `web`: wasm32 binding for a browser shell (rendering, audio and input live there)

pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use sim::{FrameOutcome, GameEvent, GamePhase, GameState, GravityRegime, TickInput, tick};
pub use tuning::{SpawnPolicy, Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Frames per second the host is expected to step at (HUD countdowns)
    pub const FRAMES_PER_SECOND: u32 = 60;

    /// Play-field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 400.0;

    /// Gravity is inverted while score is in [INVERSION_START, INVERSION_END)
    pub const INVERSION_START: u32 = 10;
    pub const INVERSION_END: u32 = 20;
}

/// Convert a frame count to whole seconds, rounding up (HUD countdowns)
#[inline]
pub fn frames_to_seconds(frames: u32) -> u32 {
    frames.div_ceil(consts::FRAMES_PER_SECOND)
}

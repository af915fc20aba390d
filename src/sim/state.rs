//! Game state and core simulation types
//!
//! One `GameState` is one play session. Everything a frame reads or writes
//! lives on it; there are no globals.

use serde::{Deserialize, Serialize};

use super::effects::StatusEffects;
use super::entity::{Obstacle, PowerUp, PowerUpKind};
use super::player::{Player, PlayerMode};
use super::spawn::EntityManager;
use crate::tuning::{Tuning, TuningError};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Created but not started yet
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Frames are ignored until resumed
    Paused,
    /// Run ended on a collision
    GameOver,
}

/// Direction gravity pulls in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GravityRegime {
    /// Floor at the bottom of the field
    #[default]
    Normal,
    /// Floor at the top of the field
    Inverted,
}

impl GravityRegime {
    /// Sign of "down" in screen space (+y is down on screen)
    #[inline]
    pub fn down(&self) -> f32 {
        match self {
            GravityRegime::Normal => 1.0,
            GravityRegime::Inverted => -1.0,
        }
    }

    pub fn is_inverted(&self) -> bool {
        *self == GravityRegime::Inverted
    }
}

/// Gameplay events for audio/VFX collaborators, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    Jumped,
    Flapped,
    ModeChanged { mode: PlayerMode },
    EffectCollected { kind: PowerUpKind },
    EffectExpired { kind: PowerUpKind },
    /// Shield soaked up an obstacle hit
    HazardAbsorbed,
    ObstaclePassed { score: u32 },
    GravityFlipped { regime: GravityRegime },
    GameOver { score: u32 },
}

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) tuning: Tuning,
    /// Run seed for reproducibility
    pub(crate) seed: u64,
    pub(crate) phase: GamePhase,
    pub(crate) score: u32,
    /// Frames stepped since session start
    pub(crate) frame: u64,
    /// Horizontal scroll speed (pixels/frame)
    pub(crate) speed: f32,
    pub(crate) regime: GravityRegime,
    pub(crate) player: Player,
    pub(crate) entities: EntityManager,
    pub(crate) effects: StatusEffects,
    pub(crate) events: Vec<GameEvent>,
    /// Events emitted by the last `step_frame` and not yet drained
    pub(crate) stale_events: usize,
}

impl GameState {
    /// Create an idle session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::idle(Tuning::default(), seed)
    }

    /// Create an idle session with custom tuning; call `start_session` to begin
    pub fn with_tuning(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::idle(tuning, seed))
    }

    fn idle(tuning: Tuning, seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Idle,
            score: 0,
            frame: 0,
            speed: tuning.base_speed,
            regime: GravityRegime::Normal,
            player: Player::new(&tuning),
            entities: EntityManager::seeded(seed),
            effects: StatusEffects::default(),
            events: Vec::new(),
            stale_events: 0,
            tuning,
        }
    }

    /// Reset everything to initial values and start running
    pub fn start_session(&mut self) {
        self.score = 0;
        self.frame = 0;
        self.speed = self.tuning.base_speed;
        self.regime = GravityRegime::Normal;
        self.player = Player::new(&self.tuning);
        self.entities = EntityManager::seeded(self.seed);
        self.effects = StatusEffects::default();
        self.events.clear();
        self.stale_events = 0;
        self.phase = GamePhase::Running;
        log::info!("Session started with seed: {}", self.seed);
    }

    /// Change the seed used by the next `start_session`
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
    }

    /// Jump/flap. Ignored unless running.
    pub fn on_player_action(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        if self.player.act(self.regime) {
            self.events.push(match self.player.mode {
                PlayerMode::Ground => GameEvent::Jumped,
                PlayerMode::Air => GameEvent::Flapped,
            });
        }
    }

    /// Flip ground/air mode. Ignored unless running.
    pub fn on_toggle_mode(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.player.toggle_mode(self.regime, self.tuning.field_height);
        self.events.push(GameEvent::ModeChanged {
            mode: self.player.mode,
        });
    }

    /// Running <-> Paused; other phases are unaffected
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            other => other,
        };
    }

    /// Take this frame's events.
    ///
    /// Events not drained before the next `step_frame` are dropped, so a host
    /// that never drains does not accumulate them.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.stale_events = 0;
        std::mem::take(&mut self.events)
    }

    // === Read-only accessors ===

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn regime(&self) -> GravityRegime {
        self.regime
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.entities.obstacles
    }

    pub fn powerups(&self) -> &[PowerUp] {
        &self.entities.powerups
    }

    pub fn effects(&self) -> &StatusEffects {
        &self.effects
    }

    /// Hazards and boundaries are ignored while this holds
    pub fn is_immune(&self) -> bool {
        self.tuning.tempo_grants_immunity && self.effects.tempo_active()
    }
}

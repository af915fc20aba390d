//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete step per frame
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod effects;
pub mod entity;
pub mod level;
pub mod player;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, resolve_collisions};
pub use effects::StatusEffects;
pub use entity::{Obstacle, ObstacleKind, ObstacleStyle, PowerUp, PowerUpKind};
pub use level::{check_level_up, target_regime};
pub use player::{Player, PlayerMode};
pub use snapshot::{EffectsView, ObstacleView, PlayerView, PowerUpView, RenderSnapshot};
pub use spawn::EntityManager;
pub use state::{GameEvent, GamePhase, GameState, GravityRegime};
pub use tick::{FrameOutcome, TickInput, tick};

//! Read-only view of a session for renderers and HUDs

use serde::{Deserialize, Serialize};

use super::entity::{ObstacleKind, ObstacleStyle, PowerUpKind};
use super::player::PlayerMode;
use super::state::{GamePhase, GameState, GravityRegime};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub mode: PlayerMode,
    pub grounded: bool,
    pub shielded: bool,
    /// Semi-transparent while immune
    pub ghost: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: ObstacleKind,
    pub style: ObstacleStyle,
    /// Opacity 0-1
    pub visibility: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUpView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: PowerUpKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectsView {
    pub shield_active: bool,
    pub shield_frames: u32,
    pub shield_seconds: u32,
    pub tempo_active: bool,
    pub tempo_frames: u32,
    pub tempo_seconds: u32,
}

/// Everything a frame of rendering needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub frame: u64,
    pub score: u32,
    pub phase: GamePhase,
    pub regime: GravityRegime,
    /// Spikes are drawn on the floor of the current regime while in air mode
    pub lethal_floor: bool,
    pub player: PlayerView,
    pub obstacles: Vec<ObstacleView>,
    pub powerups: Vec<PowerUpView>,
    pub effects: EffectsView,
}

impl GameState {
    /// Build a render snapshot (entities flagged for deletion are left out)
    pub fn snapshot(&self) -> RenderSnapshot {
        let player = &self.player;
        let effects = &self.effects;

        RenderSnapshot {
            frame: self.frame,
            score: self.score,
            phase: self.phase,
            regime: self.regime,
            lethal_floor: player.mode == PlayerMode::Air,
            player: PlayerView {
                x: player.pos.x,
                y: player.pos.y,
                width: player.width,
                height: player.height,
                mode: player.mode,
                grounded: player.grounded,
                shielded: effects.shield_active(),
                ghost: self.is_immune(),
            },
            obstacles: self
                .obstacles()
                .iter()
                .filter(|o| !o.marked_for_deletion)
                .map(|o| ObstacleView {
                    id: o.id,
                    x: o.pos.x,
                    y: o.pos.y,
                    width: o.size.x,
                    height: o.size.y,
                    kind: o.kind,
                    style: o.style(),
                    visibility: o.visibility(player.pos.x),
                })
                .collect(),
            powerups: self
                .powerups()
                .iter()
                .filter(|p| !p.marked_for_deletion)
                .map(|p| PowerUpView {
                    id: p.id,
                    x: p.pos.x,
                    y: p.pos.y,
                    width: p.size.x,
                    height: p.size.y,
                    kind: p.kind,
                })
                .collect(),
            effects: EffectsView {
                shield_active: effects.shield_active(),
                shield_frames: effects.shield_frames(),
                shield_seconds: effects.shield_seconds(),
                tempo_active: effects.tempo_active(),
                tempo_frames: effects.tempo_frames(),
                tempo_seconds: effects.tempo_seconds(),
            },
        }
    }
}
